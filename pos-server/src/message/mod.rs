//! 显示端通知
//!
//! 订单/厨房状态变化的 best-effort 推送，见 [`NotificationBus`]。

pub mod bus;

pub use bus::{ConnectedDisplay, NotificationBus};
pub use shared::message::{ChangeAction, DisplayMessage, DisplayTopic, MessageKind, OrderChange};
