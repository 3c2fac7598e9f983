//! Order Lifecycle Module
//!
//! - **status**: transition table shared by every command
//! - **service**: `OrderService`, one transaction per command
//! - **kitchen**: kitchen queue projection and cooking statistics
//!
//! # Data Flow
//!
//! ```text
//! HTTP handler → OrderService → SQLite transaction (order + items + table)
//!                     │ commit
//!                     ▼
//!              NotificationBus → /ws/orders, /ws/kitchen
//! ```

pub mod error;
pub mod kitchen;
pub mod service;
pub mod status;

pub use error::{OrderError, OrderResult};
pub use kitchen::{CompletionStatus, KitchenStats, KitchenTicket, completion_percentage};
pub use service::{ItemToggle, OrderService};
