//! 显示端通知消息类型定义
//!
//! 这些类型在 pos-server 和前台/厨房显示端之间共享。
//! Wire format is a JSON text frame: `{"type": "...", "payload": {...}}`.

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod payload;
pub use payload::*;

/// 通知消息类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// 订单变化（前台显示端）
    OrderUpdate,
    /// 厨房变化（厨房显示端）
    KitchenUpdate,
}

impl MessageKind {
    /// Display topic that receives this kind of message
    pub const fn topic(&self) -> DisplayTopic {
        match self {
            Self::OrderUpdate => DisplayTopic::Orders,
            Self::KitchenUpdate => DisplayTopic::Kitchen,
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OrderUpdate => write!(f, "order_update"),
            Self::KitchenUpdate => write!(f, "kitchen_update"),
        }
    }
}

/// 显示端分组
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayTopic {
    /// 前台（点单/桌台）
    Orders,
    /// 厨房
    Kitchen,
}

impl fmt::Display for DisplayTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Orders => write!(f, "orders"),
            Self::Kitchen => write!(f, "kitchen"),
        }
    }
}

/// 推送给显示端的消息
///
/// Best-effort cache-invalidation hint: displays re-fetch full state on reconnect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayMessage {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub payload: serde_json::Value,
}

impl DisplayMessage {
    pub fn new(kind: MessageKind, payload: serde_json::Value) -> Self {
        Self { kind, payload }
    }

    /// 订单变化通知
    pub fn order_update(change: &OrderChange) -> Self {
        Self::new(MessageKind::OrderUpdate, change.to_value())
    }

    /// 厨房变化通知
    pub fn kitchen_update(change: &OrderChange) -> Self {
        Self::new(MessageKind::KitchenUpdate, change.to_value())
    }

    pub fn topic(&self) -> DisplayTopic {
        self.kind.topic()
    }

    /// 序列化为 WebSocket 文本帧
    pub fn to_text(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_text(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
