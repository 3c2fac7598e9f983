//! Shared types for the POS server
//!
//! Domain models, the unified error system, display notification
//! messages and small time utilities used by `pos-server` and its clients.

pub mod error;
pub mod message;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use message::{DisplayMessage, DisplayTopic, MessageKind};
