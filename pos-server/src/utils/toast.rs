//! 客户端提示头
//!
//! Successful mutations tell the browser to show a toast through an
//! `HX-Trigger` header (`{"showToast": {"message": ..., "type": ...}}`) and,
//! optionally, to navigate through `HX-Redirect`.

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use axum::response::{IntoResponseParts, ResponseParts};
use serde::Serialize;

pub const HX_TRIGGER: HeaderName = HeaderName::from_static("hx-trigger");
pub const HX_REDIRECT: HeaderName = HeaderName::from_static("hx-redirect");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// Toast instruction attached to a response
#[derive(Debug, Clone)]
pub struct Toast {
    message: String,
    level: ToastLevel,
    redirect: Option<String>,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: ToastLevel::Success,
            redirect: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: ToastLevel::Info,
            redirect: None,
        }
    }

    /// Also instruct the client to navigate to `location`
    pub fn with_redirect(mut self, location: impl Into<String>) -> Self {
        self.redirect = Some(location.into());
        self
    }

    fn trigger_value(&self) -> Option<HeaderValue> {
        let body = serde_json::json!({
            "showToast": { "message": self.message, "type": self.level }
        });
        HeaderValue::from_str(&ascii_json(&body.to_string())).ok()
    }

    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        match self.trigger_value() {
            Some(value) => {
                headers.insert(HX_TRIGGER, value);
            }
            None => tracing::debug!(message = %self.message, "Toast message not header-safe"),
        }
        if let Some(location) = &self.redirect
            && let Ok(value) = HeaderValue::from_str(location)
        {
            headers.insert(HX_REDIRECT, value);
        }
        headers
    }
}

/// Escape non-ASCII characters as `\uXXXX` so the JSON fits in a header value
fn ascii_json(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                out.push_str(&format!("\\u{:04x}", unit));
            }
        }
    }
    out
}

impl IntoResponseParts for Toast {
    type Error = std::convert::Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        res.headers_mut().extend(self.headers());
        Ok(res)
    }
}
