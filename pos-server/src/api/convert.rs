//! 路径参数转换
//!
//! 路径 ID 以字符串接收，解析失败时返回 JSON 错误体而不是 axum 默认的纯文本拒绝。

use crate::utils::{AppError, AppResult};

/// Parse a positive numeric identifier from a path segment
pub fn parse_id(raw: &str, field: &str) -> AppResult<i64> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::invalid_request(format!("Invalid {field}: {raw}"))
            .with_detail("field", field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ErrorCode;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42", "order_id").unwrap(), 42);
        assert_eq!(parse_id("abc", "order_id").unwrap_err().code, ErrorCode::InvalidRequest);
        assert!(parse_id("0", "order_id").is_err());
        assert!(parse_id("-3", "item_id").is_err());
    }
}
