/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Whole seconds elapsed between two millisecond timestamps, never negative.
///
/// Clock skew between the start and finish stamps yields 0 instead of a
/// negative duration.
pub fn elapsed_seconds(start_ms: i64, end_ms: i64) -> i64 {
    ((end_ms - start_ms) / 1000).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_seconds() {
        assert_eq!(elapsed_seconds(1_000, 61_000), 60);
        assert_eq!(elapsed_seconds(1_000, 1_999), 0);
    }

    #[test]
    fn test_elapsed_seconds_clock_skew() {
        assert_eq!(elapsed_seconds(10_000, 5_000), 0);
    }
}
