//! 时间工具函数 (本地时区日期范围)
//!
//! 所有日期→时间戳转换统一在 API handler 层完成，
//! repository 层只接收 `i64` Unix millis。

use chrono::{Datelike, Duration, Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use super::{AppError, AppResult};

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// 日期开始 (00:00:00 本地时间) → Unix millis
///
/// DST gap fallback: 如果本地时间不存在 (夏令时跳跃)，fallback 到 UTC。
pub fn day_start_millis(date: NaiveDate) -> i64 {
    let naive = date.and_time(chrono::NaiveTime::MIN);
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// 日期结束 → 次日 00:00:00 的 Unix millis
///
/// 返回次日零点时间戳，调用方使用 `< end` (不含) 语义。
pub fn day_end_millis(date: NaiveDate) -> i64 {
    day_start_millis(date.succ_opt().unwrap_or(date))
}

/// 本地今天
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// 历史订单时间范围
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RangeKind {
    #[default]
    Today,
    /// Sunday-started week containing today
    Week,
    Month,
    Custom,
}

/// Resolved `[start, end)` date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub kind: RangeKind,
    pub start_date: NaiveDate,
    /// Exclusive
    pub end_date: NaiveDate,
}

impl DateRange {
    pub fn start_millis(&self) -> i64 {
        day_start_millis(self.start_date)
    }

    pub fn end_millis(&self) -> i64 {
        day_start_millis(self.end_date)
    }

    /// Resolve a range relative to `today`
    ///
    /// Custom ranges take inclusive `YYYY-MM-DD` bounds; the end date is
    /// extended by one day so the whole end day is covered.
    pub fn resolve(
        kind: RangeKind,
        start: Option<&str>,
        end: Option<&str>,
        today: NaiveDate,
    ) -> AppResult<Self> {
        let (start_date, end_date) = match kind {
            RangeKind::Today => (today, today + Duration::days(1)),
            RangeKind::Week => {
                let week_start =
                    today - Duration::days(today.weekday().num_days_from_sunday() as i64);
                (week_start, week_start + Duration::days(7))
            }
            RangeKind::Month => {
                let month_start = today.with_day(1).unwrap_or(today);
                let next_month = month_start
                    .checked_add_months(chrono::Months::new(1))
                    .unwrap_or(month_start);
                (month_start, next_month)
            }
            RangeKind::Custom => {
                let (Some(start), Some(end)) = (start, end) else {
                    return Err(AppError::validation(
                        "start_date and end_date are required for a custom range",
                    ));
                };
                let start = parse_date(start)?;
                let end = parse_date(end)?;
                if end < start {
                    return Err(AppError::validation("end_date must not be before start_date"));
                }
                (start, end + Duration::days(1))
            }
        };

        Ok(Self {
            kind,
            start_date,
            end_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_date("2024-13-01").is_err());
        assert!(parse_date("yesterday").is_err());
    }

    #[test]
    fn test_today_range() {
        let range = DateRange::resolve(RangeKind::Today, None, None, date("2024-03-14")).unwrap();
        assert_eq!(range.start_date, date("2024-03-14"));
        assert_eq!(range.end_date, date("2024-03-15"));
        assert!(range.start_millis() < range.end_millis());
    }

    #[test]
    fn test_week_starts_on_sunday() {
        // 2024-03-14 is a Thursday
        let range = DateRange::resolve(RangeKind::Week, None, None, date("2024-03-14")).unwrap();
        assert_eq!(range.start_date, date("2024-03-10"));
        assert_eq!(range.end_date, date("2024-03-17"));
    }

    #[test]
    fn test_month_range_crosses_year() {
        let range = DateRange::resolve(RangeKind::Month, None, None, date("2024-12-20")).unwrap();
        assert_eq!(range.start_date, date("2024-12-01"));
        assert_eq!(range.end_date, date("2025-01-01"));
    }

    #[test]
    fn test_custom_range_end_inclusive() {
        let range = DateRange::resolve(
            RangeKind::Custom,
            Some("2024-03-01"),
            Some("2024-03-05"),
            date("2024-03-14"),
        )
        .unwrap();
        assert_eq!(range.start_date, date("2024-03-01"));
        assert_eq!(range.end_date, date("2024-03-06"));
    }

    #[test]
    fn test_custom_range_validation() {
        let today = date("2024-03-14");
        assert!(DateRange::resolve(RangeKind::Custom, None, Some("2024-03-05"), today).is_err());
        assert!(
            DateRange::resolve(RangeKind::Custom, Some("2024-03-05"), Some("2024-03-01"), today)
                .is_err()
        );
    }
}
