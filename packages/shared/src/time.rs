//! Time-related utilities with clock abstraction for testability.

use chrono::{DateTime, Local};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get current Unix timestamp (milliseconds)
    fn now_millis(&self) -> i64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        get_unix_timestamp_millis()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: i64,
}

impl FixedClock {
    /// Create a new fixed clock with the given timestamp
    pub fn new(fixed_time_millis: i64) -> Self {
        Self {
            fixed_time: fixed_time_millis,
        }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.fixed_time
    }
}

/// Get current Unix timestamp (milliseconds)
pub fn get_unix_timestamp_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Format a Unix timestamp (milliseconds) as a 24-hour `HH:MM` string in the
/// server's local time zone.
///
/// Out-of-range timestamps fall back to the Unix epoch.
pub fn format_clock_time(timestamp_millis: i64) -> String {
    let utc = DateTime::from_timestamp_millis(timestamp_millis).unwrap_or_default();
    utc.with_timezone(&Local).format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_returns_non_zero_timestamp() {
        // テスト項目: SystemClock が 0 以外のタイムスタンプを返す
        // given (前提条件):
        let clock = SystemClock;

        // when (操作):
        let timestamp = clock.now_millis();

        // then (期待する結果):
        assert!(timestamp > 0);
    }

    #[test]
    fn test_system_clock_returns_increasing_timestamps() {
        // テスト項目: SystemClock が呼び出すたびに減少しないタイムスタンプを返す
        // given (前提条件):
        let clock = SystemClock;

        // when (操作):
        let timestamp1 = clock.now_millis();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let timestamp2 = clock.now_millis();

        // then (期待する結果):
        assert!(timestamp2 >= timestamp1);
    }

    #[test]
    fn test_fixed_clock_returns_consistent_timestamp() {
        // テスト項目: FixedClock が複数回呼び出しても同じタイムスタンプを返す
        // given (前提条件):
        let fixed_time = 9876543210987;
        let clock = FixedClock::new(fixed_time);

        // when (操作):
        let timestamp1 = clock.now_millis();
        let timestamp2 = clock.now_millis();

        // then (期待する結果):
        assert_eq!(timestamp1, fixed_time);
        assert_eq!(timestamp2, fixed_time);
    }

    #[test]
    fn test_format_clock_time_is_hours_and_minutes() {
        // テスト項目: 時刻が HH:MM 形式（24 時間表記）で整形される
        // given (前提条件):
        let timestamp = 1672498800000;

        // when (操作):
        let result = format_clock_time(timestamp);

        // then (期待する結果):
        assert_eq!(result.len(), 5);
        assert_eq!(&result[2..3], ":");
        let hours: u32 = result[0..2].parse().unwrap();
        let minutes: u32 = result[3..5].parse().unwrap();
        assert!(hours < 24);
        assert!(minutes < 60);
    }

    #[test]
    fn test_format_clock_time_matches_local_conversion() {
        // テスト項目: 整形結果がローカルタイムゾーンでの時刻と一致する
        // given (前提条件):
        let timestamp = 1_700_000_123_456;
        let expected = DateTime::from_timestamp_millis(timestamp)
            .unwrap()
            .with_timezone(&Local)
            .format("%H:%M")
            .to_string();

        // when (操作):
        let result = format_clock_time(timestamp);

        // then (期待する結果):
        assert_eq!(result, expected);
    }
}
