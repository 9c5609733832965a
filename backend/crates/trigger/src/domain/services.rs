//! Domain Services
//!
//! Pure window arithmetic for quota accounting.

/// Instant at which a record created at `start_ms` stops counting
pub fn window_end_ms(start_ms: i64, window_ms: i64) -> i64 {
    start_ms.saturating_add(window_ms)
}

/// Whole seconds until `resets_at_ms`, rounded up
///
/// Rounding up means a positive remainder never reports zero, so a
/// caller honoring the hint never retries before the window actually
/// frees a unit. Already-past reset instants report zero.
pub fn retry_after_secs(resets_at_ms: i64, as_of_ms: i64) -> u64 {
    let remaining_ms = resets_at_ms.saturating_sub(as_of_ms);
    if remaining_ms <= 0 {
        return 0;
    }
    (remaining_ms as u64).div_ceil(1000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_end() {
        assert_eq!(window_end_ms(1_000, 500), 1_500);
        assert_eq!(window_end_ms(i64::MAX, 1), i64::MAX); // saturates
    }

    #[test]
    fn test_retry_after_rounds_up() {
        assert_eq!(retry_after_secs(10_000, 9_001), 1);
        assert_eq!(retry_after_secs(10_000, 9_000), 1);
        assert_eq!(retry_after_secs(10_000, 8_999), 2);
        assert_eq!(retry_after_secs(10_000, 7_000), 3);
    }

    #[test]
    fn test_retry_after_past_reset_is_zero() {
        assert_eq!(retry_after_secs(10_000, 10_000), 0);
        assert_eq!(retry_after_secs(10_000, 11_000), 0);
    }

    #[test]
    fn test_retry_after_full_window() {
        let week_ms = 7 * 24 * 60 * 60 * 1000;
        assert_eq!(retry_after_secs(week_ms, 0), 7 * 24 * 60 * 60);
    }
}
