//! Slow-operation rate computation

use chrono::{DateTime, Utc};

/// Minimum elapsed window in seconds.
///
/// Two probe passes in quick succession would otherwise divide by a tiny
/// window and report an inflated rate; with the clamp the rate never
/// exceeds `count * 60`.
pub const MIN_ELAPSED_SECONDS: f64 = 1.0;

/// Wall-clock seconds between `last_run_at` and `now`, clamped to at
/// least [`MIN_ELAPSED_SECONDS`]. A clock that went backwards clamps too.
pub fn clamped_elapsed_seconds(last_run_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let elapsed = (now - last_run_at).num_milliseconds() as f64 / 1000.0;
    elapsed.max(MIN_ELAPSED_SECONDS)
}

/// Slow operations per minute, normalized over the actual elapsed window
/// rather than a fixed assumed interval. Pure.
pub fn per_minute_rate(count: usize, last_run_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    count as f64 / (clamped_elapsed_seconds(last_run_at, now) / 60.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_zero_count_is_zero_rate() {
        let now = Utc::now();
        assert_eq!(per_minute_rate(0, now - Duration::seconds(300), now), 0.0);
        assert_eq!(per_minute_rate(0, now, now), 0.0);
    }

    #[test]
    fn test_three_in_thirty_seconds_is_six_per_minute() {
        let now = Utc::now();
        assert_eq!(per_minute_rate(3, now - Duration::seconds(30), now), 6.0);
    }

    #[test]
    fn test_subsecond_window_clamps_to_one_second() {
        let now = Utc::now();
        let rate = per_minute_rate(2, now - Duration::milliseconds(100), now);
        assert_eq!(rate, 120.0);
    }

    #[test]
    fn test_backwards_clock_clamps() {
        let now = Utc::now();
        assert_eq!(clamped_elapsed_seconds(now + Duration::seconds(10), now), 1.0);
    }

    #[test]
    fn test_rate_never_exceeds_count_times_sixty() {
        let now = Utc::now();
        for secs in [0, 1, 5, 60] {
            let rate = per_minute_rate(7, now - Duration::seconds(secs), now);
            assert!(rate <= 7.0 * 60.0);
        }
    }
}
