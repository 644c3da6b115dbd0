/// Asserts that a tracker samples to the given number of seconds.
///
/// # Examples
///
/// ```
/// use fomopomo::{ElapsedTracker, NoopSink};
/// use fomopomo_test::{assert_elapsed, clock_at, utc};
///
/// let tracker = ElapsedTracker::new(clock_at(utc(2024, 1, 1, 9, 0, 0)), NoopSink);
/// assert_elapsed!(tracker, 0);
/// ```
#[macro_export]
macro_rules! assert_elapsed {
    ($tracker:expr, $seconds:expr) => {{
        let sampled: u64 = $tracker.sample();
        let expected: u64 = $seconds;
        assert_eq!(
            sampled, expected,
            "tracker sampled {}s, expected {}s",
            sampled, expected
        );
    }};
    ($tracker:expr, $seconds:expr, $($arg:tt)+) => {{
        let sampled: u64 = $tracker.sample();
        let expected: u64 = $seconds;
        assert_eq!(sampled, expected, $($arg)+);
    }};
}

/// Asserts that a tracker is running.
#[macro_export]
macro_rules! assert_running {
    ($tracker:expr) => {{
        assert!($tracker.is_running(), "tracker is paused, expected running");
    }};
}

/// Asserts that a tracker is paused.
#[macro_export]
macro_rules! assert_paused {
    ($tracker:expr) => {{
        assert!(!$tracker.is_running(), "tracker is running, expected paused");
    }};
}
