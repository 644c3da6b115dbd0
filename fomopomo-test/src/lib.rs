//! Fomopomo testing utilities.
//!
//! - [`ManualClock`] pins wall-clock time down.
//! - [`RecordingSink`] and [`RecordingDisplay`] capture what a tracker and a
//!   ticker emit.
//! - [`zone::SingleTransitionZone`] is a time zone with one daylight-saving
//!   jump, for checking logical days across DST without a zone database.

use chrono::{DateTime, TimeZone, Utc};

pub use fomopomo::ManualClock;

mod macros;
mod sink;
pub mod zone;

pub use sink::{RecordingDisplay, RecordingSink};

/// Installs a `tracing` subscriber that writes through the test harness.
///
/// Filtering follows `RUST_LOG`. Safe to call from every test; only the
/// first call installs anything.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A UTC instant, for terse fixtures.
///
/// # Panics
///
/// Panics if the fields do not form a valid date and time.
pub fn utc(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
        .single()
        .expect("invalid UTC fixture")
}

/// A [`ManualClock`] frozen at `start`.
pub fn clock_at(start: DateTime<Utc>) -> ManualClock {
    ManualClock::new(start)
}
