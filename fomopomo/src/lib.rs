#![cfg_attr(docsrs, feature(doc_cfg))]

//! Focus-time core for the Fomopomo Pomodoro timer.
//!
//! Two independent pieces live here:
//!
//! - [`ElapsedTracker`], a running/paused elapsed-seconds counter. While
//!   running, the value is recomputed from a fixed anchor instant on every
//!   [`sample`](ElapsedTracker::sample), so throttled or skipped refresh
//!   ticks never make it drift.
//! - [`day`], which maps timestamps onto logical days that begin at 05:00
//!   local time instead of midnight.
//!
//! With the `ticker` feature (on by default) a small tokio task can
//! re-sample a shared tracker at a fixed interval and push the value to a
//! [`DisplaySink`].
//!
//! ```
//! use fomopomo::{ElapsedTracker, NoopSink, SystemClock};
//!
//! let mut tracker = ElapsedTracker::new(SystemClock, NoopSink);
//! tracker.start().unwrap();
//! assert!(tracker.is_running());
//! let elapsed = tracker.pause().unwrap();
//! assert_eq!(tracker.sample(), elapsed);
//! ```

#[macro_use]
mod macros;

pub mod clock;
pub mod config;
pub mod day;
pub mod display;
pub mod error;
pub mod status;
pub mod tracker;

cfg_ticker! {
    pub mod ticker;
}

pub use clock::{Clock, SystemClock};
pub use config::TimerConfig;
pub use day::{DayBoundary, LogicalDay, RESET_HOUR};
pub use display::{format_elapsed, DisplaySink};
pub use error::{ConfigError, TrackerError};
pub use status::{NoopSink, Status, StatusSink, StatusUpdate, TracingSink};
pub use tracker::{ElapsedTimerState, ElapsedTracker, SharedTracker};

cfg_test_util! {
    pub use clock::ManualClock;
}

cfg_ticker! {
    pub use error::TickerError;
}
