//! Source of wall-clock time.
//!
//! By default, [`SystemClock`] is used, which reads `Utc::now()`. When the
//! `test-util` feature flag is enabled, [`ManualClock`] provides a clock whose
//! value only changes when a test tells it to.

use std::sync::Arc;

use chrono::{DateTime, Utc};

/// A source of the current wall-clock instant.
///
/// Both the tracker and any caller computing logical days take one of these
/// so that tests can pin time down.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// The host's real-time clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

cfg_test_util! {
    use std::time::Duration;

    use chrono::TimeDelta;
    use parking_lot::Mutex;

    /// A handle to a clock that only moves when told to.
    ///
    /// Clones share the same underlying instant, so a test can keep one
    /// handle while the tracker owns another.
    #[derive(Debug, Clone)]
    pub struct ManualClock {
        inner: Arc<Mutex<Inner>>,
    }

    #[derive(Debug)]
    struct Inner {
        now: DateTime<Utc>,
    }

    impl ManualClock {
        /// Returns a clock frozen at `start`.
        pub fn new(start: DateTime<Utc>) -> ManualClock {
            ManualClock {
                inner: Arc::new(Mutex::new(Inner { now: start })),
            }
        }

        /// Moves the clock forward by `duration`.
        ///
        /// # Panics
        ///
        /// Panics if the resulting instant is out of range.
        pub fn advance(&self, duration: Duration) {
            let delta = to_delta(duration);
            let mut inner = self.inner.lock();
            inner.now = inner
                .now
                .checked_add_signed(delta)
                .expect("manual clock advanced out of range");
        }

        /// Moves the clock backward by `duration`, the way a host clock
        /// adjustment would.
        ///
        /// # Panics
        ///
        /// Panics if the resulting instant is out of range.
        pub fn rewind(&self, duration: Duration) {
            let delta = to_delta(duration);
            let mut inner = self.inner.lock();
            inner.now = inner
                .now
                .checked_sub_signed(delta)
                .expect("manual clock rewound out of range");
        }

        /// Jumps the clock to `instant`.
        pub fn set(&self, instant: DateTime<Utc>) {
            self.inner.lock().now = instant;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            self.inner.lock().now
        }
    }

    fn to_delta(duration: Duration) -> TimeDelta {
        TimeDelta::from_std(duration).expect("duration out of range for a manual clock")
    }
}
