//! Drift-free elapsed-time tracking.
//!
//! A naive stopwatch adds the refresh interval to a counter on every tick,
//! which falls behind whenever the host throttles or delays those ticks. The
//! tracker here stores an anchor instant instead: while running, elapsed
//! time is `now - anchor`, recomputed on every [`ElapsedTracker::sample`].
//! Pausing folds the running span into `accumulated_seconds`, and resuming
//! places a fresh anchor `accumulated_seconds` before `now`.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::error::TrackerError;
use crate::status::{StatusSink, StatusUpdate};

/// A tracker shared between its owner and a ticker task.
pub type SharedTracker<C, S> = Arc<Mutex<ElapsedTracker<C, S>>>;

/// A point-in-time copy of a tracker's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElapsedTimerState {
    /// Total elapsed seconds at the last pause, or at start.
    pub accumulated_seconds: u64,
    pub running: bool,
    /// Set while running.
    pub anchor: Option<DateTime<Utc>>,
    pub task_label: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Paused,
    Running { anchor: DateTime<Utc> },
}

/// A running or paused elapsed-seconds counter.
///
/// Not safe for concurrent mutation; wrap it in a [`SharedTracker`] to hand
/// read access to a ticker. Independent sessions each need their own
/// tracker.
#[derive(Debug)]
pub struct ElapsedTracker<C, S> {
    clock: C,
    sink: S,
    accumulated_seconds: u64,
    phase: Phase,
    task_label: Option<String>,
}

impl<C: Clock, S: StatusSink> ElapsedTracker<C, S> {
    /// Creates a paused tracker at zero.
    pub fn new(clock: C, sink: S) -> ElapsedTracker<C, S> {
        ElapsedTracker {
            clock,
            sink,
            accumulated_seconds: 0,
            phase: Phase::Paused,
            task_label: None,
        }
    }

    /// Starts or resumes the tracker and returns the new anchor instant.
    ///
    /// Publishes [`Status::Studying`](crate::Status::Studying) with the
    /// anchor as the start instant.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::AlreadyRunning`] if the tracker is running.
    pub fn start(&mut self) -> Result<DateTime<Utc>, TrackerError> {
        if let Phase::Running { .. } = self.phase {
            return Err(TrackerError::AlreadyRunning);
        }

        let now = self.clock.now();
        let anchor = seconds_before(now, self.accumulated_seconds);
        self.phase = Phase::Running { anchor };
        debug!(
            %anchor,
            accumulated_seconds = self.accumulated_seconds,
            "tracker started"
        );

        self.sink
            .publish(StatusUpdate::studying(self.task_label.clone(), anchor));
        Ok(anchor)
    }

    /// Pauses the tracker and returns the elapsed seconds it committed.
    ///
    /// Publishes [`Status::Paused`](crate::Status::Paused) with that value.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotRunning`] if the tracker is paused.
    pub fn pause(&mut self) -> Result<u64, TrackerError> {
        let Phase::Running { anchor } = self.phase else {
            return Err(TrackerError::NotRunning);
        };

        let elapsed = elapsed_since(anchor, self.clock.now());
        self.accumulated_seconds = elapsed;
        self.phase = Phase::Paused;
        debug!(elapsed_seconds = elapsed, "tracker paused");

        self.sink
            .publish(StatusUpdate::paused(self.task_label.clone(), elapsed));
        Ok(elapsed)
    }

    /// Returns the current elapsed seconds.
    ///
    /// While running this is `now - anchor`, clamped to zero; while paused
    /// it is the committed value. Has no side effects.
    pub fn sample(&self) -> u64 {
        match self.phase {
            Phase::Running { anchor } => elapsed_since(anchor, self.clock.now()),
            Phase::Paused => self.accumulated_seconds,
        }
    }

    /// [`sample`](Self::sample) as a `Duration`.
    pub fn elapsed(&self) -> Duration {
        Duration::from_secs(self.sample())
    }

    /// Stops the tracker and clears it back to zero.
    pub fn reset(&mut self) {
        self.phase = Phase::Paused;
        self.accumulated_seconds = 0;
        debug!("tracker reset");
    }

    /// Rehydrates a paused tracker with previously persisted elapsed time,
    /// so the next [`start`](Self::start) resumes from it.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::AlreadyRunning`] if the tracker is running.
    pub fn restore(&mut self, accumulated_seconds: u64) -> Result<(), TrackerError> {
        if let Phase::Running { .. } = self.phase {
            return Err(TrackerError::AlreadyRunning);
        }
        self.accumulated_seconds = accumulated_seconds;
        debug!(accumulated_seconds, "tracker restored");
        Ok(())
    }

    /// Sets the label sent to the status sink with later updates.
    pub fn set_task_label(&mut self, label: Option<String>) {
        self.task_label = label;
    }

    pub fn task_label(&self) -> Option<&str> {
        self.task_label.as_deref()
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    /// The anchor instant, if running.
    pub fn anchor(&self) -> Option<DateTime<Utc>> {
        match self.phase {
            Phase::Running { anchor } => Some(anchor),
            Phase::Paused => None,
        }
    }

    pub fn state(&self) -> ElapsedTimerState {
        ElapsedTimerState {
            accumulated_seconds: self.accumulated_seconds,
            running: self.is_running(),
            anchor: self.anchor(),
            task_label: self.task_label.clone(),
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Wraps the tracker for sharing with a ticker.
    pub fn into_shared(self) -> SharedTracker<C, S> {
        Arc::new(Mutex::new(self))
    }
}

fn seconds_before(now: DateTime<Utc>, seconds: u64) -> DateTime<Utc> {
    i64::try_from(seconds)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .and_then(|delta| now.checked_sub_signed(delta))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

fn elapsed_since(anchor: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let seconds = now.signed_duration_since(anchor).num_seconds();
    u64::try_from(seconds).unwrap_or_else(|_| {
        warn!(%anchor, %now, "clock moved behind the anchor instant, clamping to zero");
        0
    })
}
