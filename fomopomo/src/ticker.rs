//! Periodic display refresh.
//!
//! The ticker only decides *when* to look at the tracker. Each tick locks the
//! shared tracker, takes a [`sample`](crate::ElapsedTracker::sample) and
//! hands it to a [`DisplaySink`]. Correctness lives entirely in the
//! tracker's anchor arithmetic, so late or skipped ticks cost nothing but
//! refresh latency.

use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::clock::Clock;
use crate::config::TimerConfig;
use crate::display::DisplaySink;
use crate::error::{ConfigError, TickerError};
use crate::status::StatusSink;
use crate::tracker::SharedTracker;

/// Spawns a ticker for `tracker` on the current tokio runtime.
///
/// The task runs until the returned handle is shut down or dropped.
///
/// # Errors
///
/// Returns the validation error if `config` is invalid; no task is spawned.
///
/// # Panics
///
/// Panics if called from outside of a tokio runtime.
pub fn spawn<C, S, D>(
    tracker: SharedTracker<C, S>,
    display: D,
    config: &TimerConfig,
) -> Result<TickerHandle, ConfigError>
where
    C: Clock + 'static,
    S: StatusSink + 'static,
    D: DisplaySink + 'static,
{
    config.validate()?;

    let token = CancellationToken::new();
    let task = tokio::spawn(run(tracker, display, *config, token.clone()));
    debug!(interval = ?config.tick_interval(), "ticker spawned");

    Ok(TickerHandle {
        token,
        task: Some(task),
    })
}

async fn run<C, S, D>(
    tracker: SharedTracker<C, S>,
    display: D,
    config: TimerConfig,
    token: CancellationToken,
) where
    C: Clock,
    S: StatusSink,
    D: DisplaySink,
{
    let mut interval = time::interval(config.tick_interval());
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last_shown = None;

    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            _ = interval.tick() => {
                let elapsed = tracker.lock().sample();
                if config.publish_unchanged || last_shown != Some(elapsed) {
                    trace!(elapsed_seconds = elapsed, "refreshing display");
                    display.show(elapsed);
                    last_shown = Some(elapsed);
                }
            }
        }
    }

    debug!("ticker stopped");
}

/// Owns a running ticker task. Dropping the handle cancels the task.
#[derive(Debug)]
pub struct TickerHandle {
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl TickerHandle {
    /// A token that stops the ticker when cancelled, e.g. on teardown of the
    /// view that owns it.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Cancels the ticker and waits for it to exit.
    pub async fn shutdown(mut self) -> Result<(), TickerError> {
        self.token.cancel();
        match self.task.take() {
            Some(task) => task.await.map_err(TickerError::from),
            None => Ok(()),
        }
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::{TimeZone, Utc};
    use tokio::sync::watch;

    use super::*;
    use crate::clock::ManualClock;
    use crate::status::NoopSink;
    use crate::tracker::ElapsedTracker;

    fn shared() -> (ManualClock, SharedTracker<ManualClock, NoopSink>) {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap());
        let tracker = ElapsedTracker::new(clock.clone(), NoopSink).into_shared();
        (clock, tracker)
    }

    #[tokio::test(start_paused = true)]
    async fn pushes_running_samples() {
        let (clock, tracker) = shared();
        tracker.lock().start().unwrap();
        let (tx, mut rx) = watch::channel(u64::MAX);
        let handle = spawn(tracker.clone(), tx, &TimerConfig::default()).unwrap();

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), 0);

        clock.advance(Duration::from_secs(3));
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), 3);

        handle.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_ticks_do_not_drift() {
        let (clock, tracker) = shared();
        tracker.lock().start().unwrap();
        let (tx, mut rx) = watch::channel(u64::MAX);
        let handle = spawn(tracker.clone(), tx, &TimerConfig::default()).unwrap();
        rx.changed().await.unwrap();

        // Ten minutes of wall time pass while the runtime only sees one tick.
        clock.advance(Duration::from_secs(600));
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), 600);

        handle.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn skips_unchanged_values() {
        let (_, tracker) = shared();
        let (tx, mut rx) = watch::channel(u64::MAX);
        let handle = spawn(tracker, tx, &TimerConfig::default()).unwrap();

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), 0);

        time::sleep(Duration::from_secs(2)).await;
        assert!(!rx.has_changed().unwrap());

        handle.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn publishes_unchanged_when_configured() {
        let (_, tracker) = shared();
        let (tx, mut rx) = watch::channel(u64::MAX);
        let config = TimerConfig::builder().publish_unchanged(true).build().unwrap();
        let handle = spawn(tracker, tx, &config).unwrap();

        rx.changed().await.unwrap();
        rx.borrow_and_update();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), 0);

        handle.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn rejects_zero_tick_interval() {
        let (_, tracker) = shared();
        let (tx, rx) = watch::channel(u64::MAX);
        let config = TimerConfig {
            tick_interval_ms: 0,
            ..Default::default()
        };

        let result = spawn(tracker, tx, &config);
        assert!(matches!(result, Err(ConfigError::ZeroTickInterval)));
        // Nothing was spawned, so the sender is already gone.
        assert!(rx.has_changed().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_stops_the_task() {
        let (_, tracker) = shared();
        let (tx, mut rx) = watch::channel(u64::MAX);
        let handle = spawn(tracker, tx, &TimerConfig::default()).unwrap();
        rx.changed().await.unwrap();

        let token = handle.cancellation_token();
        drop(handle);
        assert!(token.is_cancelled());

        // The sender lives in the task, so the channel closes once it exits.
        while rx.changed().await.is_ok() {}
    }
}
