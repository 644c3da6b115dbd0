//! Status updates published by the tracker on every start and pause.
//!
//! Delivery is synchronous and fire-and-forget: the tracker never retries
//! or buffers, so a sink that talks to a remote service owns its own
//! failure handling.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Studying,
    Paused,
}

/// A single status change.
///
/// `started_at` is only set for [`Status::Studying`] and `elapsed_seconds`
/// only for [`Status::Paused`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_task: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_seconds: Option<u64>,
}

impl StatusUpdate {
    pub fn studying(current_task: Option<String>, started_at: DateTime<Utc>) -> StatusUpdate {
        StatusUpdate {
            status: Status::Studying,
            current_task,
            started_at: Some(started_at),
            elapsed_seconds: None,
        }
    }

    pub fn paused(current_task: Option<String>, elapsed_seconds: u64) -> StatusUpdate {
        StatusUpdate {
            status: Status::Paused,
            current_task,
            started_at: None,
            elapsed_seconds: Some(elapsed_seconds),
        }
    }

    /// The start instant as an ISO-8601 string with millisecond precision.
    pub fn started_at_iso(&self) -> Option<String> {
        self.started_at
            .map(|started_at| started_at.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

/// Receives the tracker's studying/paused notifications.
#[cfg_attr(test, mockall::automock)]
pub trait StatusSink: Send + Sync {
    fn publish(&self, update: StatusUpdate);
}

impl<S: StatusSink + ?Sized> StatusSink for Arc<S> {
    fn publish(&self, update: StatusUpdate) {
        (**self).publish(update)
    }
}

impl<S: StatusSink + ?Sized> StatusSink for &S {
    fn publish(&self, update: StatusUpdate) {
        (**self).publish(update)
    }
}

/// Discards every update.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl StatusSink for NoopSink {
    fn publish(&self, _update: StatusUpdate) {}
}

/// Logs every update as a `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl StatusSink for TracingSink {
    fn publish(&self, update: StatusUpdate) {
        info!(
            status = ?update.status,
            task = update.current_task.as_deref().unwrap_or("-"),
            started_at = update.started_at_iso().as_deref().unwrap_or("-"),
            elapsed_seconds = update.elapsed_seconds,
            "focus status changed"
        );
    }
}

/// Adapts a closure into a [`StatusSink`].
pub struct FnSink<F>(F);

/// Creates a [`StatusSink`] that forwards every update to `f`.
pub fn from_fn<F>(f: F) -> FnSink<F>
where
    F: Fn(StatusUpdate) + Send + Sync,
{
    FnSink(f)
}

impl<F> StatusSink for FnSink<F>
where
    F: Fn(StatusUpdate) + Send + Sync,
{
    fn publish(&self, update: StatusUpdate) {
        (self.0)(update)
    }
}
