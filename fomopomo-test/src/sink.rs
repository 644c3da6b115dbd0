use std::sync::Arc;

use fomopomo::{DisplaySink, Status, StatusSink, StatusUpdate};
use parking_lot::Mutex;

/// Records every status update. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    updates: Arc<Mutex<Vec<StatusUpdate>>>,
}

impl RecordingSink {
    pub fn new() -> RecordingSink {
        RecordingSink::default()
    }

    pub fn updates(&self) -> Vec<StatusUpdate> {
        self.updates.lock().clone()
    }

    pub fn statuses(&self) -> Vec<Status> {
        self.updates.lock().iter().map(|u| u.status).collect()
    }

    pub fn last(&self) -> Option<StatusUpdate> {
        self.updates.lock().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.updates.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.updates.lock().is_empty()
    }

    pub fn clear(&self) {
        self.updates.lock().clear();
    }
}

impl StatusSink for RecordingSink {
    fn publish(&self, update: StatusUpdate) {
        self.updates.lock().push(update);
    }
}

/// Records every value a ticker shows. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingDisplay {
    shown: Arc<Mutex<Vec<u64>>>,
}

impl RecordingDisplay {
    pub fn new() -> RecordingDisplay {
        RecordingDisplay::default()
    }

    pub fn shown(&self) -> Vec<u64> {
        self.shown.lock().clone()
    }

    pub fn last(&self) -> Option<u64> {
        self.shown.lock().last().copied()
    }
}

impl DisplaySink for RecordingDisplay {
    fn show(&self, elapsed_seconds: u64) {
        self.shown.lock().push(elapsed_seconds);
    }
}
