use std::sync::Arc;

/// Receives re-sampled elapsed seconds for rendering.
pub trait DisplaySink: Send + Sync {
    fn show(&self, elapsed_seconds: u64);
}

impl<D: DisplaySink + ?Sized> DisplaySink for Arc<D> {
    fn show(&self, elapsed_seconds: u64) {
        (**self).show(elapsed_seconds)
    }
}

cfg_ticker! {
    use tokio::sync::watch;

    impl DisplaySink for watch::Sender<u64> {
        fn show(&self, elapsed_seconds: u64) {
            // Stores the value even with no receivers attached yet.
            self.send_replace(elapsed_seconds);
        }
    }
}

/// Formats elapsed seconds as `MM:SS`, or `HH:MM:SS` from one hour on.
pub fn format_elapsed(elapsed_seconds: u64) -> String {
    let hours = elapsed_seconds / 3600;
    let minutes = (elapsed_seconds / 60) % 60;
    let seconds = elapsed_seconds % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}
