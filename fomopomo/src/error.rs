use thiserror::Error;

/// An invalid tracker transition.
///
/// The tracker's state is left untouched and the status sink is not
/// notified when one of these is returned, so callers that want no-op
/// semantics can simply discard it.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TrackerError {
    #[error("tracker is already running")]
    AlreadyRunning,
    #[error("tracker is not running")]
    NotRunning,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse timer config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("reset hour must be between 0 and 23, got {0}")]
    InvalidResetHour(u32),
    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,
}

cfg_ticker! {
    use tokio::task::JoinError;

    /// The ticker task failed to execute to completion.
    #[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
    pub enum TickerError {
        #[error("ticker task was cancelled")]
        Cancelled,
        #[error("ticker task panicked")]
        Panicked,
    }

    impl From<JoinError> for TickerError {
        fn from(src: JoinError) -> TickerError {
            if src.is_cancelled() {
                TickerError::Cancelled
            } else {
                TickerError::Panicked
            }
        }
    }
}
