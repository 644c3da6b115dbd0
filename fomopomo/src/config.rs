//! Timer configuration.
//!
//! ```toml
//! tick-interval-ms = 200
//! reset-hour = 5
//! publish-unchanged = false
//! ```

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::day::{DayBoundary, RESET_HOUR};
use crate::error::ConfigError;

const DEFAULT_TICK_INTERVAL_MS: u64 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct TimerConfig {
    /// How often the ticker re-samples the tracker for display.
    pub tick_interval_ms: u64,
    /// Local hour at which a new logical day begins.
    pub reset_hour: u32,
    /// Push every sample to the display, not only changed values.
    pub publish_unchanged: bool,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            reset_hour: RESET_HOUR,
            publish_unchanged: false,
        }
    }
}

impl TimerConfig {
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Parses and validates a TOML document. Missing keys take defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: TimerConfig = toml::from_str(contents)?;
        config.validate()?;
        debug!(?config, "loaded timer config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        DayBoundary::with_reset_hour(self.reset_hour)?;
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn day_boundary(&self) -> Result<DayBoundary, ConfigError> {
        DayBoundary::with_reset_hour(self.reset_hour)
    }
}

/// Builds a validated [`TimerConfig`].
#[derive(Debug, Default)]
pub struct Builder {
    config: TimerConfig,
}

impl Builder {
    pub fn new() -> Builder {
        Builder::default()
    }

    pub fn tick_interval(&mut self, interval: Duration) -> &mut Self {
        self.config.tick_interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn reset_hour(&mut self, hour: u32) -> &mut Self {
        self.config.reset_hour = hour;
        self
    }

    pub fn publish_unchanged(&mut self, enabled: bool) -> &mut Self {
        self.config.publish_unchanged = enabled;
        self
    }

    pub fn build(&self) -> Result<TimerConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
