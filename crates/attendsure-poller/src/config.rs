//! Configuration for call status polling
//!
//! Defines the tick interval and the optional safety limits on a session.

use crate::error::PollerError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for a [`crate::CallStatusPoller`]
///
/// Both limits are unset by default: a session whose call never reaches a
/// terminal status keeps polling until it is cancelled.
///
/// # Examples
///
/// ```
/// use attendsure_poller::PollerConfig;
///
/// // Default configuration (5s interval, unbounded)
/// let config = PollerConfig::default();
/// assert_eq!(config.interval_ms, 5_000);
/// assert!(config.max_attempts.is_none());
///
/// // Faster ticks
/// let config = PollerConfig::aggressive();
/// assert_eq!(config.interval_ms, 2_000);
///
/// // Slower ticks with a one-hour cap
/// let config = PollerConfig::lenient();
/// assert_eq!(config.max_duration_secs, Some(3_600));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollerConfig {
    /// Delay between the end of one fetch and the start of the next (milliseconds)
    /// Default: 5000
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Stop after this many fetch attempts, successful or not
    /// Default: unset (unbounded)
    #[serde(default)]
    pub max_attempts: Option<u64>,

    /// Stop once the session has run this long (seconds)
    /// Default: unset (unbounded)
    #[serde(default)]
    pub max_duration_secs: Option<u64>,
}

fn default_interval_ms() -> u64 {
    5_000
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            max_attempts: None,
            max_duration_secs: None,
        }
    }
}

impl PollerConfig {
    /// Short interval for interactive watching
    ///
    /// - Interval: 2 seconds
    /// - No limits
    pub fn aggressive() -> Self {
        Self {
            interval_ms: 2_000,
            max_attempts: None,
            max_duration_secs: None,
        }
    }

    /// Long interval for background tracking of many calls
    ///
    /// - Interval: 15 seconds
    /// - Gives up after one hour
    pub fn lenient() -> Self {
        Self {
            interval_ms: 15_000,
            max_attempts: None,
            max_duration_secs: Some(3_600),
        }
    }

    /// Set the tick interval
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval_ms = interval.as_millis() as u64;
        self
    }

    /// Cap the number of fetch attempts
    pub fn with_max_attempts(mut self, attempts: u64) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    /// Cap the session duration
    ///
    /// The cap is stored in whole seconds; a fractional duration rounds up,
    /// so a sub-second cap becomes one second rather than zero.
    pub fn with_max_duration(mut self, duration: Duration) -> Self {
        let secs = duration.as_millis().div_ceil(1_000);
        self.max_duration_secs = Some(u64::try_from(secs).unwrap_or(u64::MAX));
        self
    }

    /// Get the tick interval as Duration
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Get the session duration cap as Duration
    pub fn max_duration(&self) -> Option<Duration> {
        self.max_duration_secs.map(Duration::from_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), PollerError> {
        if self.interval_ms == 0 {
            return Err(PollerError::Config(
                "interval_ms must be greater than 0".to_string(),
            ));
        }
        if self.max_attempts == Some(0) {
            return Err(PollerError::Config(
                "max_attempts must be greater than 0 when set".to_string(),
            ));
        }
        if self.max_duration_secs == Some(0) {
            return Err(PollerError::Config(
                "max_duration_secs must be greater than 0 when set".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, PollerError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| PollerError::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, PollerError> {
        toml::to_string_pretty(self)
            .map_err(|e| PollerError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}
