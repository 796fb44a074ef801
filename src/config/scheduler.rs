//! Event-loop configuration structures.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tunable knobs of the event loop.
///
/// All fields have sensible defaults; a `SchedulerConfig::new()` with no
/// overrides reproduces the stock loop behavior. Deserializes from JSON with
/// every field optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Ceiling in milliseconds on any single blocking sleep. Bounds both the
    /// gap between idle slices and the worst-case cancellation latency.
    #[serde(default = "default_max_sleep_ms")]
    pub max_sleep_ms: u64,
    /// Whether the loop should request elevated scheduling priority on entry.
    /// Elevation failure is logged and non-fatal.
    #[serde(default)]
    pub elevate_priority: bool,
    /// Consecutive busy idle slices before one is promoted to a wide slice.
    /// Fairness bound for housekeeping that only runs on wide slices.
    #[serde(default = "default_wide_promotion_period")]
    pub wide_promotion_period: u32,
}

fn default_max_sleep_ms() -> u64 {
    40
}

fn default_wide_promotion_period() -> u32 {
    2048
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_sleep_ms: default_max_sleep_ms(),
            elevate_priority: false,
            wide_promotion_period: default_wide_promotion_period(),
        }
    }
}

impl SchedulerConfig {
    /// Stock configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the sleep ceiling, in milliseconds.
    #[must_use]
    pub fn with_max_sleep_ms(mut self, max_sleep_ms: u64) -> Self {
        self.max_sleep_ms = max_sleep_ms;
        self
    }

    /// Request priority elevation when the loop starts.
    #[must_use]
    pub fn with_elevated_priority(mut self, elevate: bool) -> Self {
        self.elevate_priority = elevate;
        self
    }

    /// Override the wide-promotion period.
    #[must_use]
    pub fn with_wide_promotion_period(mut self, period: u32) -> Self {
        self.wide_promotion_period = period;
        self
    }

    /// Sleep ceiling as a [`Duration`].
    #[must_use]
    pub fn max_sleep(&self) -> Duration {
        Duration::from_millis(self.max_sleep_ms)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns a description of the first rejected field.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_sleep_ms == 0 {
            return Err("max_sleep_ms must be greater than 0".into());
        }
        if self.wide_promotion_period == 0 {
            return Err("wide_promotion_period must be greater than 0".into());
        }
        Ok(())
    }

    /// Parse a configuration from a JSON string and validate it.
    ///
    /// # Errors
    ///
    /// Returns a description of the parse failure or the first rejected
    /// field.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }
}
