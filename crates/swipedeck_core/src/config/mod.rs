//! Deck configuration loading and validation.
//!
//! # Responsibility
//! - Define the per-deck tuning knobs (thresholds, axes, exit delay).
//! - Load them from JSON text or files with every field defaulted.
//!
//! # Invariants
//! - A validated config has finite, strictly positive thresholds.
//! - Missing fields fall back to the documented defaults.

use crate::gesture::classifier::{SwipeAxes, SwipeThresholds};
use log::{error, info};
use serde::{Deserialize, Serialize};
use serde_json::map::Entry;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::time::{Duration, Instant};

/// Default exit-animation delay before the presentation layer calls
/// `complete_exit`.
pub const DEFAULT_EXIT_DELAY_MS: u64 = 300;

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Tuning knobs for one deck screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    pub thresholds: SwipeThresholds,
    /// When `false` the deck is left/right only and `SkipUp` is refused.
    pub skip_enabled: bool,
    pub exit_delay_ms: u64,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            thresholds: SwipeThresholds::default(),
            skip_enabled: true,
            exit_delay_ms: DEFAULT_EXIT_DELAY_MS,
        }
    }
}

impl DeckConfig {
    /// Company-side candidate deck: horizontal only.
    pub fn candidate_deck() -> Self {
        Self {
            skip_enabled: false,
            ..Self::default()
        }
    }

    /// Student-side job deck: up, left and right.
    pub fn job_deck() -> Self {
        Self::default()
    }

    pub fn axes(&self) -> SwipeAxes {
        if self.skip_enabled {
            SwipeAxes::HorizontalAndVertical
        } else {
            SwipeAxes::HorizontalOnly
        }
    }

    pub fn exit_delay(&self) -> Duration {
        Duration::from_millis(self.exit_delay_ms)
    }

    /// Validates threshold values.
    pub fn validate(&self) -> ConfigResult<()> {
        check_threshold("distance_threshold", self.thresholds.distance_threshold)?;
        check_threshold("velocity_threshold", self.thresholds.velocity_threshold)?;
        Ok(())
    }

    /// Parses and validates a JSON config document.
    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Applies the fields present in a JSON document on top of `self`.
    ///
    /// Absent fields keep this config's values rather than the global
    /// defaults, so presets survive partial overrides.
    pub fn overlay_json(&self, raw: &str) -> ConfigResult<Self> {
        let mut base = serde_json::to_value(self)?;
        let overrides: serde_json::Value = serde_json::from_str(raw)?;
        merge_json(&mut base, overrides);
        let config: Self = serde_json::from_value(base)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    ///
    /// # Side effects
    /// - Emits `config_load` logging events with duration and status.
    pub fn load_from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let started_at = Instant::now();
        info!("event=config_load module=config status=start");

        let result = std::fs::read_to_string(path.as_ref())
            .map_err(ConfigError::from)
            .and_then(|raw| Self::from_json_str(&raw));

        match &result {
            Ok(config) => info!(
                "event=config_load module=config status=ok duration_ms={} skip_enabled={} distance={} velocity={}",
                started_at.elapsed().as_millis(),
                config.skip_enabled,
                config.thresholds.distance_threshold,
                config.thresholds.velocity_threshold
            ),
            Err(err) => error!(
                "event=config_load module=config status=error duration_ms={} error_code={} error={}",
                started_at.elapsed().as_millis(),
                err.code(),
                err
            ),
        }
        result
    }
}

fn merge_json(base: &mut serde_json::Value, overrides: serde_json::Value) {
    match (base, overrides) {
        (serde_json::Value::Object(base), serde_json::Value::Object(overrides)) => {
            for (key, value) in overrides {
                match base.entry(key) {
                    Entry::Occupied(mut slot) => merge_json(slot.get_mut(), value),
                    Entry::Vacant(slot) => {
                        slot.insert(value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

fn check_threshold(field: &'static str, value: f64) -> ConfigResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::InvalidThreshold { field, value });
    }
    Ok(())
}

/// Configuration loading and validation errors.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    InvalidThreshold { field: &'static str, value: f64 },
}

impl ConfigError {
    /// Stable error code used in log events and FFI messages.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "config_io_failed",
            Self::Parse(_) => "config_parse_failed",
            Self::InvalidThreshold { .. } => "config_invalid_threshold",
        }
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read deck config: {err}"),
            Self::Parse(err) => write!(f, "failed to parse deck config: {err}"),
            Self::InvalidThreshold { field, value } => {
                write!(f, "{field} must be a finite value > 0, got {value}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::InvalidThreshold { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}
