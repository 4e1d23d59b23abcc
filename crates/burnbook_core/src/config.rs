//! Runtime configuration for a BurnBook session.
//!
//! # Responsibility
//! - Hold timing and limit constants used by the lifecycle and disposal flow.
//! - Load overrides from environment variables or JSON supplied by the UI.
//!
//! # Invariants
//! - A validated config never has a zero countdown, tick interval, or limit.

use crate::model::note::MAX_NOTE_CHARS;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_COUNTDOWN_SECONDS: u32 = 30;
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1_000;
pub const DEFAULT_BURN_ANIMATION_MS: u64 = 1_500;

const ENV_COUNTDOWN_SECONDS: &str = "BURNBOOK_COUNTDOWN_SECONDS";
const ENV_BURN_ANIMATION_MS: &str = "BURNBOOK_BURN_ANIMATION_MS";
const ENV_MAX_NOTE_CHARS: &str = "BURNBOOK_MAX_NOTE_CHARS";
const ENV_SAVE_ENABLED: &str = "BURNBOOK_SAVE_ENABLED";

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A numeric field must be positive.
    ZeroValue(&'static str),
    /// `max_note_chars` is above the hard note limit.
    NoteLimitTooLarge { requested: usize, max: usize },
    /// An environment override could not be parsed.
    InvalidEnv { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroValue(field) => write!(f, "config field `{field}` must be greater than 0"),
            Self::NoteLimitTooLarge { requested, max } => write!(
                f,
                "max_note_chars {requested} exceeds the note limit of {max}"
            ),
            Self::InvalidEnv { key, value } => {
                write!(f, "environment variable {key} has invalid value `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

/// Session timing and limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurnBookConfig {
    /// Seconds from the first non-empty edit to auto-seal.
    pub countdown_seconds: u32,
    /// Interval of the countdown tick task.
    pub tick_interval_ms: u64,
    /// Duration of the burn animation gating removal.
    pub burn_animation_ms: u64,
    /// Draft length limit in Unicode scalar values.
    pub max_note_chars: usize,
    /// Whether the save zone exists.
    pub save_enabled: bool,
}

impl Default for BurnBookConfig {
    fn default() -> Self {
        Self {
            countdown_seconds: DEFAULT_COUNTDOWN_SECONDS,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            burn_animation_ms: DEFAULT_BURN_ANIMATION_MS,
            max_note_chars: MAX_NOTE_CHARS,
            save_enabled: true,
        }
    }
}

impl BurnBookConfig {
    /// Defaults overlaid with `BURNBOOK_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from `lookup`, then validated.
    ///
    /// Blank values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let read = |key: &'static str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(value) = read(ENV_COUNTDOWN_SECONDS) {
            config.countdown_seconds = parse_env(ENV_COUNTDOWN_SECONDS, value)?;
        }
        if let Some(value) = read(ENV_BURN_ANIMATION_MS) {
            config.burn_animation_ms = parse_env(ENV_BURN_ANIMATION_MS, value)?;
        }
        if let Some(value) = read(ENV_MAX_NOTE_CHARS) {
            config.max_note_chars = parse_env(ENV_MAX_NOTE_CHARS, value)?;
        }
        if let Some(value) = read(ENV_SAVE_ENABLED) {
            config.save_enabled = match value.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        key: ENV_SAVE_ENABLED,
                        value,
                    })
                }
            };
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks field ranges.
    ///
    /// A zero `burn_animation_ms` is allowed and completes the burn on the
    /// next `advance_by` call.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.countdown_seconds == 0 {
            return Err(ConfigError::ZeroValue("countdown_seconds"));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroValue("tick_interval_ms"));
        }
        if self.max_note_chars == 0 {
            return Err(ConfigError::ZeroValue("max_note_chars"));
        }
        if self.max_note_chars > MAX_NOTE_CHARS {
            return Err(ConfigError::NoteLimitTooLarge {
                requested: self.max_note_chars,
                max: MAX_NOTE_CHARS,
            });
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .parse::<T>()
        .map_err(|_| ConfigError::InvalidEnv { key, value })
}
