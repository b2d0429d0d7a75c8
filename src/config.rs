//! Game configuration loaded from TOML.

use crate::games::pairs::{DeckSource, SessionRules, ShuffledDecks, StarPolicy, Symbol};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Tuning values for a game.
///
/// Every field has a default, so an empty file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// How long a mismatched pair stays face up, in milliseconds.
    #[serde(default = "default_mismatch_delay_ms")]
    mismatch_delay_ms: u64,

    /// Clock sampling interval in milliseconds.
    #[serde(default = "default_clock_tick_ms")]
    clock_tick_ms: u64,

    /// Move counts at which a star is lost.
    #[serde(default = "default_star_thresholds")]
    star_thresholds: Vec<u32>,

    /// Stars at the start of a game.
    #[serde(default = "default_max_stars")]
    max_stars: u8,

    /// Shuffle seed. Unset means a fresh random deal every time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
}

fn default_mismatch_delay_ms() -> u64 {
    800
}

fn default_clock_tick_ms() -> u64 {
    10
}

fn default_star_thresholds() -> Vec<u32> {
    vec![13, 25]
}

fn default_max_stars() -> u8 {
    3
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mismatch_delay_ms: default_mismatch_delay_ms(),
            clock_tick_ms: default_clock_tick_ms(),
            star_thresholds: default_star_thresholds(),
            max_stars: default_max_stars(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Loads and validates configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(seed = ?config.seed, "Config loaded successfully");
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads from `path` if it exists, otherwise falls back to defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Overrides the shuffle seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    /// Checks value ranges.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mismatch_delay_ms == 0 {
            return Err(ConfigError::new("mismatch_delay_ms must be positive".to_string()));
        }
        if self.clock_tick_ms == 0 {
            return Err(ConfigError::new("clock_tick_ms must be positive".to_string()));
        }
        if self.star_thresholds.contains(&0) {
            return Err(ConfigError::new("star thresholds must be positive".to_string()));
        }
        if self.star_thresholds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ConfigError::new(
                "star thresholds must be strictly increasing".to_string(),
            ));
        }
        Ok(())
    }

    /// Session tuning derived from this configuration.
    pub fn rules(&self) -> SessionRules {
        SessionRules::new(
            Duration::from_millis(self.mismatch_delay_ms),
            Duration::from_millis(self.clock_tick_ms),
            StarPolicy::new(self.star_thresholds.clone(), self.max_stars),
        )
    }

    /// Dealer for the full alphabet using the configured seed.
    pub fn deck_source(&self) -> Box<dyn DeckSource> {
        Box::new(ShuffledDecks::new(Symbol::alphabet(), self.seed))
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::new(format!("Failed to serialize config: {}", e)))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
