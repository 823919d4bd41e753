//! Configuration management for the `TravelRecs` application
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::TravelRecsError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure for the `TravelRecs` application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelRecsConfig {
    /// Dataset source configuration
    pub data: DataConfig,
    /// Result card configuration
    pub display: DisplayConfig,
    /// Clock configuration
    pub clock: ClockConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Where the recommendation dataset comes from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// File path or http(s) URL of the dataset document
    #[serde(default = "default_data_source")]
    pub source: String,
    /// Fetch timeout in seconds
    #[serde(default = "default_data_timeout")]
    pub timeout_seconds: u32,
}

/// Result card settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Maximum number of cards shown per search
    #[serde(default = "default_max_cards")]
    pub max_cards: usize,
    /// Minimum number of cards shown when at least that many results exist
    #[serde(default = "default_min_cards")]
    pub min_cards: usize,
    /// Image shown on cards whose place has none
    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,
}

/// Clock settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Refresh interval in milliseconds
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_data_source() -> String {
    "data/travel_recommendation.json".to_string()
}

fn default_data_timeout() -> u32 {
    30
}

fn default_max_cards() -> usize {
    6
}

fn default_min_cards() -> usize {
    2
}

fn default_placeholder_image() -> String {
    "images/placeholder.jpg".to_string()
}

fn default_tick_millis() -> u64 {
    1000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: default_data_source(),
            timeout_seconds: default_data_timeout(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_cards: default_max_cards(),
            min_cards: default_min_cards(),
            placeholder_image: default_placeholder_image(),
        }
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            tick_millis: default_tick_millis(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl DataConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.timeout_seconds))
    }
}

impl ClockConfig {
    #[must_use]
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }
}

impl TravelRecsConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.or_else(|| {
            Self::get_config_path()
                .filter(|p| p.exists())
                .or_else(|| Some(PathBuf::from("config/default.toml")))
        });

        if let Some(config_file) = config_file.filter(|p| p.exists()) {
            builder = builder.add_source(
                File::from(config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment variable overrides, e.g. TRAVELRECS_DATA__SOURCE
        builder = builder.add_source(
            Environment::with_prefix("TRAVELRECS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TravelRecsConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("travelrecs").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.data.source.trim().is_empty() {
            self.data.source = default_data_source();
        }
        if self.data.timeout_seconds == 0 {
            self.data.timeout_seconds = default_data_timeout();
        }
        if self.display.max_cards == 0 {
            self.display.max_cards = default_max_cards();
        }
        if self.display.min_cards == 0 {
            self.display.min_cards = default_min_cards();
        }
        if self.display.placeholder_image.trim().is_empty() {
            self.display.placeholder_image = default_placeholder_image();
        }
        if self.clock.tick_millis == 0 {
            self.clock.tick_millis = default_tick_millis();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.data.timeout_seconds > 300 {
            return Err(
                TravelRecsError::config("Dataset timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.display.max_cards > 50 {
            return Err(TravelRecsError::config("Maximum cards cannot exceed 50").into());
        }

        if self.display.min_cards > self.display.max_cards {
            return Err(TravelRecsError::config(format!(
                "Minimum cards ({}) cannot exceed maximum cards ({})",
                self.display.min_cards, self.display.max_cards
            ))
            .into());
        }

        if !(100..=60_000).contains(&self.clock.tick_millis) {
            return Err(TravelRecsError::config(
                "Clock tick must be between 100 and 60000 milliseconds",
            )
            .into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TravelRecsError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TravelRecsError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}
