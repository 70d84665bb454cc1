//! Configuration management for `fairday`
//!
//! Handles loading configuration from a TOML file and environment variables,
//! and provides validation for all configuration settings.

use crate::FairdayError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure for `fairday`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FairdayConfig {
    /// Forecast provider configuration
    #[serde(default)]
    pub source: SourceConfig,
    /// Worker pool sizing
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Forecast provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Base URL the per-city documents are published under
    #[serde(default = "default_source_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_source_timeout")]
    pub timeout_seconds: u64,
    /// Maximum number of retries for transient failures
    #[serde(default = "default_source_max_retries")]
    pub max_retries: u32,
}

/// Worker pool settings of the two pipeline stages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Maximum number of forecast downloads in flight
    #[serde(default = "default_fetch_workers")]
    pub fetch_workers: usize,
    /// Aggregation threads; 0 uses the number of available cores
    #[serde(default)]
    pub aggregate_workers: usize,
}

/// Logging settings
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
fn default_source_base_url() -> String {
    "https://code.s3.yandex.net/async-module".to_string()
}

fn default_source_timeout() -> u64 {
    5
}

fn default_source_max_retries() -> u32 {
    2
}

fn default_fetch_workers() -> usize {
    32
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_source_base_url(),
            timeout_seconds: default_source_timeout(),
            max_retries: default_source_max_retries(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fetch_workers: default_fetch_workers(),
            aggregate_workers: 0,
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

impl SourceConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl PipelineConfig {
    /// Aggregation thread count with the core-count fallback resolved
    #[must_use]
    pub fn resolved_aggregate_workers(&self) -> usize {
        if self.aggregate_workers > 0 {
            self.aggregate_workers
        } else {
            std::thread::available_parallelism().map_or(1, usize::from)
        }
    }
}

impl FairdayConfig {
    /// Load configuration from the default file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // FAIRDAY_SOURCE__TIMEOUT_SECONDS=3 overrides source.timeout_seconds
        builder = builder.add_source(
            Environment::with_prefix("FAIRDAY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: FairdayConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("fairday").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.source.base_url.is_empty() {
            self.source.base_url = default_source_base_url();
        }
        if self.source.timeout_seconds == 0 {
            self.source.timeout_seconds = default_source_timeout();
        }
        if self.pipeline.fetch_workers == 0 {
            self.pipeline.fetch_workers = default_fetch_workers();
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
        if self.source.timeout_seconds > 300 {
            return Err(
                FairdayError::config("Source timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.source.max_retries > 10 {
            return Err(FairdayError::config("Source max retries cannot exceed 10").into());
        }

        if self.pipeline.fetch_workers > 256 {
            return Err(FairdayError::config("Fetch workers cannot exceed 256").into());
        }

        if self.pipeline.aggregate_workers > 256 {
            return Err(FairdayError::config("Aggregate workers cannot exceed 256").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(FairdayError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(FairdayError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.source.base_url.starts_with("http://")
            && !self.source.base_url.starts_with("https://")
        {
            return Err(
                FairdayError::config("Source base URL must be a valid HTTP or HTTPS URL").into(),
            );
        }

        Ok(())
    }
}
