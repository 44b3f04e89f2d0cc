//! Configuration types and loading
//!
//! Defaults, then an optional file, then environment variables.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct AppConfig {
    /// Log output configuration
    pub logging: LoggingConfig,

    /// Pricing rates and display settings
    pub pricing: PricingConfig,

    /// Background pricing worker
    pub worker: WorkerConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LoggingConfig {
    /// `EnvFilter` directive string
    pub filter: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info,qp_services=debug".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PricingConfig {
    /// Sales tax applied to proformas (IGV)
    pub igv_rate: Decimal,
    /// Decimal places used when presenting amounts
    pub display_scale: u32,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            igv_rate: Decimal::new(18, 2),
            display_scale: 2,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct WorkerConfig {
    /// Bounded request queue size
    pub queue_capacity: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self { queue_capacity: 64 }
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
    #[error("Config file error: {0}")]
    FileError(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::FileError(err.to_string())
    }
}

impl From<ConfigError> for crate::error::QpError {
    fn from(err: ConfigError) -> Self {
        crate::error::QpError::Config(err.to_string())
    }
}

fn parse_env<T: FromStr>(key: &str, raw: String) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        message: e.to_string(),
    })
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Logging
        if let Ok(filter) = std::env::var("QP_LOG_FILTER") {
            config.logging.filter = filter;
        }
        if let Ok(v) = std::env::var("QP_LOG_JSON") {
            config.logging.json = v == "true" || v == "1" || v == "yes";
        }

        // Pricing
        if let Ok(v) = std::env::var("QP_IGV_RATE") {
            let rate: Decimal = parse_env("QP_IGV_RATE", v)?;
            if rate.is_sign_negative() {
                return Err(ConfigError::InvalidValue {
                    key: "QP_IGV_RATE".to_string(),
                    message: "must not be negative".to_string(),
                });
            }
            config.pricing.igv_rate = rate;
        }
        if let Ok(v) = std::env::var("QP_DISPLAY_SCALE") {
            config.pricing.display_scale = parse_env("QP_DISPLAY_SCALE", v)?;
        }

        // Worker
        if let Ok(v) = std::env::var("QP_WORKER_QUEUE_CAPACITY") {
            let capacity: usize = parse_env("QP_WORKER_QUEUE_CAPACITY", v)?;
            if capacity == 0 {
                return Err(ConfigError::InvalidValue {
                    key: "QP_WORKER_QUEUE_CAPACITY".to_string(),
                    message: "must be at least 1".to_string(),
                });
            }
            config.worker.queue_capacity = capacity;
        }

        Ok(config)
    }

    /// Layer defaults, an optional config file and `QP__`-prefixed environment variables
    /// (e.g. `QP__PRICING__IGV_RATE=0.18`)
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let defaults = config::Config::try_from(&Self::default())?;
        let mut builder = config::Config::builder().add_source(defaults);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix("QP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
