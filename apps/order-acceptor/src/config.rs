//! Configuration module for the order acceptor.
//!
//! Loads YAML configuration, interpolates environment variables and
//! validates the result before any component is built from it.
//!
//! # Usage
//!
//! ```rust,ignore
//! use order_acceptor::config::load_config;
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! // Build the immutable control table
//! let table = config.risk_control_table()?;
//! ```
//!
//! Values may reference the environment as `${VAR}` or `${VAR:-default}`.

use std::collections::HashSet;
use std::net::SocketAddr;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::services::{AvgPxPolicy, DeliveryRetryPolicy};
use crate::domain::risk_control::{RiskControlError, RiskControlTable, TradingControl};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "ORDER_ACCEPTOR_CONFIG";

/// Config file used when neither a path nor the environment names one.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Acceptor identity and report policy.
    #[serde(default)]
    pub acceptor: AcceptorConfig,
    /// Per-instrument risk limits.
    pub trading_controls: Vec<TradingControlConfig>,
    /// Outbound delivery retry.
    #[serde(default)]
    pub delivery: DeliveryConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Build the immutable control table.
    pub fn risk_control_table(&self) -> Result<RiskControlTable, RiskControlError> {
        RiskControlTable::from_controls(self.trading_controls.iter().map(|control| {
            TradingControl::new(control.symbol.as_str(), control.max_price, control.max_qty)
        }))
    }

    /// Retry policy for outbound delivery.
    #[must_use]
    pub fn delivery_policy(&self) -> DeliveryRetryPolicy {
        self.delivery.to_retry_policy()
    }
}

/// Acceptor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptorConfig {
    /// Stable node identifier embedded in generated ids.
    #[serde(default = "default_node_id")]
    pub node_id: String,
    /// AvgPx placeholder policy.
    #[serde(default)]
    pub avg_px: AvgPxPolicy,
}

impl Default for AcceptorConfig {
    fn default() -> Self {
        Self {
            node_id: default_node_id(),
            avg_px: AvgPxPolicy::default(),
        }
    }
}

fn default_node_id() -> String {
    "ACCEPTOR".to_string()
}

/// One instrument's limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradingControlConfig {
    /// Instrument symbol, matched exactly.
    pub symbol: String,
    /// Exclusive price ceiling.
    pub max_price: Decimal,
    /// Exclusive quantity ceiling.
    pub max_qty: u64,
}

/// Delivery retry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryConfig {
    /// Total send attempts including the first.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Delay before the first retry in milliseconds.
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
    /// Cap on any single delay in milliseconds.
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
    /// Exponential growth factor.
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
    /// Jitter factor (0.2 = ±20%).
    #[serde(default = "default_jitter_factor")]
    pub jitter_factor: f64,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            backoff_multiplier: default_backoff_multiplier(),
            jitter_factor: default_jitter_factor(),
        }
    }
}

impl DeliveryConfig {
    /// Convert to a retry policy.
    #[must_use]
    pub const fn to_retry_policy(&self) -> DeliveryRetryPolicy {
        DeliveryRetryPolicy::new(
            self.max_attempts,
            Duration::from_millis(self.initial_backoff_ms),
            Duration::from_millis(self.max_backoff_ms),
            self.backoff_multiplier,
            self.jitter_factor,
        )
    }
}

const fn default_max_attempts() -> u32 {
    3
}
const fn default_initial_backoff_ms() -> u64 {
    50
}
const fn default_max_backoff_ms() -> u64 {
    1000
}
const fn default_backoff_multiplier() -> f64 {
    2.0
}
const fn default_jitter_factor() -> f64 {
    0.2
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Default log level when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Prometheus listen address; no exporter when unset.
    #[serde(default)]
    pub metrics_addr: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            metrics_addr: None,
        }
    }
}

impl ObservabilityConfig {
    /// Parsed metrics address, if configured and non-empty.
    pub fn metrics_socket_addr(&self) -> Result<Option<SocketAddr>, ConfigError> {
        match self.metrics_addr.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(addr) => addr.parse().map(Some).map_err(|e| {
                ConfigError::ValidationError(format!(
                    "observability.metrics_addr '{addr}' is not a socket address: {e}"
                ))
            }),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Config file path from `ORDER_ACCEPTOR_CONFIG`, or the default.
#[must_use]
pub fn config_path_from_env() -> String {
    std::env::var(CONFIG_PATH_ENV)
        .ok()
        .filter(|path| !path.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
}

/// Load configuration from a YAML file.
///
/// # Arguments
///
/// * `path` - Path to the config file; falls back to [`config_path_from_env`].
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or fails validation.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(config_path_from_env, str::to_string);

    // Read the config file
    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string.
///
/// # Errors
///
/// Returns an error if the YAML cannot be parsed or fails validation.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Replace `${VAR}` and `${VAR:-default}` with environment values.
#[allow(clippy::expect_used)] // constant pattern
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |caps: &regex::Captures<'_>| {
        let default_value = caps.get(2).map_or("", |m| m.as_str());
        match caps.get(1).map(|m| std::env::var(m.as_str())) {
            Some(Ok(value)) if !value.is_empty() => value,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.acceptor.node_id.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "acceptor.node_id must not be empty".to_string(),
        ));
    }

    if let AvgPxPolicy::Fixed { value } = config.acceptor.avg_px {
        if value.is_sign_negative() {
            return Err(ConfigError::ValidationError(
                "acceptor.avg_px fixed value must not be negative".to_string(),
            ));
        }
    }

    // Trading controls
    if config.trading_controls.is_empty() {
        return Err(ConfigError::ValidationError(
            "trading_controls must list at least one instrument".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for control in &config.trading_controls {
        if control.symbol.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "trading_controls symbol must not be empty".to_string(),
            ));
        }
        if !seen.insert(control.symbol.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "trading_controls symbol '{}' is listed twice",
                control.symbol
            )));
        }
        if control.max_price <= Decimal::ZERO {
            return Err(ConfigError::ValidationError(format!(
                "trading_controls '{}' max_price must be positive",
                control.symbol
            )));
        }
        if control.max_qty == 0 {
            return Err(ConfigError::ValidationError(format!(
                "trading_controls '{}' max_qty must be positive",
                control.symbol
            )));
        }
    }

    // Delivery
    let delivery = &config.delivery;
    if delivery.max_attempts == 0 {
        return Err(ConfigError::ValidationError(
            "delivery.max_attempts must be at least 1".to_string(),
        ));
    }
    if delivery.backoff_multiplier < 1.0 {
        return Err(ConfigError::ValidationError(
            "delivery.backoff_multiplier must be at least 1.0".to_string(),
        ));
    }
    if !(0.0..=1.0).contains(&delivery.jitter_factor) {
        return Err(ConfigError::ValidationError(
            "delivery.jitter_factor must be between 0.0 and 1.0".to_string(),
        ));
    }
    if delivery.initial_backoff_ms > delivery.max_backoff_ms {
        return Err(ConfigError::ValidationError(
            "delivery.initial_backoff_ms must not exceed max_backoff_ms".to_string(),
        ));
    }

    // Observability
    if config.observability.log_level.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "observability.log_level must not be empty".to_string(),
        ));
    }
    config.observability.metrics_socket_addr()?;

    Ok(())
}
