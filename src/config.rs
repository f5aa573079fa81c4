//! Configuration management for the Skycast service
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings. The resulting
//! [`SkycastConfig`] is built once at startup and handed to the web layer.

use crate::SkycastError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the Skycast service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkycastConfig {
    /// Weather provider configuration
    pub weather: WeatherConfig,
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Weather provider configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// WeatherAPI key, required at startup
    pub api_key: Option<String>,
    /// Base URL of the provider, without the endpoint path
    pub base_url: String,
    /// Number of forecast days requested (the current day included)
    pub forecast_days: u8,
    /// Ask the provider for the air-quality block
    pub include_air_quality: bool,
    /// Ask the provider for weather alerts
    pub include_alerts: bool,
    /// Request timeout in seconds; unset leaves the transport default
    pub timeout_seconds: Option<u64>,
    /// City used when the submitted location is blank
    pub default_location: String,
}

/// HTTP server configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Directory served under `/public`
    pub static_dir: String,
    /// PEM certificate, enables HTTPS together with `tls_key`
    pub tls_cert: Option<PathBuf>,
    /// PEM private key
    pub tls_key: Option<PathBuf>,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

// Default value functions
fn default_weather_base_url() -> String {
    "https://api.weatherapi.com/v1".to_string()
}

fn default_forecast_days() -> u8 {
    4
}

fn default_location() -> String {
    "London".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_static_dir() -> String {
    "public".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_base_url(),
            forecast_days: default_forecast_days(),
            include_air_quality: true,
            include_alerts: false,
            timeout_seconds: None,
            default_location: default_location(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            tls_cert: None,
            tls_key: None,
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

impl SkycastConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut config = Self::read_sources(config_path)?;

        // Plain variables used by existing deployments
        config.apply_legacy_env(|name| std::env::var(name).ok());

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Build the layered configuration without validating it
    fn read_sources(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            let local = PathBuf::from("skycast.toml");
            if local.exists() {
                local
            } else {
                Self::get_config_path().unwrap_or(local)
            }
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment variable overrides, e.g. SKYCAST_WEATHER__API_KEY
        builder = builder.add_source(
            Environment::with_prefix("SKYCAST")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("skycast").join("config.toml"))
    }

    /// Fill the API key and port from `WEATHER_API_KEY` / `PORT` when the
    /// layered sources left them unset.
    pub fn apply_legacy_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.weather.api_key.as_deref().is_none_or(str::is_empty) {
            if let Some(key) = lookup("WEATHER_API_KEY") {
                self.weather.api_key = Some(key);
            }
        }
        if self.server.port == default_port() {
            if let Some(port) = lookup("PORT").and_then(|p| p.trim().parse::<u16>().ok()) {
                self.server.port = port;
            }
        }
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.weather.forecast_days == 0 {
            self.weather.forecast_days = default_forecast_days();
        }
        if self.weather.default_location.trim().is_empty() {
            self.weather.default_location = default_location();
        }
        if self.server.host.is_empty() {
            self.server.host = default_host();
        }
        if self.server.static_dir.is_empty() {
            self.server.static_dir = default_static_dir();
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
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// The API key is mandatory; the service cannot answer anything without it.
    pub fn validate_api_keys(&self) -> Result<()> {
        match self.weather.api_key.as_deref().map(str::trim) {
            None | Some("") => Err(SkycastError::config(
                "WEATHER_API_KEY is not set. Provide it via the environment, a .env file or the config file.",
            )
            .into()),
            Some(key) if key.len() > 100 => Err(SkycastError::config(
                "Weather API key appears to be invalid (too long). Please check your API key.",
            )
            .into()),
            Some(_) => Ok(()),
        }
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if !(1..=14).contains(&self.weather.forecast_days) {
            return Err(
                SkycastError::config("Forecast days must be between 1 and 14").into(),
            );
        }

        if let Some(timeout) = self.weather.timeout_seconds {
            if timeout == 0 || timeout > 300 {
                return Err(SkycastError::config(
                    "Weather API timeout must be between 1 and 300 seconds",
                )
                .into());
            }
        }

        if self.server.port == 0 {
            return Err(SkycastError::config("Server port cannot be 0").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(SkycastError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(SkycastError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.weather.base_url.starts_with("http://")
            && !self.weather.base_url.starts_with("https://")
        {
            return Err(SkycastError::config(
                "Weather API base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        if self.server.tls_cert.is_some() != self.server.tls_key.is_some() {
            return Err(SkycastError::config(
                "tls_cert and tls_key must be configured together",
            )
            .into());
        }

        Ok(())
    }
}
