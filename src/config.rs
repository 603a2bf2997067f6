//! Configuration management for the Classy Weather widget
//!
//! Handles loading configuration from a TOML file and environment variables,
//! and validates the service endpoints, logging and default settings.

use crate::WeatherError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const APP_DIR: &str = "classy-weather";
const ENV_PREFIX: &str = "CLASSY_WEATHER";

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Geocoding and forecast endpoints
    #[serde(default)]
    pub services: ServicesConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Default application settings
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Remote service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesConfig {
    /// Geocoding search endpoint
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,
    /// Daily forecast endpoint
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
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

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Query shown when the widget starts
    #[serde(default = "default_location")]
    pub location: String,
}

fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1/search".to_string()
}

fn default_forecast_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

fn default_timeout() -> u32 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_location() -> String {
    "Lundon".to_string()
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            geocoding_url: default_geocoding_url(),
            forecast_url: default_forecast_url(),
            timeout_seconds: default_timeout(),
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

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            location: default_location(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            services: ServicesConfig::default(),
            logging: LoggingConfig::default(),
            defaults: DefaultsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `config_path`, or the default file location
    /// when `None`, layered under environment variables
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

        // CLASSY_WEATHER_SERVICES__FORECAST_URL -> services.forecast_url
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: AppConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.services.geocoding_url.is_empty() {
            self.services.geocoding_url = default_geocoding_url();
        }
        if self.services.forecast_url.is_empty() {
            self.services.forecast_url = default_forecast_url();
        }
        if self.services.timeout_seconds == 0 {
            self.services.timeout_seconds = default_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.defaults.location.trim().is_empty() {
            self.defaults.location = default_location();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_services()?;
        self.validate_logging()?;
        Ok(())
    }

    fn validate_services(&self) -> Result<()> {
        if self.services.timeout_seconds > 300 {
            return Err(WeatherError::config("Service timeout cannot exceed 300 seconds").into());
        }

        for (name, url) in [
            ("Geocoding", &self.services.geocoding_url),
            ("Forecast", &self.services.forecast_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(WeatherError::config(format!(
                    "{name} URL must be a valid HTTP or HTTPS URL, got '{url}'"
                ))
                .into());
            }
        }

        Ok(())
    }

    fn validate_logging(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WeatherError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(WeatherError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(
            config.services.geocoding_url,
            "https://geocoding-api.open-meteo.com/v1/search"
        );
        assert_eq!(
            config.services.forecast_url,
            "https://api.open-meteo.com/v1/forecast"
        );
        assert_eq!(config.services.timeout_seconds, 10);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.defaults.location, "Lundon");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = AppConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_timeout_range() {
        let mut config = AppConfig::default();
        config.services.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));
    }

    #[test]
    fn test_config_validation_rejects_non_http_url() {
        let mut config = AppConfig::default();
        config.services.forecast_url = "ftp://example.com/forecast".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("Forecast URL"));
    }

    #[test]
    fn test_apply_defaults_fills_empty_fields() {
        let mut config = AppConfig::default();
        config.services.geocoding_url.clear();
        config.services.timeout_seconds = 0;
        config.defaults.location = "   ".to_string();
        config.apply_defaults();
        assert_eq!(config.services.geocoding_url, default_geocoding_url());
        assert_eq!(config.services.timeout_seconds, 10);
        assert_eq!(config.defaults.location, "Lundon");
    }

    #[test]
    fn test_load_from_file_overrides_endpoints() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            "[services]\ngeocoding_url = \"http://localhost:9000/search\"\ntimeout_seconds = 3\n\n[defaults]\nlocation = \"London\""
        )
        .unwrap();

        let config = AppConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.services.geocoding_url, "http://localhost:9000/search");
        assert_eq!(config.services.forecast_url, default_forecast_url());
        assert_eq!(config.services.timeout_seconds, 3);
        assert_eq!(config.defaults.location, "London");
    }

    #[test]
    fn test_load_rejects_invalid_file_values() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(file, "[logging]\nformat = \"xml\"").unwrap();

        let result = AppConfig::load_from_path(Some(file.path().to_path_buf()));
        assert!(result.unwrap_err().to_string().contains("Invalid log format"));
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = AppConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("classy-weather"));
            assert!(path.to_string_lossy().ends_with("config.toml"));
        }
    }
}
