//! Configuration management for the trip planner
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::PlannerError;
use crate::models::HotelTier;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variables consulted for the generative service credential,
/// in order, when none is configured.
const API_KEY_ENV_VARS: [&str; 2] = ["GOOGLE_API_KEY", "GENAI_API_KEY"];

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PlannerConfig {
    /// Geocoding and forecast service settings
    pub weather: WeatherConfig,
    /// Generative recommendation service settings
    pub generative: GenerativeConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Default trip parameters
    pub defaults: DefaultsConfig,
}

/// Geocoding and forecast service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Base URL of the geocoding API
    pub geocoding_url: String,
    /// Base URL of the forecast API
    pub forecast_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

/// Generative recommendation service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerativeConfig {
    /// API key; falls back to `GOOGLE_API_KEY` / `GENAI_API_KEY`
    pub api_key: Option<String>,
    /// Base URL of the OpenAI-compatible chat completions endpoint
    pub base_url: String,
    /// Model name
    pub model: String,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
    /// Set to false to always use the heuristic recommender
    pub enabled: bool,
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

/// Default trip parameters used when the CLI omits them
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Number of hotel nights
    pub nights: u32,
    /// Hotel tier name (budget, mid, premium)
    pub hotel_tier: String,
}

// Default value functions
fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1".to_string()
}

fn default_forecast_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_timeout() -> u32 {
    10
}

fn default_user_agent() -> String {
    format!("tripplanner/{}", crate::VERSION)
}

fn default_generative_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta/openai".to_string()
}

fn default_generative_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_hotel_tier() -> String {
    "mid".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            geocoding_url: default_geocoding_url(),
            forecast_url: default_forecast_url(),
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for GenerativeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_generative_base_url(),
            model: default_generative_model(),
            timeout_seconds: default_timeout(),
            enabled: true,
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
            nights: 1,
            hotel_tier: default_hotel_tier(),
        }
    }
}

impl WeatherConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.into())
    }
}

impl GenerativeConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.into())
    }

    /// The credential to use: configured key first, then the process environment
    #[must_use]
    pub fn resolved_api_key(&self) -> Option<String> {
        Self::resolve_api_key_with(self.api_key.as_deref(), |name| std::env::var(name).ok())
    }

    fn resolve_api_key_with<F>(configured: Option<&str>, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        configured
            .map(str::to_string)
            .or_else(|| API_KEY_ENV_VARS.iter().find_map(|name| lookup(name)))
            .filter(|key| !key.trim().is_empty())
    }
}

impl DefaultsConfig {
    #[must_use]
    pub fn tier(&self) -> HotelTier {
        HotelTier::from_name(&self.hotel_tier)
    }
}

impl PlannerConfig {
    /// Load configuration from the default file location and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
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

        // Environment overrides, e.g. TRIPPLANNER_WEATHER__TIMEOUT_SECONDS=20
        builder = builder.add_source(
            Environment::with_prefix("TRIPPLANNER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: PlannerConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tripplanner").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.weather.geocoding_url.is_empty() {
            self.weather.geocoding_url = default_geocoding_url();
        }
        if self.weather.forecast_url.is_empty() {
            self.weather.forecast_url = default_forecast_url();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_timeout();
        }
        if self.weather.user_agent.is_empty() {
            self.weather.user_agent = default_user_agent();
        }
        if self.generative.base_url.is_empty() {
            self.generative.base_url = default_generative_base_url();
        }
        if self.generative.model.is_empty() {
            self.generative.model = default_generative_model();
        }
        if self.generative.timeout_seconds == 0 {
            self.generative.timeout_seconds = default_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.defaults.hotel_tier.is_empty() {
            self.defaults.hotel_tier = default_hotel_tier();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> std::result::Result<(), PlannerError> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> std::result::Result<(), PlannerError> {
        if self.weather.timeout_seconds > 300 {
            return Err(PlannerError::config(
                "Weather API timeout cannot exceed 300 seconds",
            ));
        }

        if self.generative.timeout_seconds > 300 {
            return Err(PlannerError::config(
                "Generative API timeout cannot exceed 300 seconds",
            ));
        }

        if self.defaults.nights == 0 {
            return Err(PlannerError::config("Default nights must be at least 1"));
        }

        Ok(())
    }

    fn validate_string_values(&self) -> std::result::Result<(), PlannerError> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(PlannerError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            )));
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(PlannerError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            )));
        }

        for (label, url) in [
            ("Geocoding", &self.weather.geocoding_url),
            ("Forecast", &self.weather.forecast_url),
            ("Generative", &self.generative.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(PlannerError::config(format!(
                    "{label} API base URL must be a valid HTTP or HTTPS URL"
                )));
            }
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
        let config = PlannerConfig::default();
        assert_eq!(
            config.weather.forecast_url,
            "https://api.open-meteo.com/v1"
        );
        assert_eq!(config.weather.timeout_seconds, 10);
        assert_eq!(config.generative.model, "gemini-2.0-flash");
        assert!(config.generative.api_key.is_none());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.defaults.nights, 1);
        assert_eq!(config.defaults.tier(), HotelTier::Mid);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = PlannerConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = PlannerConfig::default();
        config.weather.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));
    }

    #[test]
    fn test_config_validation_rejects_non_http_url() {
        let mut config = PlannerConfig::default();
        config.weather.geocoding_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[weather]
forecast_url = "http://localhost:8080/v1"
timeout_seconds = 20

[defaults]
nights = 3
hotel_tier = "premium"
"#
        )
        .unwrap();

        let config = PlannerConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.weather.forecast_url, "http://localhost:8080/v1");
        assert_eq!(config.weather.timeout_seconds, 20);
        assert_eq!(config.weather.geocoding_url, "https://geocoding-api.open-meteo.com/v1");
        assert_eq!(config.defaults.nights, 3);
        assert_eq!(config.defaults.tier(), HotelTier::Premium);
    }

    #[test]
    fn test_resolve_api_key_prefers_configured_value() {
        let key = GenerativeConfig::resolve_api_key_with(Some("configured"), |_| {
            Some("from-env".to_string())
        });
        assert_eq!(key.as_deref(), Some("configured"));
    }

    #[test]
    fn test_resolve_api_key_falls_back_to_env_order() {
        let key = GenerativeConfig::resolve_api_key_with(None, |name| {
            (name == "GENAI_API_KEY").then(|| "genai".to_string())
        });
        assert_eq!(key.as_deref(), Some("genai"));

        let key = GenerativeConfig::resolve_api_key_with(None, |name| Some(name.to_string()));
        assert_eq!(key.as_deref(), Some("GOOGLE_API_KEY"));
    }

    #[test]
    fn test_blank_api_key_is_treated_as_missing() {
        let key = GenerativeConfig::resolve_api_key_with(Some("  "), |_| None);
        assert!(key.is_none());
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = PlannerConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("tripplanner"));
            assert!(path.to_string_lossy().contains("config.toml"));
        }
    }
}
