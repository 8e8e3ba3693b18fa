//! Main application configuration
//!
//! This module defines the primary configuration structures for the rally-pti
//! service, including environment variable and TOML file loading and validation.

use crate::config::rating::RatingSettings;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub rating: RatingSettings,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging and metrics
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Interface the HTTP server binds to
    pub http_host: String,
    /// Port for the calculation, health and metrics endpoints
    pub http_port: u16,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout_seconds: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "rally-pti".to_string(),
            log_level: "info".to_string(),
            http_host: "0.0.0.0".to_string(),
            http_port: 8080,
            shutdown_timeout_seconds: 30,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;

        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file; environment variables still win
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let mut config = Self::from_toml_str(&contents)?;
        config.apply_env()?;

        validate_config(&config)?;
        Ok(config)
    }

    /// Parse TOML without touching the environment
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| anyhow!("Invalid configuration file: {}", e))
    }

    fn apply_env(&mut self) -> Result<()> {
        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }
        if let Ok(host) = env::var("HTTP_HOST") {
            self.service.http_host = host;
        }
        if let Ok(port) = env::var("HTTP_PORT") {
            self.service.http_port = port
                .parse()
                .map_err(|_| anyhow!("Invalid HTTP_PORT value: {}", port))?;
        }
        if let Ok(timeout) = env::var("SHUTDOWN_TIMEOUT_SECONDS") {
            self.service.shutdown_timeout_seconds = timeout
                .parse()
                .map_err(|_| anyhow!("Invalid SHUTDOWN_TIMEOUT_SECONDS value: {}", timeout))?;
        }

        // Rating settings
        if let Ok(k) = env::var("PTI_BASE_K_FACTOR") {
            self.rating.base_k_factor = k
                .parse()
                .map_err(|_| anyhow!("Invalid PTI_BASE_K_FACTOR value: {}", k))?;
        }

        Ok(())
    }

    /// Get shutdown timeout as Duration
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.service.shutdown_timeout_seconds)
    }

    /// Socket address string for the HTTP server
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.service.http_host, self.service.http_port)
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }
    if config.service.http_host.is_empty() {
        return Err(anyhow!("HTTP host cannot be empty"));
    }
    if config.service.http_port == 0 {
        return Err(anyhow!("HTTP port cannot be 0"));
    }
    if config.service.shutdown_timeout_seconds == 0 {
        return Err(anyhow!("Shutdown timeout must be greater than 0"));
    }

    config.rating.validate()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.service.http_port, 8080);
        assert_eq!(config.rating.base_k_factor, 5.59);
        assert_eq!(config.shutdown_timeout(), Duration::from_secs(30));
        assert_eq!(config.http_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [service]
            http_port = 9000
            log_level = "debug"

            [rating]
            base_k_factor = 6.0
            "#,
        )
        .unwrap();

        assert_eq!(config.service.http_port, 9000);
        assert_eq!(config.service.log_level, "debug");
        assert_eq!(config.service.name, "rally-pti");
        assert_eq!(config.rating.base_k_factor, 6.0);
    }

    #[test]
    fn test_invalid_toml_rejected() {
        assert!(AppConfig::from_toml_str("service = 3").is_err());
    }

    #[test]
    fn test_validation_failures() {
        let mut config = AppConfig::default();
        config.service.log_level = "loud".to_string();
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.service.http_port = 0;
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.service.shutdown_timeout_seconds = 0;
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.rating.base_k_factor = -5.59;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = AppConfig::from_file(Path::new("/definitely/not/here.toml"));
        assert!(result.is_err());
    }
}
