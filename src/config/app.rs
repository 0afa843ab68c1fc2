//! Main application configuration
//!
//! This module defines the primary configuration structures for the club-swiss
//! tournament service, including environment and file loading and validation.

use crate::config::{PairingConfig, RatingConfig};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub rating: RatingConfig,
    pub tournament: TournamentSettings,
    pub pairing: PairingConfig,
}

/// Service-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging and metrics
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Tournament defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentSettings {
    /// Rounds used when a tournament is created without an explicit count
    pub default_total_rounds: u32,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "club-swiss".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for TournamentSettings {
    fn default() -> Self {
        Self {
            default_total_rounds: 5,
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

    /// Load configuration from a TOML file; environment variables still override
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        // Rating settings
        if let Ok(rating) = env::var("DEFAULT_RATING") {
            self.rating.default_rating = rating
                .parse()
                .map_err(|_| anyhow!("Invalid DEFAULT_RATING value: {}", rating))?;
        }
        if let Ok(k_factor) = env::var("K_FACTOR") {
            self.rating.k_factor = k_factor
                .parse()
                .map_err(|_| anyhow!("Invalid K_FACTOR value: {}", k_factor))?;
        }
        if let Ok(rated) = env::var("RATED") {
            self.rating.rated = rated
                .parse()
                .map_err(|_| anyhow!("Invalid RATED value: {}", rated))?;
        }

        // Tournament settings
        if let Ok(rounds) = env::var("DEFAULT_TOTAL_ROUNDS") {
            self.tournament.default_total_rounds = rounds
                .parse()
                .map_err(|_| anyhow!("Invalid DEFAULT_TOTAL_ROUNDS value: {}", rounds))?;
        }

        // Pairing settings
        if let Ok(seed) = env::var("PAIRING_SEED") {
            self.pairing.seed = Some(
                seed.parse()
                    .map_err(|_| anyhow!("Invalid PAIRING_SEED value: {}", seed))?,
            );
        }

        Ok(())
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

    config.rating.validate()?;

    if config.tournament.default_total_rounds == 0 {
        return Err(anyhow!("Default total rounds must be greater than 0"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.rating.default_rating, 1200);
        assert_eq!(config.rating.k_factor, 32.0);
        assert_eq!(config.tournament.default_total_rounds, 5);
        assert_eq!(config.pairing.seed, None);
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = AppConfig::default();
        config.service.log_level = "loud".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_zero_rounds_rejected() {
        let mut config = AppConfig::default();
        config.tournament.default_total_rounds = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_non_positive_k_factor_rejected() {
        let mut config = AppConfig::default();
        config.rating.k_factor = 0.0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [rating]
            k_factor = 24.0

            [pairing]
            seed = 7
            "#,
        )
        .unwrap();

        assert_eq!(config.rating.k_factor, 24.0);
        assert_eq!(config.rating.default_rating, 1200);
        assert!(config.rating.rated);
        assert_eq!(config.pairing.seed, Some(7));
        assert_eq!(config.service.log_level, "info");
        assert!(validate_config(&config).is_ok());
    }
}
