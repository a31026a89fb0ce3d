//! Hierarchical configuration loading.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid temperature: {0}. Must be between 0.0 and 2.0")]
    InvalidTemperature(f32),

    #[error("Invalid max_tokens: {0}. Must be at least 1")]
    InvalidMaxTokens(u32),

    #[error("Invalid timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),

    #[error("Model name cannot be empty")]
    EmptyModel,

    #[error("Base URL cannot be empty")]
    EmptyBaseUrl,

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .appraise/config.yaml (project config, created by init)
    /// 3. .appraise/local.yaml (project local overrides, optional)
    /// 4. Environment variables (`APPRAISE_*` prefix, highest priority)
    ///
    /// `OPENAI_API_KEY` fills in the API key when the merged config leaves
    /// it unset.
    pub fn load() -> Result<Config> {
        let mut config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".appraise/config.yaml"))
            .merge(Yaml::file(".appraise/local.yaml"))
            .merge(Env::prefixed("APPRAISE_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        if config.completion.api_key.is_none() {
            if let Ok(key) = std::env::var("OPENAI_API_KEY") {
                config.completion.api_key = Some(key);
            }
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let completion = &config.completion;
        if !(0.0..=2.0).contains(&completion.temperature) {
            return Err(ConfigError::InvalidTemperature(completion.temperature));
        }
        if completion.max_tokens == 0 {
            return Err(ConfigError::InvalidMaxTokens(completion.max_tokens));
        }
        if completion.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(completion.timeout_secs));
        }
        if completion.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel);
        }
        if completion.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}
