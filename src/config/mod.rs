//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `JANSAHAYAK_` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use jansahayak::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Completion model: {}", config.completion.model);
//! ```

mod completion;
mod error;
mod language;
mod reference;
mod session;

pub use completion::CompletionConfig;
pub use error::{ConfigError, ValidationError};
pub use language::LanguageConfig;
pub use reference::ReferenceConfig;
pub use session::SessionConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Contains all configuration sections for the JanSahayak core.
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Completion service configuration (model, API key, timeout)
    #[serde(default)]
    pub completion: CompletionConfig,

    /// Language layer configuration (default/working language)
    #[serde(default)]
    pub language: LanguageConfig,

    /// Session store configuration (TTL, history window)
    #[serde(default)]
    pub session: SessionConfig,

    /// Reference data configuration (catalog file paths)
    #[serde(default)]
    pub reference: ReferenceConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `JANSAHAYAK` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `JANSAHAYAK__COMPLETION__API_KEY=...` -> `completion.api_key = ...`
    /// - `JANSAHAYAK__SESSION__TTL_DAYS=14` -> `session.ttl_days = 14`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("JANSAHAYAK")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Performs semantic validation of configuration:
    /// - API key presence
    /// - Timeout and retry bounds
    /// - Session TTL and history window bounds
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.completion.validate()?;
        self.session.validate()?;
        Ok(())
    }
}
