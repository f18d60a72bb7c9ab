//! Session store configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Session store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Days an idle session survives before expiry
    #[serde(default = "default_ttl_days")]
    pub ttl_days: u64,

    /// Turn records retained per session
    #[serde(default = "default_history_window")]
    pub history_window: usize,
}

impl SessionConfig {
    /// Get TTL as Duration
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_days * 24 * 60 * 60)
    }

    /// Validate session configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.ttl_days == 0 || self.ttl_days > 90 {
            return Err(ValidationError::InvalidSessionTtl);
        }
        if self.history_window < 2 || self.history_window > 100 {
            return Err(ValidationError::InvalidHistoryWindow);
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_days: default_ttl_days(),
            history_window: default_history_window(),
        }
    }
}

fn default_ttl_days() -> u64 {
    30
}

fn default_history_window() -> usize {
    20
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_config_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.ttl_days, 30);
        assert_eq!(config.history_window, 20);
    }

    #[test]
    fn test_ttl_duration() {
        let config = SessionConfig {
            ttl_days: 2,
            ..Default::default()
        };
        assert_eq!(config.ttl(), Duration::from_secs(2 * 24 * 60 * 60));
    }

    #[test]
    fn test_validation_invalid_ttl() {
        let config = SessionConfig {
            ttl_days: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SessionConfig {
            ttl_days: 365,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_history_window() {
        let config = SessionConfig {
            history_window: 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(SessionConfig::default().validate().is_ok());
    }
}
