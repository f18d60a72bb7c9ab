//! Language Layer Port - detection and translation.
//!
//! The orchestrator works in English internally and talks to citizens
//! in their own language; this port carries both directions. A
//! translation failure is survivable: callers degrade to the original
//! text rather than failing the turn.

use async_trait::async_trait;

use crate::domain::foundation::Language;

/// Port for language detection and translation.
#[async_trait]
pub trait LanguageService: Send + Sync {
    /// Identifies the language of the text.
    async fn detect(&self, text: &str) -> Result<Language, LanguageError>;

    /// Translates text between two supported languages.
    async fn translate(
        &self,
        text: &str,
        from: Language,
        to: Language,
    ) -> Result<String, LanguageError>;
}

/// Language layer errors.
#[derive(Debug, thiserror::Error)]
pub enum LanguageError {
    /// Backing service is unavailable.
    #[error("language service unavailable: {message}")]
    Unavailable { message: String },

    /// Request timed out.
    #[error("language request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },

    /// The text's language could not be identified.
    #[error("could not detect language")]
    DetectionFailed,
}

impl LanguageError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn timeout(timeout_secs: u32) -> Self {
        Self::Timeout { timeout_secs }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LanguageError::Unavailable { .. } | LanguageError::Timeout { .. }
        )
    }
}
