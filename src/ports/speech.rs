//! Speech Port - text-to-speech for the voice boundary.
//!
//! Synthesis happens after the orchestrator returns, never inside a
//! turn. Long replies are delivered as text only.

use async_trait::async_trait;

use crate::domain::foundation::Language;

/// Replies longer than this are not synthesized.
pub const MAX_SYNTHESIS_CHARS: usize = 500;

/// Port for speech synthesis.
#[async_trait]
pub trait SpeechService: Send + Sync {
    /// Renders the text as audio in the given language.
    async fn synthesize(&self, text: &str, language: Language) -> Result<Vec<u8>, SpeechError>;
}

/// Speech synthesis errors.
#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    /// Text exceeds the synthesis limit.
    #[error("text too long for synthesis: {chars} chars, limit {max}")]
    TextTooLong { chars: usize, max: usize },

    /// No voice available for the language.
    #[error("no voice available for language '{code}'")]
    UnsupportedLanguage { code: String },

    /// Backing service is unavailable.
    #[error("speech service unavailable: {message}")]
    Unavailable { message: String },
}

impl SpeechError {
    pub fn text_too_long(chars: usize) -> Self {
        Self::TextTooLong {
            chars,
            max: MAX_SYNTHESIS_CHARS,
        }
    }

    pub fn unsupported_language(code: impl Into<String>) -> Self {
        Self::UnsupportedLanguage { code: code.into() }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, SpeechError::Unavailable { .. })
    }
}
