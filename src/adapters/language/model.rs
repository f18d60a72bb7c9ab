//! Model-backed Language Service - detection and translation via the
//! completion port.
//!
//! Detection runs a deterministic script fast path first: every
//! supported language except English writes in a distinct Unicode
//! block, so most turns never touch the model. Latin-script text is the
//! grey zone (romanized Hindi reads as English to the fast path) and is
//! resolved by a short completion call. Translation always goes through
//! the model; a same-language request returns the text untouched.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::domain::foundation::{Language, TraceId};
use crate::ports::{
    CompletionError, CompletionRequest, CompletionService, LanguageError, LanguageService,
    MessageRole,
};

/// Detection prompt only needs a sample, not the whole turn.
const DETECT_SAMPLE_CHARS: usize = 200;

const DETECT_SYSTEM_PROMPT: &str = "You identify the language of short messages from Indian \
citizens. Reply with exactly one ISO 639-1 code from this list and nothing else: \
hi, en, ta, te, bn, mr, gu, kn, ml, pa. Romanized Hindi (Hindi words written in \
Latin letters) is hi, not en.";

/// Language service backed by the completion model.
pub struct ModelLanguage {
    completion: Arc<dyn CompletionService>,
}

impl ModelLanguage {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self { completion }
    }

    /// Asks the model to name the language of a Latin-script sample.
    async fn detect_via_model(&self, text: &str) -> Result<Language, LanguageError> {
        let sample: String = text.chars().take(DETECT_SAMPLE_CHARS).collect();
        let request = CompletionRequest::new(TraceId::new())
            .with_system_prompt(DETECT_SYSTEM_PROMPT)
            .with_message(MessageRole::User, sample)
            .with_max_tokens(8)
            .with_temperature(0.0);

        let answer = self
            .completion
            .complete(request)
            .await
            .map_err(map_completion_error)?;

        Language::from_code(&answer).ok_or(LanguageError::DetectionFailed)
    }
}

#[async_trait]
impl LanguageService for ModelLanguage {
    async fn detect(&self, text: &str) -> Result<Language, LanguageError> {
        match Language::from_script(text) {
            Some(Language::English) => {
                // Latin script: could be English or a romanized Indic
                // language. The model decides; if it cannot, the script
                // verdict stands.
                match self.detect_via_model(text).await {
                    Ok(language) => Ok(language),
                    Err(err) => {
                        debug!(error = %err, "model detection failed, keeping script verdict");
                        Ok(Language::English)
                    }
                }
            }
            Some(language) => Ok(language),
            None => Err(LanguageError::DetectionFailed),
        }
    }

    async fn translate(
        &self,
        text: &str,
        from: Language,
        to: Language,
    ) -> Result<String, LanguageError> {
        if from == to {
            return Ok(text.to_string());
        }

        let system_prompt = format!(
            "Translate the user's message from {} to {}. Keep the meaning exact, use simple \
             everyday words, and preserve numbers, names, and currency amounts as written. \
             Output only the translation.",
            from.name(),
            to.name()
        );

        let request = CompletionRequest::new(TraceId::new())
            .with_system_prompt(system_prompt)
            .with_message(MessageRole::User, text)
            .with_temperature(0.0);

        let translated = self
            .completion
            .complete(request)
            .await
            .map_err(map_completion_error)?;

        let translated = translated.trim().to_string();
        if translated.is_empty() {
            return Err(LanguageError::unavailable("empty translation"));
        }
        Ok(translated)
    }
}

fn map_completion_error(err: CompletionError) -> LanguageError {
    match err {
        CompletionError::Timeout { timeout_secs } => LanguageError::timeout(timeout_secs),
        other => LanguageError::unavailable(other.to_string()),
    }
}
