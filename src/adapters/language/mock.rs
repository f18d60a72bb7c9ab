//! Mock Language Service for testing.
//!
//! Defaults to deterministic behavior so most tests need no setup:
//! detection uses the script fast path and translation returns the text
//! unchanged. Tagged mode wraps translations in `[code]` markers so
//! tests can assert a translation happened; error queues inject
//! failures for degraded-path tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::foundation::Language;
use crate::ports::{LanguageError, LanguageService};

/// Mock language service for testing.
#[derive(Debug, Clone, Default)]
pub struct MockLanguage {
    /// Scripted detect results, consumed before the script fast path.
    detect_script: Arc<Mutex<VecDeque<Result<Language, LanguageError>>>>,
    /// Scripted translate errors, consumed before normal behavior.
    translate_errors: Arc<Mutex<VecDeque<LanguageError>>>,
    /// When set, translations come back as `[code] text`.
    tagged: bool,
    /// Recorded (text, from, to) translate calls.
    translate_calls: Arc<Mutex<Vec<(String, Language, Language)>>>,
}

impl MockLanguage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a detect result, overriding the fast path for one call.
    pub fn with_detection(self, language: Language) -> Self {
        self.detect_script.lock().unwrap().push_back(Ok(language));
        self
    }

    /// Queues a detect failure.
    pub fn with_detection_error(self, error: LanguageError) -> Self {
        self.detect_script.lock().unwrap().push_back(Err(error));
        self
    }

    /// Queues a translate failure.
    pub fn with_translation_error(self, error: LanguageError) -> Self {
        self.translate_errors.lock().unwrap().push_back(error);
        self
    }

    /// Makes translations visible as `[code] text`.
    pub fn with_tagging(mut self) -> Self {
        self.tagged = true;
        self
    }

    /// Recorded translate calls, oldest first.
    pub fn translate_calls(&self) -> Vec<(String, Language, Language)> {
        self.translate_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageService for MockLanguage {
    async fn detect(&self, text: &str) -> Result<Language, LanguageError> {
        if let Some(scripted) = self.detect_script.lock().unwrap().pop_front() {
            return scripted;
        }
        Language::from_script(text).ok_or(LanguageError::DetectionFailed)
    }

    async fn translate(
        &self,
        text: &str,
        from: Language,
        to: Language,
    ) -> Result<String, LanguageError> {
        self.translate_calls
            .lock()
            .unwrap()
            .push((text.to_string(), from, to));

        if let Some(error) = self.translate_errors.lock().unwrap().pop_front() {
            return Err(error);
        }

        if self.tagged && from != to {
            Ok(format!("[{}] {}", to.code(), text))
        } else {
            Ok(text.to_string())
        }
    }
}
