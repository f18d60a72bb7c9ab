//! Mock Speech Service for testing.
//!
//! Produces deterministic placeholder audio and enforces the synthesis
//! length cap the way a real synthesizer boundary would.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::domain::foundation::Language;
use crate::ports::{SpeechError, SpeechService, MAX_SYNTHESIS_CHARS};

/// Mock speech synthesizer for testing.
#[derive(Debug, Clone, Default)]
pub struct MockSpeech {
    /// Recorded (text, language) synthesis calls.
    calls: Arc<Mutex<Vec<(String, Language)>>>,
}

impl MockSpeech {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded synthesis calls, oldest first.
    pub fn calls(&self) -> Vec<(String, Language)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechService for MockSpeech {
    async fn synthesize(&self, text: &str, language: Language) -> Result<Vec<u8>, SpeechError> {
        let chars = text.chars().count();
        if chars > MAX_SYNTHESIS_CHARS {
            return Err(SpeechError::text_too_long(chars));
        }

        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), language));

        // Placeholder audio: a tagged copy of the text bytes.
        let mut audio = format!("audio/{}:", language.code()).into_bytes();
        audio.extend_from_slice(text.as_bytes());
        Ok(audio)
    }
}
