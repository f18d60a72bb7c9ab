//! Supported languages and script-based detection.
//!
//! The assistant accepts ten Indian languages. Internally every prompt
//! runs in the working language (English); citizen-facing text is
//! translated at the edge of each turn. Detection has a deterministic
//! fast path: each supported language other than English writes in a
//! distinct Unicode script block (Devanagari is shared by Hindi and
//! Marathi and resolves to Hindi, the default).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// A language the assistant can converse in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "hi")]
    Hindi,
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ta")]
    Tamil,
    #[serde(rename = "te")]
    Telugu,
    #[serde(rename = "bn")]
    Bengali,
    #[serde(rename = "mr")]
    Marathi,
    #[serde(rename = "gu")]
    Gujarati,
    #[serde(rename = "kn")]
    Kannada,
    #[serde(rename = "ml")]
    Malayalam,
    #[serde(rename = "pa")]
    Punjabi,
}

/// The language prompts and internal reasoning use.
pub const WORKING_LANGUAGE: Language = Language::English;

impl Language {
    /// All supported languages.
    pub fn all() -> [Language; 10] {
        [
            Language::Hindi,
            Language::English,
            Language::Tamil,
            Language::Telugu,
            Language::Bengali,
            Language::Marathi,
            Language::Gujarati,
            Language::Kannada,
            Language::Malayalam,
            Language::Punjabi,
        ]
    }

    /// ISO 639-1 code.
    pub fn code(&self) -> &'static str {
        match self {
            Language::Hindi => "hi",
            Language::English => "en",
            Language::Tamil => "ta",
            Language::Telugu => "te",
            Language::Bengali => "bn",
            Language::Marathi => "mr",
            Language::Gujarati => "gu",
            Language::Kannada => "kn",
            Language::Malayalam => "ml",
            Language::Punjabi => "pa",
        }
    }

    /// English name, used in prompts.
    pub fn name(&self) -> &'static str {
        match self {
            Language::Hindi => "Hindi",
            Language::English => "English",
            Language::Tamil => "Tamil",
            Language::Telugu => "Telugu",
            Language::Bengali => "Bengali",
            Language::Marathi => "Marathi",
            Language::Gujarati => "Gujarati",
            Language::Kannada => "Kannada",
            Language::Malayalam => "Malayalam",
            Language::Punjabi => "Punjabi",
        }
    }

    /// Parses an ISO code, case-insensitive.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_ascii_lowercase();
        Language::all()
            .into_iter()
            .find(|lang| lang.code() == code)
    }

    /// Whether a code names a supported language.
    pub fn is_supported(code: &str) -> bool {
        Self::from_code(code).is_some()
    }

    /// Detects the language of a text from its dominant script.
    ///
    /// Returns None when the text carries no letters at all. Latin-only
    /// text resolves to English; romanized Hindi cannot be told apart
    /// here and is corrected downstream by the classification model.
    pub fn from_script(text: &str) -> Option<Self> {
        let mut latin = 0usize;
        let mut counts = [0usize; 8];

        for ch in text.chars() {
            match ch {
                'a'..='z' | 'A'..='Z' => latin += 1,
                '\u{0900}'..='\u{097F}' => counts[0] += 1, // Devanagari
                '\u{0980}'..='\u{09FF}' => counts[1] += 1, // Bengali
                '\u{0A00}'..='\u{0A7F}' => counts[2] += 1, // Gurmukhi
                '\u{0A80}'..='\u{0AFF}' => counts[3] += 1, // Gujarati
                '\u{0B80}'..='\u{0BFF}' => counts[4] += 1, // Tamil
                '\u{0C00}'..='\u{0C7F}' => counts[5] += 1, // Telugu
                '\u{0C80}'..='\u{0CFF}' => counts[6] += 1, // Kannada
                '\u{0D00}'..='\u{0D7F}' => counts[7] += 1, // Malayalam
                _ => {}
            }
        }

        let scripts = [
            Language::Hindi,
            Language::Bengali,
            Language::Punjabi,
            Language::Gujarati,
            Language::Tamil,
            Language::Telugu,
            Language::Kannada,
            Language::Malayalam,
        ];
        let (best_idx, best_count) = counts
            .iter()
            .enumerate()
            .max_by_key(|(_, count)| **count)
            .map(|(idx, count)| (idx, *count))
            .unwrap_or((0, 0));

        if best_count > 0 {
            Some(scripts[best_idx])
        } else if latin > 0 {
            Some(Language::English)
        } else {
            None
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::Hindi
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Language::from_code(trimmed)
            .or_else(|| {
                Language::all()
                    .into_iter()
                    .find(|lang| lang.name().eq_ignore_ascii_case(trimmed))
            })
            .ok_or_else(|| ValidationError::invalid_format("language", "unsupported language"))
    }
}
