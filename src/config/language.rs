//! Language layer configuration

use serde::Deserialize;

use crate::domain::foundation::Language;

/// Language layer configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LanguageConfig {
    /// Language assumed when detection fails
    #[serde(default = "default_default_language")]
    pub default_language: Language,

    /// Language prompts and internal reasoning run in
    #[serde(default = "default_working_language")]
    pub working_language: Language,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            default_language: default_default_language(),
            working_language: default_working_language(),
        }
    }
}

fn default_default_language() -> Language {
    Language::Hindi
}

fn default_working_language() -> Language {
    Language::English
}
