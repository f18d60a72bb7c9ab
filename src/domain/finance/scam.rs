//! Known fraud patterns matched against raw citizen text.
//!
//! The screen runs before any routing or EMI logic. High-severity
//! matches replace the whole reply; caution matches only prepend a
//! warning to whatever the turn otherwise produces.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CatalogError, Language};

const BUILTIN_SIGNALS: &str = include_str!("../../../data/scam_signals.json");

/// How strongly a matched pattern indicates fraud.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScamSeverity {
    /// Certain fraud. The warning replaces the reply for this turn.
    High,
    /// Likely fraud. The warning is prepended to the normal reply.
    Caution,
}

/// One recognizable fraud pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScamSignal {
    pub id: String,
    pub severity: ScamSeverity,
    /// Lowercase substrings; any one of them matching fires the signal.
    pub keywords: Vec<String>,
    pub alert_hi: String,
    pub alert_en: String,
}

impl ScamSignal {
    /// Warning text for the citizen's language. Hindi speakers get the
    /// Hindi alert directly; everything else starts from English and is
    /// translated downstream.
    pub fn alert_for(&self, language: Language) -> &str {
        match language {
            Language::Hindi => &self.alert_hi,
            _ => &self.alert_en,
        }
    }
}

/// Ordered collection of fraud patterns, checked first-match-wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScamSignalSet {
    signals: Vec<ScamSignal>,
}

impl ScamSignalSet {
    /// Parses and validates a signal set from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let set: ScamSignalSet = serde_json::from_str(json)?;
        set.validate()?;
        Ok(set)
    }

    /// Loads a signal set from a JSON file.
    pub fn from_path(path: &std::path::Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::io(path.display().to_string(), e))?;
        Self::from_json_str(&json)
    }

    /// The compiled-in default patterns.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json_str(BUILTIN_SIGNALS)
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    pub fn signals(&self) -> &[ScamSignal] {
        &self.signals
    }

    /// Returns the first signal whose keyword occurs in the text.
    ///
    /// Matching is case-insensitive substring search over the raw turn
    /// text, before any classification or translation.
    pub fn first_match(&self, text: &str) -> Option<&ScamSignal> {
        let lowered = text.to_lowercase();
        self.signals
            .iter()
            .find(|signal| signal.keywords.iter().any(|k| lowered.contains(k.as_str())))
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = std::collections::HashSet::new();
        for signal in &self.signals {
            if signal.id.trim().is_empty() {
                return Err(CatalogError::invalid_record("<unnamed>", "empty id"));
            }
            if !seen.insert(signal.id.as_str()) {
                return Err(CatalogError::invalid_record(&signal.id, "duplicate id"));
            }
            if signal.keywords.is_empty() || signal.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(CatalogError::invalid_record(
                    &signal.id,
                    "keywords must be non-empty",
                ));
            }
            if signal.alert_hi.trim().is_empty() || signal.alert_en.trim().is_empty() {
                return Err(CatalogError::invalid_record(
                    &signal.id,
                    "both alert texts are required",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_signals_load_and_validate() {
        let set = ScamSignalSet::builtin().unwrap();
        assert!(set.len() >= 5);
    }

    #[test]
    fn otp_request_is_high_severity() {
        let set = ScamSignalSet::builtin().unwrap();
        let hit = set.first_match("Bank wale ne call karke OTP batao bola").unwrap();
        assert_eq!(hit.severity, ScamSeverity::High);
        assert!(hit.alert_en.contains("OTP"));
    }

    #[test]
    fn kyc_phone_update_is_caution() {
        let set = ScamSignalSet::builtin().unwrap();
        let hit = set.first_match("phone aya ki KYC update karna hai warna account block").unwrap();
        assert_eq!(hit.severity, ScamSeverity::Caution);
    }

    #[test]
    fn devanagari_keywords_match_without_lowercasing() {
        let set = ScamSignalSet::builtin().unwrap();
        let hit = set.first_match("मुझे कहा गया कि मैंने लॉटरी जीती है").unwrap();
        assert_eq!(hit.severity, ScamSeverity::High);
    }

    #[test]
    fn plain_loan_question_matches_nothing() {
        let set = ScamSignalSet::builtin().unwrap();
        assert!(set.first_match("I want a loan for my shop, what are the rates?").is_none());
    }

    #[test]
    fn alert_language_selection_prefers_hindi_for_hindi() {
        let set = ScamSignalSet::builtin().unwrap();
        let hit = set.first_match("share otp please").unwrap();
        assert_eq!(hit.alert_for(Language::Hindi), hit.alert_hi);
        assert_eq!(hit.alert_for(Language::Tamil), hit.alert_en);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let json = r#"[
            {"id": "a", "severity": "high", "keywords": ["x"], "alert_hi": "h", "alert_en": "e"},
            {"id": "a", "severity": "caution", "keywords": ["y"], "alert_hi": "h", "alert_en": "e"}
        ]"#;
        assert!(ScamSignalSet::from_json_str(json).is_err());
    }

    #[test]
    fn empty_keywords_are_rejected() {
        let json = r#"[
            {"id": "a", "severity": "high", "keywords": [], "alert_hi": "h", "alert_en": "e"}
        ]"#;
        assert!(ScamSignalSet::from_json_str(json).is_err());
    }
}
