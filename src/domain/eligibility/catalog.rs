//! Startup loading and validation of the scheme reference data.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::CatalogError;

use super::rule::SchemeRule;

const BUILTIN_SCHEMES: &str = include_str!("../../../data/schemes.json");

/// The full set of scheme rules, validated once at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemeCatalog {
    rules: Vec<SchemeRule>,
}

impl SchemeCatalog {
    /// Parses and validates a catalog from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let catalog: SchemeCatalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Loads a catalog from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::io(path.display().to_string(), e))?;
        Self::from_json_str(&json)
    }

    /// The compiled-in default scheme set.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json_str(BUILTIN_SCHEMES)
    }

    pub fn rules(&self) -> &[SchemeRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&SchemeRule> {
        self.rules.iter().find(|r| r.id == id)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = std::collections::HashSet::new();
        for rule in &self.rules {
            if rule.id.trim().is_empty() {
                return Err(CatalogError::invalid_record("<unnamed>", "empty id"));
            }
            if !seen.insert(rule.id.as_str()) {
                return Err(CatalogError::invalid_record(&rule.id, "duplicate id"));
            }
            if rule.name.trim().is_empty()
                || rule.benefit.trim().is_empty()
                || rule.how_to_apply.trim().is_empty()
            {
                return Err(CatalogError::invalid_record(
                    &rule.id,
                    "name, benefit, and how_to_apply are required",
                ));
            }
            for condition in &rule.conditions {
                if !condition.is_well_formed() {
                    return Err(CatalogError::invalid_record(
                        &rule.id,
                        "malformed eligibility condition",
                    ));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_catalog_loads_and_validates() {
        let catalog = SchemeCatalog::builtin().unwrap();
        assert!(catalog.len() >= 10);
        assert!(catalog.find("pm-kisan").is_some());
    }

    #[test]
    fn builtin_catalog_has_a_universal_scheme() {
        let catalog = SchemeCatalog::builtin().unwrap();
        assert!(catalog.rules().iter().any(|r| r.conditions.is_empty()));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = r#"[
            {
                "id": "test-scheme",
                "name": "Test Scheme",
                "benefit": "₹1,000 per month",
                "how_to_apply": "Visit the block office",
                "priority": 1,
                "conditions": [{"kind": "age_range", "min": 60}]
            }
        ]"#;
        file.write_all(json.as_bytes()).unwrap();

        let catalog = SchemeCatalog::from_path(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.rules()[0].name, "Test Scheme");
    }

    #[test]
    fn missing_file_reports_io_error() {
        let err = SchemeCatalog::from_path(Path::new("/nonexistent/schemes.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn duplicate_rule_ids_are_rejected() {
        let json = r#"[
            {"id": "a", "name": "A", "benefit": "b", "how_to_apply": "h", "priority": 1},
            {"id": "a", "name": "B", "benefit": "b", "how_to_apply": "h", "priority": 2}
        ]"#;
        assert!(SchemeCatalog::from_json_str(json).is_err());
    }

    #[test]
    fn malformed_condition_is_rejected() {
        let json = r#"[
            {
                "id": "bad",
                "name": "Bad",
                "benefit": "b",
                "how_to_apply": "h",
                "priority": 1,
                "conditions": [{"kind": "occupations", "any_of": []}]
            }
        ]"#;
        assert!(SchemeCatalog::from_json_str(json).is_err());
    }
}
