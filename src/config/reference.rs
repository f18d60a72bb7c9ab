//! Reference data configuration

use serde::Deserialize;

/// Reference data configuration
///
/// Paths to operator-supplied JSON catalogs. When a path is absent the
/// compiled-in defaults are used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReferenceConfig {
    /// Path to a scheme rules JSON file
    pub schemes_path: Option<String>,

    /// Path to a scam signals JSON file
    pub scam_signals_path: Option<String>,
}

impl ReferenceConfig {
    /// Check if a custom scheme catalog is configured
    pub fn has_custom_schemes(&self) -> bool {
        self.schemes_path.as_ref().is_some_and(|p| !p.is_empty())
    }

    /// Check if a custom scam signal set is configured
    pub fn has_custom_scam_signals(&self) -> bool {
        self.scam_signals_path
            .as_ref()
            .is_some_and(|p| !p.is_empty())
    }
}
