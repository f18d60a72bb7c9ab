//! Turn intent taxonomy and the classifier's structured outcome.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;
use crate::domain::profile::ProfilePatch;

/// What the citizen's turn is asking for.
///
/// `Continuation` means the turn answers a follow-up question the
/// assistant itself asked; the previously active workflow keeps the
/// turn instead of being re-routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    SchemeDiscovery,
    RtiGrievance,
    FinancialAdvice,
    Continuation,
    Unclear,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::SchemeDiscovery => "scheme_discovery",
            Intent::RtiGrievance => "rti_grievance",
            Intent::FinancialAdvice => "financial_advice",
            Intent::Continuation => "continuation",
            Intent::Unclear => "unclear",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Intent {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "scheme_discovery" | "scheme" | "schemes" => Ok(Intent::SchemeDiscovery),
            "rti_grievance" | "rti" | "grievance" => Ok(Intent::RtiGrievance),
            "financial_advice" | "finance" | "financial" => Ok(Intent::FinancialAdvice),
            "continuation" => Ok(Intent::Continuation),
            "unclear" => Ok(Intent::Unclear),
            other => Err(ValidationError::invalid_format(
                "intent",
                format!("unknown intent '{other}'"),
            )),
        }
    }
}

/// Everything the classifier recovered from one turn.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    pub intent: Option<Intent>,
    /// Profile attributes mentioned in the turn, stated or inferred.
    pub patch: ProfilePatch,
    /// Locality named for an RTI draft, when present.
    pub locality: Option<String>,
    /// Public authority named for an RTI draft, when present.
    pub authority: Option<String>,
    /// Period a complaint covers, when the citizen gave one.
    pub date_range: Option<String>,
    /// Outcome the citizen asked for, when stated.
    pub desired_remedy: Option<String>,
}

impl Classification {
    /// An empty classification, used when model output is unparsable.
    pub fn empty() -> Self {
        Self::default()
    }
}
