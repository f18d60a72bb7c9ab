//! Turn outcome types handed back to the boundary layer.

use serde::Serialize;

use crate::domain::finance::ScamSeverity;
use crate::domain::foundation::{Language, TraceId};
use crate::domain::intent::Intent;
use crate::domain::profile::ProfileField;
use crate::domain::session::WorkflowKind;

/// One handled turn: citizen-facing text plus diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct Reply {
    /// Text to show or speak, written in `language`.
    pub text: String,
    /// Language the text is delivered in.
    pub language: Language,
    /// Diagnostic trace; never shown to the citizen.
    pub trace: IntentTrace,
}

/// Diagnostic metadata for one turn.
///
/// Serialized into logs and test assertions, not into replies.
#[derive(Debug, Clone, Serialize)]
pub struct IntentTrace {
    pub trace_id: TraceId,
    /// Language the turn was resolved to.
    pub detected_language: Language,
    /// Classified intent, absent when the classifier did not run.
    pub intent: Option<Intent>,
    /// Workflow that produced the reply, if any.
    pub workflow: Option<WorkflowKind>,
    /// Profile fields newly filled by this turn.
    pub fields_filled: Vec<ProfileField>,
    /// Severity of a matched fraud pattern, if any.
    pub scam_alert: Option<ScamSeverity>,
    /// False when the session could not be saved and the reply is
    /// best-effort only.
    pub persisted: bool,
}

impl IntentTrace {
    pub fn new(trace_id: TraceId, detected_language: Language) -> Self {
        Self {
            trace_id,
            detected_language,
            intent: None,
            workflow: None,
            fields_filled: Vec::new(),
            scam_alert: None,
            persisted: true,
        }
    }
}
