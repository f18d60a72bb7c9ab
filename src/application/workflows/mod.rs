//! Multi-turn workflow engines.
//!
//! Each engine advances its own state machine by one citizen turn and
//! reports whether it needs another turn or has finished. Engines work
//! in the English working language; the orchestrator owns translation
//! back to the citizen's language.

pub mod finance;
pub mod grievance;
pub mod scheme;

pub use finance::FinancialAdvisor;
pub use grievance::GrievanceDesk;
pub use scheme::SchemeDiscovery;

use crate::domain::foundation::{Language, TraceId};
use crate::domain::intent::Classification;

/// One turn's worth of conversational reply from a workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowReply {
    pub text: String,
    /// Language `text` is currently written in.
    pub language: Language,
    /// A formal document delivered verbatim, exempt from translation.
    pub formal_document: Option<String>,
}

impl WorkflowReply {
    pub fn text(text: impl Into<String>, language: Language) -> Self {
        Self {
            text: text.into(),
            language,
            formal_document: None,
        }
    }

    pub fn with_document(mut self, document: impl Into<String>) -> Self {
        self.formal_document = Some(document.into());
        self
    }
}

/// Whether the workflow keeps ownership of the next turn.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowResult {
    /// The reply asks a follow-up; the workflow stays active.
    NeedsMoreInfo(WorkflowReply),
    /// The reply closes the request; the session returns to idle.
    Complete(WorkflowReply),
}

impl WorkflowResult {
    pub fn reply(&self) -> &WorkflowReply {
        match self {
            WorkflowResult::NeedsMoreInfo(reply) | WorkflowResult::Complete(reply) => reply,
        }
    }

    pub fn reply_mut(&mut self) -> &mut WorkflowReply {
        match self {
            WorkflowResult::NeedsMoreInfo(reply) | WorkflowResult::Complete(reply) => reply,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, WorkflowResult::Complete(_))
    }
}

/// Everything a workflow sees about the turn being routed to it.
#[derive(Debug, Clone, Copy)]
pub struct TurnInput<'a> {
    /// Citizen's text exactly as received.
    pub raw_text: &'a str,
    /// The same turn in the English working language.
    pub working_text: &'a str,
    /// Language the citizen is speaking.
    pub language: Language,
    pub classification: &'a Classification,
    pub trace_id: TraceId,
}
