//! Application layer - the per-turn conversation loop.
//!
//! Coordinates domain state and the ports: classify the turn, merge
//! extracted facts, run the routed workflow, and translate the reply.
//! Nothing here talks to a concrete provider; that is adapter work.

pub mod classifier;
pub mod orchestrator;
pub mod prompts;
pub mod reply;
pub mod session_lock;
pub mod workflows;

pub use orchestrator::Orchestrator;
pub use reply::{IntentTrace, Reply};
pub use workflows::{
    FinancialAdvisor, GrievanceDesk, SchemeDiscovery, TurnInput, WorkflowReply, WorkflowResult,
};
