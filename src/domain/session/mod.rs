//! Session domain module.
//!
//! Holds the conversation aggregate: profile, turn history, the active
//! workflow pointer, and per-workflow scratch state. One session per
//! citizen conversation; the store expires idle ones.

mod aggregate;
mod scratch;

pub use aggregate::{
    Session, TurnRecord, TurnRole, MAX_TURN_HISTORY, PROMPT_WINDOW_TURNS,
};
pub use scratch::{FinanceScratch, SchemeScratch, ScratchPad, WorkflowKind};
