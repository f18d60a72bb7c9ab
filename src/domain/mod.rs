//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, language, errors)
//! - `profile` - Citizen profile, attribute enums, and the merge rules
//! - `session` - Conversation session aggregate, turn history, workflow scratch
//! - `intent` - Turn intent taxonomy and classification outcome
//! - `eligibility` - Scheme rules, predicate evaluation, and ranking
//! - `grievance` - RTI categories, templates, and draft state machine
//! - `finance` - EMI math, loan-text parsing, scam signals, alternatives

pub mod eligibility;
pub mod finance;
pub mod foundation;
pub mod grievance;
pub mod intent;
pub mod profile;
pub mod session;
