//! Scheme eligibility: rule records, predicate evaluation, and the
//! ranking engine.

mod catalog;
mod engine;
mod rule;

pub use catalog::SchemeCatalog;
pub use engine::{match_schemes, MatchOutcome, MatchScore, SchemeMatch, MAX_MATCHES};
pub use rule::{Condition, SchemeRule, Verdict};
