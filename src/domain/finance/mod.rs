//! Financial advisory: EMI math, loan-text parsing, fraud patterns,
//! and government lending alternatives.

mod alternatives;
mod emi;
mod parse;
mod scam;

pub use alternatives::LoanAlternative;
pub use emi::{
    EmiSchedule, LoanTerms, RiskBand, ELEVATED_ANNUAL_RATE_PERCENT,
    PREDATORY_ANNUAL_RATE_PERCENT,
};
pub use parse::{LoanMention, DEFAULT_TENURE_MONTHS};
pub use scam::{ScamSeverity, ScamSignal, ScamSignalSet};
