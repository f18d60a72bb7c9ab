//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form
//! the vocabulary of the JanSahayak domain.

mod errors;
mod ids;
mod language;
mod timestamp;

pub use errors::{CatalogError, ValidationError};
pub use ids::{SessionKey, TraceId};
pub use language::{Language, WORKING_LANGUAGE};
pub use timestamp::Timestamp;
