//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Completion service (Anthropic API, retry wrapper, mock)
//! - `language` - Language detection/translation (model-backed, mock)
//! - `store` - Session persistence (in-memory with TTL)
//! - `speech` - Speech synthesis (mock)

pub mod ai;
pub mod language;
pub mod speech;
pub mod store;
