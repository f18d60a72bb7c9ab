//! Language Layer Adapters.
//!
//! Implementations of the LanguageService port.
//!
//! ## Available Adapters
//!
//! - `ModelLanguage` - script fast path + completion-backed detection/translation
//! - `MockLanguage` - deterministic mock for testing

mod mock;
mod model;

pub use mock::MockLanguage;
pub use model::ModelLanguage;
