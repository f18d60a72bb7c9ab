//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `CompletionService` - text generation model
//! - `LanguageService` - language detection and translation
//! - `SessionStore` - conversation persistence with TTL
//! - `SpeechService` - text-to-speech for the voice boundary

mod completion;
mod language;
mod session_store;
mod speech;

pub use completion::{
    CompletionError, CompletionRequest, CompletionService, Message, MessageRole,
};
pub use language::{LanguageError, LanguageService};
pub use session_store::{SessionStore, SessionStoreError};
pub use speech::{SpeechError, SpeechService, MAX_SYNTHESIS_CHARS};
