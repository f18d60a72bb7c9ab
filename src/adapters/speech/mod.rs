//! Speech Synthesis Adapters.
//!
//! Implementations of the SpeechService port.
//!
//! ## Available Adapters
//!
//! - `MockSpeech` - deterministic placeholder synthesizer for testing

mod mock;

pub use mock::MockSpeech;
