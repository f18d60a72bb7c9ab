//! Completion Service Adapters.
//!
//! Implementations of the CompletionService port.
//!
//! ## Available Adapters
//!
//! - `AnthropicCompletion` - Claude models over the Anthropic API
//! - `RetryingCompletion` - Wrapper with capped retry on transient failures
//! - `MockCompletion` - Configurable mock for testing

mod anthropic;
mod mock;
mod retry;

pub use anthropic::{AnthropicCompletion, AnthropicConfig};
pub use mock::{MockCompletion, MockError, MockReply};
pub use retry::RetryingCompletion;
