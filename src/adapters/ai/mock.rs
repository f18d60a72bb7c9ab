//! Mock Completion Service for testing.
//!
//! Configurable mock implementation of the completion port, allowing
//! tests to run without calling a real model API.
//!
//! # Example
//!
//! ```ignore
//! let service = MockCompletion::new()
//!     .with_reply("Namaste! Main aapki kya madad kar sakta hoon?")
//!     .with_delay(Duration::from_millis(100));
//!
//! let text = service.complete(request).await?;
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{CompletionError, CompletionRequest, CompletionService};

/// Mock completion service for testing.
///
/// Configurable to return specific replies, simulate delays, or inject
/// errors. Replies are consumed in order; once exhausted, a default
/// reply is returned.
#[derive(Debug, Clone)]
pub struct MockCompletion {
    /// Pre-configured replies (consumed in order).
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    /// Simulated latency per request.
    delay: Duration,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

/// A configured mock reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this text.
    Success(String),
    /// Return an error.
    Error(MockError),
}

/// Mock error types for testing error handling.
#[derive(Debug, Clone)]
pub enum MockError {
    /// Simulate rate limiting.
    RateLimited { retry_after_secs: u32 },
    /// Simulate provider unavailable.
    Unavailable { message: String },
    /// Simulate authentication failure.
    AuthenticationFailed,
    /// Simulate network error.
    Network { message: String },
    /// Simulate a malformed provider response.
    InvalidResponse { message: String },
    /// Simulate timeout.
    Timeout { timeout_secs: u32 },
}

impl From<MockError> for CompletionError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => {
                CompletionError::rate_limited(retry_after_secs)
            }
            MockError::Unavailable { message } => CompletionError::unavailable(message),
            MockError::AuthenticationFailed => CompletionError::AuthenticationFailed,
            MockError::Network { message } => CompletionError::network(message),
            MockError::InvalidResponse { message } => CompletionError::invalid_response(message),
            MockError::Timeout { timeout_secs } => CompletionError::timeout(timeout_secs),
        }
    }
}

impl Default for MockCompletion {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCompletion {
    /// Creates a new mock with default settings.
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a successful reply to the queue.
    pub fn with_reply(self, text: impl Into<String>) -> Self {
        let mut replies = self.replies.lock().unwrap();
        replies.push_back(MockReply::Success(text.into()));
        drop(replies);
        self
    }

    /// Adds an error reply to the queue.
    pub fn with_error(self, error: MockError) -> Self {
        let mut replies = self.replies.lock().unwrap();
        replies.push_back(MockReply::Error(error));
        drop(replies);
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made to this service.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Clears the call history.
    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Gets the next reply or a default.
    fn next_reply(&self) -> MockReply {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockReply::Success("Mock reply".to_string()))
    }
}

#[async_trait]
impl CompletionService for MockCompletion {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        // Record the call
        self.calls.lock().unwrap().push(request);

        // Simulate delay
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_reply() {
            MockReply::Success(text) => Ok(text),
            MockReply::Error(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::TraceId;
    use crate::ports::MessageRole;

    fn test_request() -> CompletionRequest {
        CompletionRequest::new(TraceId::new()).with_message(MessageRole::User, "Namaste")
    }

    #[tokio::test]
    async fn mock_returns_configured_reply() {
        let service = MockCompletion::new().with_reply("Namaste ji!");

        let text = service.complete(test_request()).await.unwrap();

        assert_eq!(text, "Namaste ji!");
    }

    #[tokio::test]
    async fn mock_returns_replies_in_order() {
        let service = MockCompletion::new()
            .with_reply("First")
            .with_reply("Second")
            .with_reply("Third");

        let r1 = service.complete(test_request()).await.unwrap();
        let r2 = service.complete(test_request()).await.unwrap();
        let r3 = service.complete(test_request()).await.unwrap();

        assert_eq!(r1, "First");
        assert_eq!(r2, "Second");
        assert_eq!(r3, "Third");
    }

    #[tokio::test]
    async fn mock_returns_default_after_exhausted() {
        let service = MockCompletion::new().with_reply("Only one");

        let r1 = service.complete(test_request()).await.unwrap();
        let r2 = service.complete(test_request()).await.unwrap();

        assert_eq!(r1, "Only one");
        assert_eq!(r2, "Mock reply");
    }

    #[tokio::test]
    async fn mock_returns_configured_error() {
        let service = MockCompletion::new()
            .with_error(MockError::RateLimited { retry_after_secs: 30 });

        let result = service.complete(test_request()).await;

        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.is_retryable());
        assert!(matches!(err, CompletionError::RateLimited { retry_after_secs: 30 }));
    }

    #[tokio::test]
    async fn mock_tracks_calls() {
        let service = MockCompletion::new()
            .with_reply("Reply 1")
            .with_reply("Reply 2");

        assert_eq!(service.call_count(), 0);

        service.complete(test_request()).await.unwrap();
        assert_eq!(service.call_count(), 1);

        service.complete(test_request()).await.unwrap();
        assert_eq!(service.call_count(), 2);

        service.clear_calls();
        assert_eq!(service.call_count(), 0);
    }

    #[tokio::test]
    async fn mock_records_request_contents() {
        let service = MockCompletion::new().with_reply("ok");

        let request = test_request().with_system_prompt("classify the intent");
        service.complete(request).await.unwrap();

        let calls = service.get_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].system_prompt.as_deref(), Some("classify the intent"));
        assert_eq!(calls[0].messages[0].content, "Namaste");
    }

    #[tokio::test]
    async fn mock_respects_delay() {
        let service = MockCompletion::new()
            .with_reply("Delayed")
            .with_delay(Duration::from_millis(50));

        let start = std::time::Instant::now();
        service.complete(test_request()).await.unwrap();
        let elapsed = start.elapsed();

        assert!(elapsed >= Duration::from_millis(50));
    }

    #[test]
    fn mock_error_converts_to_completion_error() {
        let err: CompletionError = MockError::RateLimited { retry_after_secs: 10 }.into();
        assert!(matches!(err, CompletionError::RateLimited { retry_after_secs: 10 }));

        let err: CompletionError = MockError::AuthenticationFailed.into();
        assert!(matches!(err, CompletionError::AuthenticationFailed));

        let err: CompletionError = MockError::Timeout { timeout_secs: 8 }.into();
        assert!(matches!(err, CompletionError::Timeout { timeout_secs: 8 }));
    }
}
