//! Retrying Completion Service - Wrapper that retries transient failures.
//!
//! When the inner service fails with a retryable error (rate limit,
//! unavailable, network, timeout), waits a short backoff and tries
//! again, up to a small cap. A turn is conversational, so the cap
//! defaults to one extra attempt; callers degrade to a canned reply
//! when that also fails.
//!
//! # Example
//!
//! ```ignore
//! let inner = AnthropicCompletion::new(config);
//! let service = RetryingCompletion::new(inner).with_max_retries(1);
//! ```

use async_trait::async_trait;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

use crate::ports::{CompletionError, CompletionRequest, CompletionService};

/// Base delay before a retry; doubles per additional attempt.
const RETRY_BASE_DELAY: Duration = Duration::from_millis(200);

/// Completion wrapper with capped retry on transient failures.
pub struct RetryingCompletion<S: CompletionService> {
    inner: S,
    max_retries: u32,
}

impl<S: CompletionService> RetryingCompletion<S> {
    /// Wraps the inner service with a single-retry policy.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            max_retries: 1,
        }
    }

    /// Sets the retry cap.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

#[async_trait]
impl<S: CompletionService + 'static> CompletionService for RetryingCompletion<S> {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        let mut attempt = 0;

        loop {
            match self.inner.complete(request.clone()).await {
                Ok(text) => return Ok(text),
                Err(err) if err.is_retryable() && attempt < self.max_retries => {
                    warn!(
                        trace_id = %request.trace_id,
                        attempt,
                        error = %err,
                        "completion failed, retrying"
                    );
                    sleep(RETRY_BASE_DELAY * 2u32.pow(attempt)).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
