//! Session Store Port - conversation persistence.
//!
//! `load` distinguishes "no such session" (Ok(None)) from a store that
//! cannot answer at all. An expired record behaves exactly like a
//! missing one. `delete` backs the citizen's right to erasure.

use async_trait::async_trait;

use crate::domain::foundation::SessionKey;
use crate::domain::session::Session;

/// Port for session persistence.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Fetches a session, or None when absent or expired.
    async fn load(&self, key: &SessionKey) -> Result<Option<Session>, SessionStoreError>;

    /// Writes the session. Last write wins per key.
    async fn save(&self, session: &Session) -> Result<(), SessionStoreError>;

    /// Extends the session's expiry without rewriting it.
    async fn touch_ttl(&self, key: &SessionKey) -> Result<(), SessionStoreError>;

    /// Removes the session and everything it holds.
    async fn delete(&self, key: &SessionKey) -> Result<(), SessionStoreError>;
}

/// Session store errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    /// Store cannot be reached.
    #[error("session store unavailable: {message}")]
    Unavailable { message: String },

    /// The stored document could not be encoded or decoded.
    #[error("session serialization failed: {0}")]
    Serialization(String),
}

impl SessionStoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, SessionStoreError::Unavailable { .. })
    }
}
