//! In-memory session store for testing and single-server deployments.
//!
//! Holds sessions in a HashMap guarded by an async RwLock. TTL is
//! enforced at the interface: an expired record is purged on `load` and
//! never returned. Not suitable for multi-server deployments.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::domain::foundation::{SessionKey, Timestamp};
use crate::domain::session::Session;
use crate::ports::{SessionStore, SessionStoreError};

/// Sessions idle past this window are treated as abandoned.
const DEFAULT_TTL: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// In-memory session store with TTL-based expiry.
#[derive(Debug)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionKey, StoredRecord>>,
    ttl: Duration,
    /// Scripted failures, consumed in order across all operations.
    failures: Mutex<VecDeque<SessionStoreError>>,
}

/// A stored session with its expiry deadline.
#[derive(Debug, Clone)]
struct StoredRecord {
    session: Session,
    expires_at: Timestamp,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl InMemorySessionStore {
    /// Creates a store evicting sessions idle longer than `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
            failures: Mutex::new(VecDeque::new()),
        }
    }

    /// Creates a store with the default TTL.
    pub fn with_default_ttl() -> Self {
        Self::default()
    }

    /// Queues a failure for the next store operation (testing).
    pub fn with_failure(self, error: SessionStoreError) -> Self {
        self.failures.lock().unwrap().push_back(error);
        self
    }

    /// Number of live (unexpired) records.
    pub async fn live_count(&self) -> usize {
        let now = Timestamp::now();
        let sessions = self.sessions.read().await;
        sessions
            .values()
            .filter(|record| !now.is_after(&record.expires_at))
            .count()
    }

    fn deadline(&self) -> Timestamp {
        Timestamp::now().plus_secs(self.ttl.as_secs())
    }

    fn take_scripted_failure(&self) -> Option<SessionStoreError> {
        self.failures.lock().unwrap().pop_front()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, key: &SessionKey) -> Result<Option<Session>, SessionStoreError> {
        if let Some(error) = self.take_scripted_failure() {
            return Err(error);
        }

        let now = Timestamp::now();

        // Fast path under the read lock; expired records need the write
        // lock to purge.
        {
            let sessions = self.sessions.read().await;
            match sessions.get(key) {
                None => return Ok(None),
                Some(record) if !now.is_after(&record.expires_at) => {
                    return Ok(Some(record.session.clone()));
                }
                Some(_) => {}
            }
        }

        let mut sessions = self.sessions.write().await;
        if let Some(record) = sessions.get(key) {
            if now.is_after(&record.expires_at) {
                sessions.remove(key);
            } else {
                return Ok(Some(record.session.clone()));
            }
        }
        Ok(None)
    }

    async fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        if let Some(error) = self.take_scripted_failure() {
            return Err(error);
        }

        let record = StoredRecord {
            session: session.clone(),
            expires_at: self.deadline(),
        };

        let mut sessions = self.sessions.write().await;
        sessions.insert(session.key().clone(), record);
        Ok(())
    }

    async fn touch_ttl(&self, key: &SessionKey) -> Result<(), SessionStoreError> {
        if let Some(error) = self.take_scripted_failure() {
            return Err(error);
        }

        let deadline = self.deadline();
        let mut sessions = self.sessions.write().await;
        if let Some(record) = sessions.get_mut(key) {
            record.expires_at = deadline;
        }
        Ok(())
    }

    async fn delete(&self, key: &SessionKey) -> Result<(), SessionStoreError> {
        if let Some(error) = self.take_scripted_failure() {
            return Err(error);
        }

        let mut sessions = self.sessions.write().await;
        sessions.remove(key);
        Ok(())
    }
}
