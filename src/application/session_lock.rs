//! Per-session turn serialization.
//!
//! Two concurrent turns for the same session key would race on
//! load-merge-save and silently drop one turn's state. A per-key async
//! mutex makes turns for one citizen strictly sequential while leaving
//! different citizens fully parallel.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::foundation::SessionKey;

/// Registry of per-session locks. Entries are created on first use and
/// kept for the registry's lifetime.
pub struct SessionLocks {
    locks: Mutex<HashMap<SessionKey, Arc<Mutex<()>>>>,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Waits for exclusive ownership of `key`'s turn slot. The guard
    /// must be held across the whole load-process-save span.
    pub async fn acquire(&self, key: &SessionKey) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            Arc::clone(locks.entry(key.clone()).or_default())
        };
        lock.lock_owned().await
    }
}

impl Default for SessionLocks {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    fn key(s: &str) -> SessionKey {
        SessionKey::new(s).unwrap()
    }

    #[tokio::test]
    async fn distinct_keys_do_not_block_each_other() {
        let locks = SessionLocks::new();
        let _held = locks.acquire(&key("citizen-a")).await;

        let other = timeout(Duration::from_millis(50), locks.acquire(&key("citizen-b"))).await;
        assert!(other.is_ok());
    }

    #[tokio::test]
    async fn same_key_serializes_turns() {
        let locks = SessionLocks::new();
        let held = locks.acquire(&key("citizen-a")).await;

        let blocked = timeout(Duration::from_millis(50), locks.acquire(&key("citizen-a"))).await;
        assert!(blocked.is_err());

        drop(held);
        let reacquired =
            timeout(Duration::from_millis(50), locks.acquire(&key("citizen-a"))).await;
        assert!(reacquired.is_ok());
    }
}
