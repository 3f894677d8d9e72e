//! Persisted sign-in state.
//!
//! Only the user id crosses sessions; the `User` row itself is always
//! re-fetched so the client never holds a stale copy.

use tracing::info;

use crate::services::errors::DbResult;
use crate::services::storage::LocalStore;

const SESSION_KEY: &str = "token_session";

/// Stores the signed-in user's id in the local persistent store.
#[derive(Debug, Clone)]
pub struct SessionManager {
    storage_key: &'static str,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionManager {
    pub fn new() -> Self {
        Self {
            storage_key: SESSION_KEY,
        }
    }

    pub fn store(&self, store: &dyn LocalStore, user_id: &str) -> DbResult<()> {
        store.set_raw(self.storage_key, user_id)?;
        info!(user_id, "session stored");
        Ok(())
    }

    pub fn current(&self, store: &dyn LocalStore) -> Option<String> {
        store
            .get_raw(self.storage_key)
            .filter(|id| !id.is_empty())
    }

    pub fn clear(&self, store: &dyn LocalStore) {
        store.remove(self.storage_key);
        info!("session cleared");
    }
}
