//! Local persistent key-value storage behind a trait seam.
//!
//! The browser's `localStorage` is where the legacy game kept its card,
//! deck, and battle-deck collections, and where the session id lives. The
//! [`LocalStore`] trait lets the client and the migration coordinator run
//! against an in-memory store on native targets and in tests.

use crate::services::errors::DbResult;

#[cfg(target_arch = "wasm32")]
use crate::services::errors::DbError;
#[cfg(target_arch = "wasm32")]
use gloo_storage::{LocalStorage, Storage};

/// Synchronous get/set-by-key string storage.
///
/// Values are raw strings; JSON decoding (and the empty-collection
/// fallback for absent keys) is the caller's concern.
pub trait LocalStore {
    fn get_raw(&self, key: &str) -> Option<String>;
    fn set_raw(&self, key: &str, value: &str) -> DbResult<()>;
    fn remove(&self, key: &str);
}

/// `localStorage`-backed store for browser builds.
///
/// Raw string access is deliberate: the legacy collections were written by
/// JavaScript with `localStorage.setItem`, so the JSON-wrapping codecs of
/// higher-level storage helpers would not round-trip them.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct BrowserStore;

#[cfg(target_arch = "wasm32")]
impl BrowserStore {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(target_arch = "wasm32")]
impl LocalStore for BrowserStore {
    fn get_raw(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set_raw(&self, key: &str, value: &str) -> DbResult<()> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| DbError::Storage {
                message: format!("localStorage write for '{}' rejected: {:?}", key, e),
            })
    }

    fn remove(&self, key: &str) {
        let _ = LocalStorage::raw().remove_item(key);
    }
}

/// In-memory store used on native targets and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: std::cell::RefCell<std::collections::HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set_raw(&self, key: &str, value: &str) -> DbResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}
