// ============================================================================
// STORAGE - Key/value persistence (localStorage in the browser)
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;

use gloo_storage::{LocalStorage, Storage};

/// Raw string storage. Writes are best effort: a full or disabled
/// localStorage must never break the UI.
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `window.localStorage`, survives page reloads.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if LocalStorage::raw().set_item(key, value).is_err() {
            log::error!("❌ [STORAGE] Could not write '{}' to localStorage", key);
        }
    }

    fn remove(&self, key: &str) {
        if LocalStorage::raw().remove_item(key).is_err() {
            log::warn!("⚠️ [STORAGE] Could not remove '{}' from localStorage", key);
        }
    }
}

/// In-process storage for non-browser hosts.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_round_trip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("token"), None);
        storage.set("token", "abc");
        assert_eq!(storage.get("token").as_deref(), Some("abc"));
        storage.remove("token");
        assert_eq!(storage.get("token"), None);
    }
}
