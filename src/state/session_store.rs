// ============================================================================
// SESSION STORE - Bearer credential, persisted across reloads
// ============================================================================

use std::rc::Rc;

use crate::utils::KeyValueStorage;

/// The only route to the session credential. Cheap to clone; clones
/// share the same backing storage.
#[derive(Clone)]
pub struct SessionStore {
    storage: Rc<dyn KeyValueStorage>,
    key: String,
}

impl SessionStore {
    pub fn new(storage: Rc<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn get(&self) -> Option<String> {
        self.storage.get(&self.key).filter(|token| !token.is_empty())
    }

    pub fn set(&self, token: &str) {
        log::info!("🔐 [SESSION] Session stored");
        self.storage.set(&self.key, token);
    }

    pub fn clear(&self) {
        log::info!("👋 [SESSION] Session cleared");
        self.storage.remove(&self.key);
    }

    pub fn is_present(&self) -> bool {
        self.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::MemoryStorage;

    #[test]
    fn lifecycle_set_then_clear() {
        let store = SessionStore::new(Rc::new(MemoryStorage::new()), "token");
        assert!(!store.is_present());

        store.set("jwt-123");
        assert_eq!(store.get().as_deref(), Some("jwt-123"));

        store.clear();
        assert!(!store.is_present());
    }

    #[test]
    fn survives_a_reload() {
        let storage: Rc<dyn KeyValueStorage> = Rc::new(MemoryStorage::new());
        SessionStore::new(storage.clone(), "token").set("jwt-123");

        let reloaded = SessionStore::new(storage, "token");
        assert_eq!(reloaded.get().as_deref(), Some("jwt-123"));
    }

    #[test]
    fn empty_value_counts_as_absent() {
        let storage = Rc::new(MemoryStorage::new());
        storage.set("token", "");
        let store = SessionStore::new(storage, "token");
        assert!(!store.is_present());
    }
}
