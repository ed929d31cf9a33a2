//! Fail-safe adapter over [`SessionStorage`].

use std::sync::Arc;

use super::SessionStorage;

/// Wraps a [`SessionStorage`] so that storage failures never reach the caller.
///
/// Every failure (quota exceeded, storage disabled, IO errors, ...) is logged and turned
/// into a no-op: a failed `save` leaves the store untouched, a failed `load` reads as
/// absent and a failed `remove` keeps the old value.
#[derive(Clone)]
pub struct SessionPersistence {
    storage: Arc<dyn SessionStorage>,
}

impl SessionPersistence {
    /// Wraps `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    /// Stores `value` under `key`. Returns whether the write went through.
    pub fn save(&self, key: &str, value: String) -> bool {
        match self.storage.set(key.to_string(), value) {
            Ok(()) => true,
            Err(err) => {
                log::error!("Unable to persist session value '{key}', {err}");
                false
            }
        }
    }

    /// Reads the value stored under `key`. Read failures are reported as absent.
    #[must_use]
    pub fn load(&self, key: &str) -> Option<String> {
        self.storage.get(key.to_string()).unwrap_or_else(|err| {
            log::error!("Unable to read session value '{key}', {err}");
            None
        })
    }

    /// Removes the value stored under `key`.
    pub fn remove(&self, key: &str) {
        if let Err(err) = self.storage.remove(key.to_string()) {
            log::error!("Unable to remove session value '{key}', {err}");
        }
    }
}

impl std::fmt::Debug for SessionPersistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionPersistence").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemorySessionStorage, StorageError, StorageResult};

    struct BrokenStorage;

    impl SessionStorage for BrokenStorage {
        fn get(&self, _key: String) -> StorageResult<Option<String>> {
            Err(StorageError::Backend("storage disabled".to_string()))
        }

        fn set(&self, _key: String, _value: String) -> StorageResult<()> {
            Err(StorageError::Backend("quota exceeded".to_string()))
        }

        fn remove(&self, _key: String) -> StorageResult<()> {
            Err(StorageError::Backend("storage disabled".to_string()))
        }
    }

    #[test]
    fn test_passes_through_to_storage() {
        let storage = Arc::new(MemorySessionStorage::new());
        let persistence = SessionPersistence::new(storage.clone());

        assert!(persistence.save("Identity", "value".to_string()));
        assert_eq!(persistence.load("Identity").as_deref(), Some("value"));

        persistence.remove("Identity");
        assert_eq!(persistence.load("Identity"), None);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_failures_are_swallowed() {
        let persistence = SessionPersistence::new(Arc::new(BrokenStorage));

        assert!(!persistence.save("Identity", "value".to_string()));
        assert_eq!(persistence.load("Identity"), None);
        persistence.remove("Identity");
    }
}
