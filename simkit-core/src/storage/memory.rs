//! In-memory session storage.

use std::collections::HashMap;
use std::sync::RwLock;

use super::{SessionStorage, StorageError, StorageResult};

/// Session storage backed by a `HashMap`. Values live as long as the process.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    values: RwLock<HashMap<String, String>>,
}

impl MemorySessionStorage {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.read().map_or(0, |values| values.len())
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> StorageError {
    StorageError::Backend("session storage lock poisoned".to_string())
}

impl SessionStorage for MemorySessionStorage {
    fn get(&self, key: String) -> StorageResult<Option<String>> {
        Ok(self.values.read().map_err(poisoned)?.get(&key).cloned())
    }

    fn set(&self, key: String, value: String) -> StorageResult<()> {
        self.values.write().map_err(poisoned)?.insert(key, value);
        Ok(())
    }

    fn remove(&self, key: String) -> StorageResult<()> {
        self.values.write().map_err(poisoned)?.remove(&key);
        Ok(())
    }
}
