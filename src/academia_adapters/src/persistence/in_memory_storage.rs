use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use academia_core::{DurableStorage, StorageError, StorageWrite};

/// Process-local storage; sessions do not outlive the process.
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DurableStorage for InMemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn apply(&self, writes: &[StorageWrite<'_>]) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        for write in writes {
            match write {
                StorageWrite::Set(key, value) => {
                    entries.insert(key.to_string(), value.to_string());
                }
                StorageWrite::Remove(key) => {
                    entries.remove(*key);
                }
            }
        }
        Ok(())
    }
}
