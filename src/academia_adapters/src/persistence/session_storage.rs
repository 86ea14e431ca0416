use academia_core::{DurableStorage, StorageError, StorageWrite};

use super::{InMemoryStorage, JsonFileStorage};
use crate::config::StorageSettings;

/// The storage backend picked by configuration.
pub enum SessionStorage {
    Memory(InMemoryStorage),
    File(JsonFileStorage),
}

impl SessionStorage {
    pub fn from_settings(settings: &StorageSettings) -> Result<Self, StorageError> {
        match &settings.path {
            Some(path) => {
                tracing::info!(path = %path.display(), "Persisting session to file");
                Ok(Self::File(JsonFileStorage::open(path)?))
            }
            None => {
                tracing::info!("Keeping session in memory only");
                Ok(Self::Memory(InMemoryStorage::new()))
            }
        }
    }
}

impl DurableStorage for SessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            Self::Memory(storage) => storage.get(key),
            Self::File(storage) => storage.get(key),
        }
    }

    fn apply(&self, writes: &[StorageWrite<'_>]) -> Result<(), StorageError> {
        match self {
            Self::Memory(storage) => storage.apply(writes),
            Self::File(storage) => storage.apply(writes),
        }
    }
}
