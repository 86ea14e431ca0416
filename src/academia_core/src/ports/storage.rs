use thiserror::Error;

/// Key holding the serialized identity.
pub const CURRENT_USER_KEY: &str = "currentUser";
/// Key holding the raw bearer token.
pub const TOKEN_KEY: &str = "token";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(String),
    #[error("Storage lock poisoned")]
    Poisoned,
    #[error("Unexpected storage error: {0}")]
    UnexpectedError(String),
}

impl PartialEq for StorageError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::Io(_), Self::Io(_))
                | (Self::Poisoned, Self::Poisoned)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// One mutation in a storage batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageWrite<'a> {
    Set(&'a str, &'a str),
    Remove(&'a str),
}

/// Durable, string-valued key-value storage that survives restarts.
///
/// Implementations must apply a batch all-or-nothing so that the identity and the token never
/// disagree on disk.
pub trait DurableStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn apply(&self, writes: &[StorageWrite<'_>]) -> Result<(), StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.apply(&[StorageWrite::Set(key, value)])
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.apply(&[StorageWrite::Remove(key)])
    }
}
