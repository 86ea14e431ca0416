use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use academia_core::{DurableStorage, StorageError, StorageWrite};

/// Storage backed by a single JSON object on disk.
///
/// Every batch rewrites the whole file through a sibling temp file that is flushed to disk
/// before it is renamed over the original, so a crash leaves either the old or the new
/// contents, never a mix.
pub struct JsonFileStorage {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl JsonFileStorage {
    /// Open the file at `path`, creating parent directories as needed.
    ///
    /// A missing file starts empty. An unreadable one is logged and also starts empty, so one
    /// corrupt file cannot lock the user out.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StorageError::Io(e.to_string()))?;
        }

        let entries = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => HashMap::new(),
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable storage file");
                HashMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(StorageError::Io(e.to_string())),
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.entries.lock().map_err(|_| StorageError::Poisoned)
    }

    fn write_atomically(&self, entries: &HashMap<String, String>) -> Result<(), StorageError> {
        let contents = serde_json::to_vec_pretty(entries)
            .map_err(|e| StorageError::UnexpectedError(e.to_string()))?;

        let mut temp_name = self.path.as_os_str().to_owned();
        temp_name.push(".tmp");
        let temp_path = PathBuf::from(temp_name);

        let mut temp_file =
            fs::File::create(&temp_path).map_err(|e| StorageError::Io(e.to_string()))?;
        temp_file
            .write_all(&contents)
            .and_then(|()| temp_file.sync_all())
            .map_err(|e| {
                let _ = fs::remove_file(&temp_path);
                StorageError::Io(e.to_string())
            })?;
        drop(temp_file);

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            StorageError::Io(e.to_string())
        })
    }
}

impl DurableStorage for JsonFileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock()?.get(key).cloned())
    }

    #[tracing::instrument(name = "JsonFileStorage::apply", skip_all, fields(writes = writes.len()))]
    fn apply(&self, writes: &[StorageWrite<'_>]) -> Result<(), StorageError> {
        let mut entries = self.lock()?;

        let mut next = entries.clone();
        for write in writes {
            match write {
                StorageWrite::Set(key, value) => {
                    next.insert(key.to_string(), value.to_string());
                }
                StorageWrite::Remove(key) => {
                    next.remove(*key);
                }
            }
        }

        // The cache only moves once the file has.
        self.write_atomically(&next)?;
        *entries = next;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use academia_core::{CURRENT_USER_KEY, TOKEN_KEY};
    use fake::{Fake, faker::internet::en::SafeEmail};

    use super::*;

    #[test]
    fn entries_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let email: String = SafeEmail().fake();
        let identity = serde_json::json!({ "email": email }).to_string();

        let storage = JsonFileStorage::open(&path).unwrap();
        storage
            .apply(&[
                StorageWrite::Set(CURRENT_USER_KEY, &identity),
                StorageWrite::Set(TOKEN_KEY, "abc"),
            ])
            .unwrap();
        drop(storage);

        let reopened = JsonFileStorage::open(&path).unwrap();
        assert_eq!(reopened.get(CURRENT_USER_KEY).unwrap(), Some(identity));
        assert_eq!(reopened.get(TOKEN_KEY).unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn removal_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let storage = JsonFileStorage::open(&path).unwrap();
        storage.set(TOKEN_KEY, "abc").unwrap();

        storage.remove(TOKEN_KEY).unwrap();

        let on_disk: HashMap<String, String> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(on_disk.is_empty());
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state").join("session.json");

        let storage = JsonFileStorage::open(&path).unwrap();
        storage.set(TOKEN_KEY, "abc").unwrap();

        assert!(path.exists());
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{ definitely not json").unwrap();

        let storage = JsonFileStorage::open(&path).unwrap();

        assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let storage = JsonFileStorage::open(&path).unwrap();

        storage.set(TOKEN_KEY, "abc").unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("session.json")]);
    }

    #[test]
    fn failed_write_keeps_previous_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let storage = JsonFileStorage::open(&path).unwrap();
        storage.set(TOKEN_KEY, "abc").unwrap();

        // A directory where the temp file should go makes the write fail.
        fs::create_dir(dir.path().join("session.json.tmp")).unwrap();
        let result = storage.set(TOKEN_KEY, "xyz");

        assert!(result.is_err());
        assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some("abc"));
    }
}
