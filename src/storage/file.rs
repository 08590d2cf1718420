use super::{KeyValueStore, StorageError};
use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing::warn;

const STORAGE_FILE: &str = "storage.json";

/// Storage persisted as a single JSON object (`key -> string value`) inside a
/// data directory. Every write rewrites the whole document.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Opens (and creates, if needed) the storage directory.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created.
    pub fn open(data_dir: &Path) -> Result<Self, StorageError> {
        fs::create_dir_all(data_dir)?;
        let path = data_dir.join(STORAGE_FILE);
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(err.into()),
        };

        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        // A damaged document reads as empty storage.
        Ok(serde_json::from_str(&raw).unwrap_or_else(|err| {
            warn!("Ignoring malformed storage file {}: {err}", self.path.display());
            BTreeMap::new()
        }))
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let serialized = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serialized)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn update<F>(&self, apply: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let _guard = self.write_lock.lock().map_err(|_| StorageError::Poisoned)?;
        let mut entries = self.read_entries()?;
        apply(&mut entries);
        self.write_entries(&entries)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn values_survive_reopen() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = FileStore::open(dir.path())?;
        store.set("registered_users", "[]")?;
        store.set("auth_keep_logged_in", "true")?;

        let reopened = FileStore::open(dir.path())?;
        assert_eq!(reopened.get("registered_users")?, Some("[]".to_string()));
        assert_eq!(reopened.get("auth_keep_logged_in")?, Some("true".to_string()));
        Ok(())
    }

    #[test]
    fn missing_file_reads_as_empty() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = FileStore::open(&dir.path().join("nested"))?;
        assert_eq!(store.get("auth_user")?, None);
        Ok(())
    }

    #[test]
    fn malformed_file_reads_as_empty_and_is_replaced_on_write() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = FileStore::open(dir.path())?;
        fs::write(store.path(), "{not json")?;

        assert_eq!(store.get("auth_user")?, None);

        store.set("auth_user", "{}")?;
        assert_eq!(store.get("auth_user")?, Some("{}".to_string()));
        Ok(())
    }

    #[test]
    fn remove_only_drops_the_given_key() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = FileStore::open(dir.path())?;
        store.set("a", "1")?;
        store.set("b", "2")?;
        store.remove("a")?;
        store.remove("missing")?;

        assert_eq!(store.get("a")?, None);
        assert_eq!(store.get("b")?, Some("2".to_string()));
        Ok(())
    }
}
