//! Local key-value storage.
//!
//! This is the persistence capability shared by the account store and the
//! session holder. Values are strings (usually JSON documents), writes replace
//! the value under a key, and readers get a snapshot at call time. There is no
//! cross-process locking: a single client owns the storage.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Key holding the current session user as a JSON object.
pub const AUTH_USER_KEY: &str = "auth_user";
/// Key whose presence records the "keep me logged in" preference.
pub const KEEP_LOGGED_IN_KEY: &str = "auth_keep_logged_in";
/// Key holding the JSON array of registered accounts.
pub const REGISTERED_USERS_KEY: &str = "registered_users";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage lock poisoned")]
    Poisoned,
}

pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// # Errors
    /// Returns an error if the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns an error if the backing medium cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`; removing a missing key is not an error.
    ///
    /// # Errors
    /// Returns an error if the backing medium cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
