//! Account records and the mock account store.
//!
//! Accounts are kept as one JSON array under [`REGISTERED_USERS_KEY`]. Reads
//! fail soft: a payload that is not an array reads as an empty list, and a
//! record that cannot be decoded is skipped on its own. Writes replace the
//! whole collection.

use crate::storage::{KeyValueStore, REGISTERED_USERS_KEY, StorageError};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::{fmt, sync::Arc};
use tracing::warn;

/// A registered account. The password is stored in plain text.
///
/// Missing fields decode as empty strings, so older or hand-edited records
/// survive a read-modify-write cycle.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub role: String,
    pub department: String,
    pub position: String,
    pub description: String,
    pub username: String,
    pub password: String,
}

impl Account {
    #[must_use]
    pub fn new(id: String, registration: Registration) -> Self {
        Self {
            id,
            full_name: registration.full_name,
            email: registration.email,
            phone_number: registration.phone_number,
            role: registration.role,
            department: registration.department,
            position: registration.position,
            description: registration.description,
            username: registration.username,
            password: registration.password,
        }
    }

    /// Reduced projection handed to the session holder.
    #[must_use]
    pub fn session_user(&self) -> SessionUser {
        SessionUser {
            id: self.id.clone(),
            username: self.username.clone(),
            full_name: self.full_name.clone(),
        }
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password", &"***")
            .finish_non_exhaustive()
    }
}

/// The authenticated user as seen by the rest of the application.
///
/// Only `id` must be a string; anything else in `username` or `fullName`
/// (null, a number) reads as empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub username: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub full_name: String,
}

fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(value) => Ok(value),
        _ => Ok(String::new()),
    }
}

/// A fully populated registration, ready to be submitted.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Registration {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub role: String,
    pub department: String,
    pub position: String,
    pub description: String,
    pub username: String,
    pub password: String,
}

impl Registration {
    /// Copy with every field trimmed, as stored by the auth service.
    #[must_use]
    pub fn trimmed(&self) -> Self {
        Self {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
            role: self.role.trim().to_string(),
            department: self.department.trim().to_string(),
            position: self.position.trim().to_string(),
            description: self.description.trim().to_string(),
            username: self.username.trim().to_string(),
            password: self.password.trim().to_string(),
        }
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("phone_number", &self.phone_number)
            .field("role", &self.role)
            .field("department", &self.department)
            .field("position", &self.position)
            .field("description", &self.description)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

pub trait AccountRepository: Send + Sync {
    /// Every stored account; never fails.
    fn list(&self) -> Vec<Account>;

    /// Replaces the stored collection with `accounts`.
    ///
    /// # Errors
    /// Returns an error if the collection cannot be written.
    fn persist(&self, accounts: &[Account]) -> Result<(), StorageError>;
}

/// Account repository over the local key-value storage.
#[derive(Clone)]
pub struct StoredAccounts {
    store: Arc<dyn KeyValueStore>,
}

impl StoredAccounts {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

impl AccountRepository for StoredAccounts {
    fn list(&self) -> Vec<Account> {
        let raw = match self.store.get(REGISTERED_USERS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!("Failed to read registered accounts: {err}");
                return Vec::new();
            }
        };

        let records = match serde_json::from_str::<Vec<Value>>(&raw) {
            Ok(records) => records,
            Err(err) => {
                warn!("Ignoring malformed registered accounts: {err}");
                return Vec::new();
            }
        };

        records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| {
                serde_json::from_value::<Account>(record)
                    .map_err(|err| warn!("Skipping registered account #{index}: {err}"))
                    .ok()
            })
            .collect()
    }

    fn persist(&self, accounts: &[Account]) -> Result<(), StorageError> {
        let serialized = serde_json::to_string(accounts)?;
        self.store.set(REGISTERED_USERS_KEY, &serialized)
    }
}
