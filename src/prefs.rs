//! Typed key-value preferences.
//!
//! Backends store `serde_json::Value`s; [`PreferenceStoreExt`] layers typed
//! access on top. Reads never fail: a missing key or a value of the wrong
//! shape yields `None` (or the supplied default).

mod file;
mod memory;

use std::fmt::Debug;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

#[derive(Error, Debug)]
pub enum PrefsError {
    #[error("Failed to access preferences file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to serialize preference: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Raw preference storage.
pub trait PreferenceStore: Send + Sync + Debug {
    /// Stored value for `key`, if any.
    fn get_value(&self, key: &str) -> Option<Value>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_value(&self, key: &str, value: Value) -> Result<(), PrefsError>;

    /// Remove `key`. Returns whether it was present.
    fn delete(&self, key: &str) -> Result<bool, PrefsError>;

    /// Remove every key.
    fn clear(&self) -> Result<(), PrefsError>;
}

/// Typed helpers over any [`PreferenceStore`].
pub trait PreferenceStoreExt: PreferenceStore {
    fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), PrefsError> {
        let value = serde_json::to_value(value)?;
        self.set_value(key, value)
    }

    fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.get_value(key)?;
        match serde_json::from_value(value) {
            Ok(typed) => Some(typed),
            Err(e) => {
                tracing::debug!(key, "Ignoring preference with unexpected shape: {}", e);
                None
            }
        }
    }

    fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }
}

impl<S: PreferenceStore + ?Sized> PreferenceStoreExt for S {}
