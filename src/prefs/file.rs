use std::ffi::OsString;
use std::path::{
    Path,
    PathBuf,
};
use std::sync::{
    Mutex,
    PoisonError,
};

use serde_json::{
    Map,
    Value,
};

use super::{
    PreferenceStore,
    PrefsError,
};

/// Preferences persisted as a single JSON object.
///
/// The whole map is rewritten on every change.
#[derive(Debug)]
pub struct JsonFileStore {
    /// Backing file
    path: PathBuf,
    /// In-memory copy of the file contents
    values: Mutex<Map<String, Value>>,
}

impl JsonFileStore {
    /// Open the store at `path`.
    ///
    /// A missing file starts empty. A corrupt file is logged and replaced on
    /// the next write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PrefsError> {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Map<String, Value>>(&content) {
                Ok(values) => values,
                Err(e) => {
                    tracing::warn!("Discarding unreadable preferences file {:?}: {}", path, e);
                    Map::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("Preferences file not found: {:?}", path);
                Map::new()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self { path, values: Mutex::new(values) })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `values` to disk.
    ///
    /// The content goes to a sibling temp file that is then renamed over the
    /// store, so an interrupted write never leaves a truncated file behind.
    fn persist(&self, values: &Map<String, Value>) -> Result<(), PrefsError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_vec_pretty(values)?;

        let staging = self.staging_path();
        if let Err(e) = std::fs::write(&staging, content)
            .and_then(|()| std::fs::rename(&staging, &self.path))
        {
            let _ = std::fs::remove_file(&staging);
            return Err(e.into());
        }
        Ok(())
    }

    /// Temp file next to the store, on the same filesystem.
    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(OsString::from).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Apply `change` to a copy of the map and keep it only once it is on disk.
    fn update<T>(
        &self,
        change: impl FnOnce(&mut Map<String, Value>) -> T,
    ) -> Result<T, PrefsError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next = values.clone();
        let output = change(&mut next);
        self.persist(&next)?;
        *values = next;
        Ok(output)
    }
}

impl PreferenceStore for JsonFileStore {
    fn get_value(&self, key: &str) -> Option<Value> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner).get(key).cloned()
    }

    fn set_value(&self, key: &str, value: Value) -> Result<(), PrefsError> {
        self.update(|values| {
            values.insert(key.to_string(), value);
        })
    }

    fn delete(&self, key: &str) -> Result<bool, PrefsError> {
        if self.get_value(key).is_none() {
            return Ok(false);
        }
        self.update(|values| values.remove(key).is_some())
    }

    fn clear(&self) -> Result<(), PrefsError> {
        self.update(Map::clear)
    }
}
