use std::collections::HashMap;
use std::sync::{
    Mutex,
    PoisonError,
};

use serde_json::Value;

use super::{
    PreferenceStore,
    PrefsError,
};

/// Preferences held in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Stored values
    values: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get_value(&self, key: &str) -> Option<Value> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner).get(key).cloned()
    }

    fn set_value(&self, key: &str, value: Value) -> Result<(), PrefsError> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner).insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool, PrefsError> {
        Ok(self.values.lock().unwrap_or_else(PoisonError::into_inner).remove(key).is_some())
    }

    fn clear(&self) -> Result<(), PrefsError> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner).clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use serde_json::json;

    use super::*;

    #[googletest::test]
    fn delete_and_clear() {
        let store = MemoryStore::new();
        store.set_value("a", json!(1)).ok();
        store.set_value("b", json!(2)).ok();

        expect_that!(store.delete("a").ok(), some(eq(true)));
        expect_that!(store.delete("a").ok(), some(eq(false)));
        expect_that!(store.get_value("b").is_some(), eq(true));

        expect_that!(store.clear(), ok(anything()));
        expect_that!(store.get_value("b").is_none(), eq(true));
    }
}
