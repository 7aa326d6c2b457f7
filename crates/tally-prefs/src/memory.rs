//! # In-Memory Store
//!
//! A string key-value store holding the record as JSON text under one key,
//! the way a browser's local storage would. Used by tests and by the
//! terminal when persistence is turned off.

use std::collections::HashMap;

use serde_json::Value;
use tally_core::{PreferenceRecord, PreferenceStore};
use tracing::warn;

use crate::error::{PrefsError, PrefsResult};

/// Key the record is stored under.
pub const STORAGE_KEY: &str = "tally.preferences";

/// In-memory preference store with failure injection.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    fail_writes: bool,
    writes: usize,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose writes all fail.
    pub fn failing() -> Self {
        MemoryStore {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// Turns write failures on or off.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Places raw text under the storage key, bypassing serialization.
    pub fn put_raw(&mut self, text: impl Into<String>) {
        self.entries.insert(STORAGE_KEY.to_string(), text.into());
    }

    /// Raw text under the storage key.
    pub fn raw(&self) -> Option<&str> {
        self.entries.get(STORAGE_KEY).map(String::as_str)
    }

    /// Number of successful writes.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Serializes and stores the record.
    pub fn save(&mut self, record: &PreferenceRecord) -> PrefsResult<()> {
        if self.fail_writes {
            return Err(PrefsError::Rejected("write failures injected".into()));
        }
        let text = serde_json::to_string(record)?;
        self.entries.insert(STORAGE_KEY.to_string(), text);
        self.writes += 1;
        Ok(())
    }

    /// Reads and parses the stored record.
    pub fn load(&self) -> PrefsResult<Option<PreferenceRecord>> {
        let Some(text) = self.raw() else {
            return Ok(None);
        };
        match serde_json::from_str::<Value>(text)? {
            Value::Object(record) => Ok(Some(record)),
            _ => Err(PrefsError::NotAnObject(text.to_string())),
        }
    }
}

impl PreferenceStore for MemoryStore {
    fn try_save(&mut self, record: &PreferenceRecord) -> bool {
        match self.save(record) {
            Ok(()) => true,
            Err(e) => {
                warn!(key = STORAGE_KEY, error = %e, "Failed to save preferences");
                false
            }
        }
    }

    fn try_load(&self) -> Option<PreferenceRecord> {
        self.load().unwrap_or_else(|e| {
            warn!(key = STORAGE_KEY, error = %e, "Failed to load preferences. Using defaults.");
            None
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_roundtrip_under_single_key() {
        let mut store = MemoryStore::new();
        let record = json!({ "people": 2 }).as_object().cloned().unwrap();

        assert!(store.try_save(&record));
        assert_eq!(store.raw(), Some(r#"{"people":2}"#));
        assert_eq!(store.try_load(), Some(record));
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn test_injected_failure_keeps_previous_value() {
        let mut store = MemoryStore::new();
        let first = json!({ "people": 2 }).as_object().cloned().unwrap();
        let second = json!({ "people": 5 }).as_object().cloned().unwrap();

        store.try_save(&first);
        store.set_fail_writes(true);
        assert!(!store.try_save(&second));
        assert_eq!(store.try_load(), Some(first));
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn test_garbage_loads_none() {
        let mut store = MemoryStore::new();
        store.put_raw("not json");
        assert!(store.try_load().is_none());

        store.put_raw("42");
        assert!(matches!(store.load(), Err(PrefsError::NotAnObject(_))));
    }

    #[test]
    fn test_failing_store_starts_empty() {
        let mut store = MemoryStore::failing();
        assert!(store.try_load().is_none());
        assert!(!store.try_save(&PreferenceRecord::new()));
    }
}
