//! In-memory settings store

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use super::SettingsStore;

/// Ephemeral store backed by a hash map
///
/// Values live for the process lifetime only. Intended for tests and for
/// hosts that do not want developer preferences to survive a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with initial values
    pub fn with_values(values: HashMap<String, Value>) -> Self {
        Self {
            values: Mutex::new(values),
        }
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Value>> {
        self.values.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SettingsStore for MemoryStore {
    fn set_value(&self, key: &str, value: &Value) {
        self.lock().insert(key.to_string(), value.clone());
    }

    fn value_for(&self, key: &str) -> Option<Value> {
        self.lock().get(key).cloned()
    }
}
