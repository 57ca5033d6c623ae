//! File-backed settings store

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::Value;

use crate::types::Result;

use super::SettingsStore;

/// Directory under the platform data-local dir holding the default store
const DEFAULT_STORE_DIR: &str = "dev-support";

/// Default settings file name
const STORE_FILE: &str = "dev_settings.json";

/// Durable store persisting settings as a JSON object file
///
/// The file is read once at open; every write updates the in-memory map and
/// rewrites the file. Write failures after open are logged and do not fail
/// the caller; the in-memory map stays authoritative for the process
/// lifetime.
pub struct FileStore {
    path: PathBuf,
    values: Mutex<HashMap<String, Value>>,
}

impl FileStore {
    /// Open a store at the given path, loading any existing contents
    ///
    /// A missing file is an empty store. A file that exists but cannot be
    /// read or parsed is an error; silently discarding it would lose the
    /// developer's persisted preferences on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(path = %path.display(), entries = values.len(), "opened settings store");
        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    /// Open the store at the default per-user location
    ///
    /// Resolves to `<data-local-dir>/dev-support/dev_settings.json`, creating
    /// the directory if needed.
    pub fn open_default() -> Result<Self> {
        let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        let dir = base.join(DEFAULT_STORE_DIR);
        fs::create_dir_all(&dir)?;
        Self::open(dir.join(STORE_FILE))
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Value>> {
        self.values.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn persist(&self, values: &HashMap<String, Value>) {
        match serde_json::to_string_pretty(values) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.path, json) {
                    tracing::warn!(path = %self.path.display(), "failed to write settings file: {e}");
                }
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "failed to serialize settings: {e}");
            }
        }
    }
}

impl SettingsStore for FileStore {
    fn set_value(&self, key: &str, value: &Value) {
        let mut values = self.lock();
        values.insert(key.to_string(), value.clone());
        self.persist(&values);
    }

    fn value_for(&self, key: &str) -> Option<Value> {
        self.lock().get(key).cloned()
    }
}

impl fmt::Debug for FileStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileStore")
            .field("path", &self.path)
            .field("entries", &self.lock().len())
            .finish()
    }
}
