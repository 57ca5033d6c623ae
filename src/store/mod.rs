//! Pluggable settings persistence
//!
//! The settings state reads and writes through a [`SettingsStore`] supplied
//! once at construction. Two backends ship with the crate:
//! - [`MemoryStore`]: ephemeral, for tests and hosts without durable storage
//! - [`FileStore`]: a JSON object file under the platform data directory

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde_json::Value;

/// Key-value persistence capability backing the developer settings
///
/// No validation and no type enforcement; the settings state owns the
/// semantics of each key. Writes are treated as synchronous and non-failing
/// from the caller's perspective: a backend failure is the backend's concern
/// and should be logged there, not surfaced through every setter.
pub trait SettingsStore: Send + Sync {
    /// Update the setting with the given key to the given value
    ///
    /// How the store's durable state changes depends on the implementation.
    fn set_value(&self, key: &str, value: &Value);

    /// Return the stored value for the given key, if any
    fn value_for(&self, key: &str) -> Option<Value>;
}
