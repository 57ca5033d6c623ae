//! Developer-mode settings and live-update coordination
//!
//! An embedded service for app runtimes: exposes the boolean developer
//! toggles (profiling, hot reloading, remote debugging, element inspector,
//! performance monitor), persists them through a pluggable key-value store,
//! notifies observers of every change, and coordinates the hot-module-reload
//! session plus remote developer-menu commands delivered by the packager
//! connection.
//!
//! ## Features
//!
//! - Pluggable persistence ([`SettingsStore`]) with bundled in-memory and
//!   file-backed stores
//! - Availability gating computed once from the build configuration
//! - Ordered, at-most-once change events per mutation
//! - Live-update (HMR) session control over an injected transport
//! - `remote-commands` feature: name-to-handler routing for packager
//!   commands, compiled out entirely when disabled
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use dev_support::{BuildConfig, DevSettings, MemoryStore};
//!
//! # fn main() -> dev_support::Result<()> {
//! let store = Arc::new(MemoryStore::new());
//! let settings = DevSettings::new(store, &BuildConfig::dev());
//! let mut events = settings.subscribe();
//!
//! settings.set_hot_loading_enabled(true)?;
//! assert!(settings.is_hot_loading_enabled());
//!
//! let event = events.try_recv().expect("change event");
//! assert_eq!(event.key.as_str(), "isHotLoadingEnabled");
//! # Ok(())
//! # }
//! ```
//!
//! ## Persisted keys
//!
//! Persisted toggles live in one opaque key-value namespace under their
//! toggle names (`"isHotLoadingEnabled"`, `"isPerfMonitorShown"`, ...); any
//! [`SettingsStore`] implementation with that shape is a drop-in backend.

pub mod hmr;
pub mod settings;
pub mod store;
pub mod types;

#[cfg(feature = "remote-commands")]
pub mod commands;

#[cfg(feature = "remote-commands")]
pub use commands::{CommandHandler, CommandRouter};
pub use hmr::{HmrSession, HmrTransport};
pub use settings::{ChangeEvent, ChangeNotifier, DevSettings, Profiler, SettingKey};
pub use store::{FileStore, MemoryStore, SettingsStore};
pub use types::{BuildConfig, BuildProfile, DevCapabilities, DevSupportError, Result};
