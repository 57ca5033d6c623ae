//! Developer settings state and change notification
//!
//! [`DevSettings`] is the typed view over the injected store; every
//! successful mutation fans out one [`ChangeEvent`] through the
//! [`ChangeNotifier`].

mod events;
mod keys;
mod state;

pub use events::{ChangeEvent, ChangeNotifier};
pub use keys::SettingKey;
pub use state::{DevSettings, Profiler};
