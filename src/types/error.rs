//! Error types for the dev-support core

use thiserror::Error;

use crate::settings::SettingKey;

/// Main error type for the dev-support core
#[derive(Debug, Error)]
pub enum DevSupportError {
    // === Settings errors ===
    /// Write to a toggle whose availability flag is false
    ///
    /// Callers are expected to consult the corresponding availability flag
    /// before writing; hitting this is a caller bug, not a runtime condition.
    #[error("setting '{key}' is not available in this build")]
    SettingUnavailable {
        /// The rejected setting
        key: SettingKey,
    },

    // === Live-update session errors ===
    /// Additional bundle registered before any primary session exists
    #[error("no primary HMR session established; set up a primary bundle first")]
    HmrSessionNotInitialized,

    // === Remote command errors ===
    /// Dispatch of a command name with no registered handler
    #[cfg(feature = "remote-commands")]
    #[error("no handler registered for command: {0}")]
    NoCommandHandler(String),

    // === Store errors ===
    /// IO error while opening a file-backed store
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed contents in a file-backed store
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for the dev-support core
pub type Result<T> = std::result::Result<T, DevSupportError>;

impl DevSupportError {
    /// Check if this error is a caller bug (caused by skipping a documented
    /// precondition) rather than an environment failure
    pub fn is_caller_error(&self) -> bool {
        match self {
            DevSupportError::SettingUnavailable { .. }
            | DevSupportError::HmrSessionNotInitialized => true,
            #[cfg(feature = "remote-commands")]
            DevSupportError::NoCommandHandler(_) => true,
            _ => false,
        }
    }

    // === Constructor helpers ===

    /// Create an unavailable-setting error
    pub fn setting_unavailable(key: SettingKey) -> Self {
        DevSupportError::SettingUnavailable { key }
    }

    /// Create a no-handler error
    #[cfg(feature = "remote-commands")]
    pub fn no_command_handler(name: impl Into<String>) -> Self {
        DevSupportError::NoCommandHandler(name.into())
    }
}
