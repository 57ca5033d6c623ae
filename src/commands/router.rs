//! Command router for packager-delivered remote commands
//!
//! The external packager connection delivers `(name, params)` pairs; the
//! router looks up the handler registered under the name and invokes it.

use std::sync::Arc;

use dashmap::DashMap;
use serde_json::Value;

use crate::types::{DevSupportError, Result};

/// Handler invoked when the packager connection delivers its command
pub trait CommandHandler: Send + Sync {
    /// Handle one delivery of the command with its parameters
    fn handle(&self, params: Value);
}

impl<F> CommandHandler for F
where
    F: Fn(Value) + Send + Sync,
{
    fn handle(&self, params: Value) {
        self(params)
    }
}

/// Registry mapping command names to handlers
///
/// Registration replaces any existing handler for the name (last write
/// wins). Lookup is by name only.
#[derive(Default)]
pub struct CommandRouter {
    handlers: DashMap<String, Arc<dyn CommandHandler>>,
}

impl CommandRouter {
    /// Create an empty router
    pub fn new() -> Self {
        Self {
            handlers: DashMap::new(),
        }
    }

    /// Register or replace the handler for `name`
    ///
    /// Closures taking a [`Value`] implement [`CommandHandler`] directly.
    pub fn register<H: CommandHandler + 'static>(&self, name: impl Into<String>, handler: H) {
        self.register_arc(name, Arc::new(handler));
    }

    /// Register or replace the handler for `name`, as an `Arc`
    pub fn register_arc(&self, name: impl Into<String>, handler: Arc<dyn CommandHandler>) {
        let name = name.into();
        if self.handlers.insert(name.clone(), handler).is_some() {
            tracing::debug!(command = %name, "replaced remote command handler");
        }
    }

    /// Remove the handler for `name`, if any
    pub fn remove(&self, name: &str) {
        self.handlers.remove(name);
    }

    /// Look up and invoke the handler for `name`
    ///
    /// Reports [`DevSupportError::NoCommandHandler`] when nothing is
    /// registered under `name`; a failed lookup is never fatal to the
    /// caller.
    pub fn dispatch(&self, name: &str, params: Value) -> Result<()> {
        // Clone the handler out so it may re-register under the same name
        // without deadlocking the shard it lives in.
        let handler = self.handlers.get(name).map(|r| Arc::clone(&r));
        match handler {
            Some(handler) => {
                tracing::debug!(command = name, "dispatching remote command");
                handler.handle(params);
                Ok(())
            }
            None => {
                tracing::warn!(command = name, "no handler registered for remote command");
                Err(DevSupportError::NoCommandHandler(name.to_string()))
            }
        }
    }

    /// Check if a handler is registered for `name`
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// All registered command names
    pub fn names(&self) -> Vec<String> {
        self.handlers.iter().map(|r| r.key().clone()).collect()
    }

    /// Number of registered handlers
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if the router has no handlers
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for CommandRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRouter")
            .field("count", &self.handlers.len())
            .finish()
    }
}
