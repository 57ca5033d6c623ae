//! Live-update session state machine

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::types::{DevSupportError, Result};

use super::transport::HmrTransport;

/// Session state; no primary exists until the first setup call
#[derive(Debug, Clone, Default)]
enum SessionState {
    #[default]
    Uninitialized,
    Primary {
        primary: String,
        additional: Vec<String>,
    },
}

/// Controller for one HMR connection scoped to a bundle URL
///
/// Created by the first primary setup and extended (not recreated) by
/// additional bundle registrations. Teardown is owned by the host lifecycle;
/// no explicit teardown transition exists here.
pub struct HmrSession {
    transport: Arc<dyn HmrTransport>,
    state: Mutex<SessionState>,
}

impl HmrSession {
    /// Create a controller over the given transport
    pub fn new(transport: Arc<dyn HmrTransport>) -> Self {
        Self {
            transport,
            state: Mutex::new(SessionState::Uninitialized),
        }
    }

    /// Establish or reset the primary session
    ///
    /// Re-entrant: a later call replaces the primary and drops any
    /// registered additional bundles.
    pub fn setup_with_bundle_url(&self, bundle_url: impl Into<String>) {
        let bundle_url = bundle_url.into();
        let mut state = self.lock();

        if let SessionState::Primary { primary, .. } = &*state {
            tracing::info!(old = %primary, new = %bundle_url, "resetting HMR session");
        }
        *state = SessionState::Primary {
            primary: bundle_url.clone(),
            additional: Vec::new(),
        };
        self.transport.setup(&bundle_url);
        tracing::debug!(%bundle_url, "HMR session established");
    }

    /// Register an additional bundle against the running session
    ///
    /// Fails with [`DevSupportError::HmrSessionNotInitialized`] when no
    /// primary session exists; it never implicitly creates one.
    pub fn setup_with_additional_bundle_url(&self, bundle_url: impl Into<String>) -> Result<()> {
        let bundle_url = bundle_url.into();
        let mut state = self.lock();

        match &mut *state {
            SessionState::Uninitialized => {
                tracing::warn!(%bundle_url, "additional bundle registered before a primary session");
                Err(DevSupportError::HmrSessionNotInitialized)
            }
            SessionState::Primary { additional, .. } => {
                additional.push(bundle_url.clone());
                self.transport.register_bundle(&bundle_url);
                tracing::debug!(%bundle_url, "additional bundle registered");
                Ok(())
            }
        }
    }

    /// Turn hot reloading on or off for the live session
    ///
    /// Ignored (logged) before a primary session exists.
    pub fn set_enabled(&self, enabled: bool) {
        let state = self.lock();
        match &*state {
            SessionState::Primary { .. } => self.transport.set_enabled(enabled),
            SessionState::Uninitialized => {
                tracing::debug!(enabled, "HMR session not established; ignoring enable toggle");
            }
        }
    }

    /// Whether a primary session exists
    pub fn is_initialized(&self) -> bool {
        matches!(&*self.lock(), SessionState::Primary { .. })
    }

    /// All bundle URLs the session tracks, primary first
    pub fn bundle_urls(&self) -> Vec<String> {
        match &*self.lock() {
            SessionState::Uninitialized => Vec::new(),
            SessionState::Primary { primary, additional } => {
                let mut urls = Vec::with_capacity(1 + additional.len());
                urls.push(primary.clone());
                urls.extend(additional.iter().cloned());
                urls
            }
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl fmt::Debug for HmrSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmrSession")
            .field("state", &*self.lock())
            .finish()
    }
}
