//! Change notification channel
//!
//! Fan-out of toggle mutations to UI overlays and other host observers.

use std::sync::Mutex;

use serde::Serialize;
use serde_json::Value;
use tokio::sync::mpsc;

use super::keys::SettingKey;

/// Event emitted after every successful toggle mutation
#[derive(Debug, Clone, Serialize)]
pub struct ChangeEvent {
    /// Key of the mutated setting
    pub key: SettingKey,
    /// The new value
    pub value: Value,
}

/// Multi-subscriber change fan-out
///
/// Subscribers attached after an event was emitted never see it; there is no
/// replay. Each mutation is delivered at most once per subscriber, in
/// mutation order.
#[derive(Debug, Default)]
pub struct ChangeNotifier {
    subscribers: Mutex<Vec<mpsc::UnboundedSender<ChangeEvent>>>,
}

impl ChangeNotifier {
    /// Create a notifier with no subscribers
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a new subscriber
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<ChangeEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.lock().push(tx);
        rx
    }

    /// Emit one event to every live subscriber, pruning closed ones
    pub(crate) fn emit(&self, key: SettingKey, value: Value) {
        tracing::debug!(key = %key, value = %value, "setting changed");
        let event = ChangeEvent { key, value };
        self.lock().retain(|tx| tx.send(event.clone()).is_ok());
    }

    /// Number of attached subscribers
    ///
    /// Subscribers whose receiver was dropped are counted until the next
    /// emission prunes them.
    pub fn subscriber_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<mpsc::UnboundedSender<ChangeEvent>>> {
        self.subscribers.lock().unwrap_or_else(|e| e.into_inner())
    }
}
