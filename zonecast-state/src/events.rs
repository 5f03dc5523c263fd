//! Change notification fan-out.
//!
//! Consumers register listeners; the engine emits after the relevant
//! state has been published, never while holding a state lock, so a
//! listener may immediately read back a consistent snapshot.

use parking_lot::Mutex;

use crate::model::PlayerUuid;

/// A change the engine announces to its consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateEvent {
    /// The zones/players pair was replaced by a reconciliation.
    TopologyChanged,
    /// One player's playback state snapshot was replaced or refreshed.
    PlayerStateChanged(PlayerUuid),
}

type Listener = std::sync::Arc<dyn Fn(&StateEvent) + Send + Sync>;

/// Listener registry shared by the reconciler and every player.
#[derive(Default)]
pub(crate) struct EventBus {
    listeners: Mutex<Vec<Listener>>,
}

impl EventBus {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn subscribe(&self, listener: impl Fn(&StateEvent) + Send + Sync + 'static) {
        self.listeners.lock().push(std::sync::Arc::new(listener));
    }

    pub(crate) fn emit(&self, event: &StateEvent) {
        // Snapshot first: listeners run with the registry unlocked, so a
        // listener may itself subscribe or trigger another emit.
        let listeners = self.listeners.lock().clone();
        for listener in listeners.iter() {
            listener(event);
        }
    }
}
