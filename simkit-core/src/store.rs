use std::sync::Arc;

use tokio::sync::watch;

use crate::identity::Identity;

/// Single-slot holder of the session's current identity.
///
/// The store is an explicit context object: clones are handles to the same slot, so the
/// lifecycle manager and every rendering surface share one value. Readers that need to
/// re-render on change call [`IdentityStore::subscribe`].
#[derive(Debug, Clone)]
pub struct IdentityStore {
    sender: Arc<watch::Sender<Option<Identity>>>,
}

impl IdentityStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// The current identity, if any.
    #[must_use]
    pub fn get(&self) -> Option<Identity> {
        self.sender.borrow().clone()
    }

    /// Replaces the current identity and notifies subscribers.
    pub fn set(&self, identity: Identity) {
        self.sender.send_replace(Some(identity));
    }

    /// Empties the slot and notifies subscribers.
    pub fn reset(&self) {
        self.sender.send_replace(None);
    }

    /// Returns a receiver that observes every change to the slot.
    ///
    /// The receiver starts with the current value marked as seen; `changed().await`
    /// resolves on the next `set` or `reset`.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.sender.subscribe()
    }
}

impl Default for IdentityStore {
    fn default() -> Self {
        Self::new()
    }
}
