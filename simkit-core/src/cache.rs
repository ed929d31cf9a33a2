use std::sync::Arc;

use tokio::sync::watch;

/// The host's cache of static assets (e.g. Semaphore circuit files).
///
/// The identity layer never manages the cache itself. It only reads the two signals the
/// host exposes: a synchronous "already populated" check and, through
/// [`CacheStatus::mark_complete`], an asynchronous completion notification.
pub trait AssetCache: Send + Sync {
    /// Whether every asset is already cached.
    fn is_populated(&self) -> bool;

    /// Starts (or restarts) downloading the assets. Completion is reported by the host
    /// calling [`CacheStatus::mark_complete`].
    fn request_download(&self);
}

/// Completion flag of the asset cache, shared between the host and the app shell.
#[derive(Debug, Clone)]
pub struct CacheStatus {
    sender: Arc<watch::Sender<bool>>,
}

impl CacheStatus {
    /// A cache that is not complete yet.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Records the "cache complete" notification. Idempotent.
    pub fn mark_complete(&self) {
        self.sender.send_if_modified(|complete| {
            let changed = !*complete;
            *complete = true;
            changed
        });
    }

    /// Whether the completion notification has been received.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        *self.sender.borrow()
    }

    /// Resolves once the cache is complete. Returns immediately if it already is.
    pub async fn wait_complete(&self) {
        let mut receiver = self.sender.subscribe();
        // the sender lives in `self`, so the channel cannot close while we wait
        let _ = receiver.wait_for(|complete| *complete).await;
    }
}

impl Default for CacheStatus {
    fn default() -> Self {
        Self::new()
    }
}
