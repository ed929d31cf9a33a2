use std::sync::Arc;

use crate::{
    cache::{AssetCache, CacheStatus},
    identity::Identity,
    manager::IdentityManager,
    Chain,
};

/// Application bootstrap: brings up the asset cache signals and the session identity.
pub struct AppShell {
    manager: Arc<IdentityManager>,
    cache: Arc<dyn AssetCache>,
    cache_status: CacheStatus,
}

impl AppShell {
    /// Creates a shell over an identity manager and the host's asset cache.
    #[must_use]
    pub fn new(
        manager: Arc<IdentityManager>,
        cache: Arc<dyn AssetCache>,
        cache_status: CacheStatus,
    ) -> Self {
        Self {
            manager,
            cache,
            cache_status,
        }
    }

    /// Runs the page-load sequence.
    ///
    /// If the asset cache is already populated it is marked complete, otherwise a
    /// download is requested and completion arrives later through [`CacheStatus`].
    /// The identity is restored from the session, or created on `chain` when nothing
    /// can be restored. Restoration does not wait for the cache.
    pub async fn boot(&self, chain: Chain) -> Identity {
        self.check_cache();

        match self.manager.retrieve_identity().await {
            Some(identity) => identity,
            None => {
                log::info!("No identity to restore, creating one on chain '{chain}'");
                self.manager.create_identity(chain).await
            }
        }
    }

    /// The identity manager.
    #[must_use]
    pub fn manager(&self) -> &IdentityManager {
        &self.manager
    }

    /// The asset cache completion flag.
    #[must_use]
    pub const fn cache_status(&self) -> &CacheStatus {
        &self.cache_status
    }

    fn check_cache(&self) {
        if self.cache.is_populated() {
            self.cache_status.mark_complete();
        } else {
            log::debug!("Asset cache is not populated, requesting download");
            self.cache.request_download();
        }
    }
}
