use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::{watch, Mutex};

use crate::{
    commitment::public_id_from_encoded,
    config::SimkitConfig,
    credential_type::{CredentialMap, CredentialType},
    error::SimkitError,
    identity::{Identity, StoredIdentity},
    sequencer::InclusionProofClient,
    storage::{SessionPersistence, SessionStorage},
    store::IdentityStore,
    Chain,
};

/// Drives the lifecycle of the session identity: creation, proof refresh, persistence
/// and restore.
///
/// This is the surface rendering layers use: `identity`, `create_identity`,
/// `retrieve_identity`, `update_identity` and `clear_identity`. None of these return
/// errors. Failures are logged and degrade to an absent value (no proof, not persisted,
/// nothing to restore).
///
/// Lifecycle operations on one manager are serialized: a `create_identity` issued while
/// a `retrieve_identity` is in flight starts once the retrieve has finished, and the
/// identity left in the store is the one from the operation that finished last. The
/// same holds for `clear_identity`, so a clear is never undone by an operation that
/// was already running.
pub struct IdentityManager {
    store: IdentityStore,
    persistence: SessionPersistence,
    client: InclusionProofClient,
    storage_key: String,
    lifecycle: Mutex<()>,
}

impl IdentityManager {
    /// Creates a manager with its own empty [`IdentityStore`].
    #[must_use]
    pub fn new(config: SimkitConfig, storage: Arc<dyn SessionStorage>) -> Self {
        Self::with_store(config, storage, IdentityStore::new())
    }

    /// Creates a manager publishing to an existing store.
    #[must_use]
    pub fn with_store(
        config: SimkitConfig,
        storage: Arc<dyn SessionStorage>,
        store: IdentityStore,
    ) -> Self {
        Self {
            store,
            persistence: SessionPersistence::new(storage),
            client: InclusionProofClient::new(&config),
            storage_key: config.storage_key,
            lifecycle: Mutex::new(()),
        }
    }

    /// The current identity of the session, if any.
    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        self.store.get()
    }

    /// The store this manager publishes to.
    #[must_use]
    pub const fn store(&self) -> &IdentityStore {
        &self.store
    }

    /// Observes every identity published by this manager.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.store.subscribe()
    }

    /// Creates a brand new identity on `chain`, checks its proofs and persists it.
    pub async fn create_identity(&self, chain: Chain) -> Identity {
        let _guard = self.lifecycle.lock().await;

        let identity = Identity::generate(chain);
        log::debug!("Created identity on chain '{chain}'");

        self.refresh(&identity).await
    }

    /// Restores the identity persisted in the session, if any.
    ///
    /// Proofs are always re-checked against the sequencer; stored proofs are never
    /// trusted. Returns `None` when nothing is stored or the stored value cannot be
    /// read, in which case the caller should create a new identity. No network request
    /// is made when nothing is stored.
    pub async fn retrieve_identity(&self) -> Option<Identity> {
        let _guard = self.lifecycle.lock().await;

        let stored = self.persistence.load(&self.storage_key)?;

        let identity = match Self::restore(&stored) {
            Ok(identity) => identity,
            Err(err) => {
                log::error!("Unable to restore semaphore identity, {err}");
                return None;
            }
        };

        let identity = self.refresh(&identity).await;
        log::info!("Restored identity {}", identity.id());

        Some(identity)
    }

    /// Recomputes the id, verification flags and inclusion proofs of `identity`, then
    /// publishes and persists the result.
    ///
    /// This is the only way derived fields change. The proof maps are rebuilt from
    /// scratch: a credential that lost its proof is demoted to unverified.
    pub async fn update_identity(&self, identity: &Identity) -> Identity {
        let _guard = self.lifecycle.lock().await;

        self.refresh(identity).await
    }

    /// Removes the persisted identity from the session.
    ///
    /// The in-memory store is left untouched; use [`IdentityStore::reset`] to empty it.
    pub async fn clear_identity(&self) {
        let _guard = self.lifecycle.lock().await;

        self.persistence.remove(&self.storage_key);
    }

    fn restore(stored: &str) -> Result<Identity, SimkitError> {
        let stored = StoredIdentity::from_json(stored)?;
        Identity::try_from(stored)
    }

    async fn refresh(&self, identity: &Identity) -> Identity {
        let encoded_commitment = identity.secret().commitment().encode();
        let id = public_id_from_encoded(&encoded_commitment);
        let chain = identity.chain();

        // lookups are independent; nothing is published until all of them resolved
        let lookups = CredentialType::all().map(|credential_type| {
            let encoded_commitment = &encoded_commitment;
            async move {
                let proof = self
                    .client
                    .get_proof(chain, credential_type, encoded_commitment)
                    .await;
                (credential_type, proof)
            }
        });
        let mut results = join_all(lookups).await;

        let inclusion_proof = CredentialMap::from_fn(|credential_type| {
            results
                .iter_mut()
                .find(|(t, _)| *t == credential_type)
                .and_then(|(_, proof)| proof.take())
        });

        let mut updated = identity.with_proofs(id, inclusion_proof);
        self.persist(&mut updated);
        self.store.set(updated.clone());

        updated
    }

    fn persist(&self, identity: &mut Identity) {
        let mut stored = identity.to_stored();
        stored.persisted = true;

        let json = match stored.to_json() {
            Ok(json) => json,
            Err(err) => {
                log::error!("Unable to persist semaphore identity, {err}");
                return;
            }
        };

        if self.persistence.save(&self.storage_key, json) {
            identity.mark_persisted();
            log::info!("Saved identity {}", identity.id());
        }
    }
}

impl std::fmt::Debug for IdentityManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityManager")
            .field("storage_key", &self.storage_key)
            .field("identity", &self.store.get().map(|i| i.id().to_string()))
            .finish_non_exhaustive()
    }
}
