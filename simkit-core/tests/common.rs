//! Common test utilities shared across integration tests.

use std::sync::Arc;

use mockito::{Matcher, Mock, Server};
use serde_json::json;
use simkit_core::{IdentityManager, MemorySessionStorage, SessionStorage, SimkitConfig};

#[allow(dead_code, reason = "used in tests")]
pub const INCLUSION_PROOF_PATH: &str = "/api/sequencer/inclusionProof";

/// A manager talking to `server`, backed by `storage`.
#[allow(dead_code, reason = "used in tests")]
pub fn manager(server: &Server, storage: Arc<dyn SessionStorage>) -> IdentityManager {
    let mut config = SimkitConfig::new(server.url());
    config.allow_insecure = true;
    IdentityManager::new(config, storage)
}

/// A manager with a fresh in-memory session.
#[allow(dead_code, reason = "used in tests")]
pub fn manager_with_memory(server: &Server) -> (IdentityManager, Arc<MemorySessionStorage>) {
    let storage = Arc::new(MemorySessionStorage::new());
    (manager(server, storage.clone()), storage)
}

/// Mocks the sequencer answer for one credential type.
#[allow(dead_code, reason = "used in tests")]
pub async fn mock_sequencer(
    server: &mut Server,
    credential_type: &str,
    status: usize,
    body: &str,
) -> Mock {
    server
        .mock("POST", INCLUSION_PROOF_PATH)
        .match_body(Matcher::PartialJson(json!({ "credentialType": credential_type })))
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}
