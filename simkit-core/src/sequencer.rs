use serde::{Deserialize, Serialize};

use crate::{
    config::SimkitConfig, credential_type::CredentialType, error::SimkitError,
    request::Request, Chain,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InclusionProofBody<'a> {
    chain: Chain,
    credential_type: CredentialType,
    commitment: &'a str,
}

/// An inclusion proof returned by the sequencer.
///
/// The record is kept exactly as received: it is forwarded to verifiers and written
/// to session storage, never interpreted beyond the accessors below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProofRecord(serde_json::Value);

impl ProofRecord {
    /// The Merkle root the proof was computed against, if present.
    #[must_use]
    pub fn root(&self) -> Option<&str> {
        self.0.get("root").and_then(serde_json::Value::as_str)
    }

    /// The sequencer's processing status for the commitment (e.g. `mined`), if present.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.0.get("status").and_then(serde_json::Value::as_str)
    }

    /// The raw JSON body.
    #[must_use]
    pub const fn as_json(&self) -> &serde_json::Value {
        &self.0
    }
}

impl From<serde_json::Value> for ProofRecord {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// Client for the sequencer proxy that answers inclusion proof queries.
pub struct InclusionProofClient {
    request: Request,
    url: String,
}

impl InclusionProofClient {
    /// Initializes a client for the endpoint described by `config`.
    #[must_use]
    pub fn new(config: &SimkitConfig) -> Self {
        Self {
            request: Request::new(config),
            url: config.inclusion_proof_url(),
        }
    }

    /// Retrieves the inclusion proof of `encoded_commitment` for a credential type on a chain.
    ///
    /// This is a fail-open boundary: a commitment that is not included and a lookup that
    /// failed both come back as `None`. Failures are logged with the chain and credential
    /// type and are never propagated. Use [`InclusionProofClient::fetch_proof`] to tell
    /// them apart.
    pub async fn get_proof(
        &self,
        chain: Chain,
        credential_type: CredentialType,
        encoded_commitment: &str,
    ) -> Option<ProofRecord> {
        match self
            .fetch_proof(chain, credential_type, encoded_commitment)
            .await
        {
            Ok(proof) => proof,
            Err(err) => {
                log::error!(
                    "Unable to get identity proof for credential type '{credential_type}' on chain '{chain}'. Error: {err}"
                );
                None
            }
        }
    }

    /// Retrieves the inclusion proof of `encoded_commitment`, reporting why it is missing.
    ///
    /// A `null` body is the sequencer's answer for a commitment it does not know and
    /// comes back as `Ok(None)`.
    ///
    /// # Errors
    /// - `SimkitError::NetworkError` if the request could not be sent or the status is not 200.
    /// - `SimkitError::SerializationError` if the response body is not valid JSON.
    /// - `SimkitError::InsecureUrl` if the endpoint is plain HTTP and insecure transport is not allowed.
    pub async fn fetch_proof(
        &self,
        chain: Chain,
        credential_type: CredentialType,
        encoded_commitment: &str,
    ) -> Result<Option<ProofRecord>, SimkitError> {
        let body = InclusionProofBody {
            chain,
            credential_type,
            commitment: encoded_commitment,
        };

        let request_builder = self.request.post(&self.url)?.json(&body);
        let http_response = Request::handle(request_builder).await?;

        let status = http_response.status().as_u16();
        if status != 200 {
            return Err(SimkitError::NetworkError {
                url: self.url.clone(),
                status: Some(status),
                error: format!("unexpected status code {status}"),
            });
        }

        let response_text = http_response.text().await.map_err(|err| {
            SimkitError::SerializationError(format!(
                "failed to read response body from {} with status {status}: {err}",
                self.url
            ))
        })?;

        serde_json::from_str::<Option<ProofRecord>>(&response_text).map_err(|parse_err| {
            // only the first 20 characters, the body may hold something sensitive
            SimkitError::SerializationError(format!(
                "failed to parse response from {} with status {status}: {parse_err}, received: {}",
                self.url,
                response_text.chars().take(20).collect::<String>()
            ))
        })
    }
}
