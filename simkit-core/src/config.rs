use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SimkitError;

/// Path of the sequencer proxy endpoint, relative to [`SimkitConfig::base_url`].
pub const DEFAULT_INCLUSION_PROOF_PATH: &str = "/api/sequencer/inclusionProof";

/// Session storage key holding the serialized identity.
pub const DEFAULT_STORAGE_KEY: &str = "Identity";

/// Configuration for the identity layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimkitConfig {
    /// Origin of the application serving the sequencer proxy, e.g. `https://simulator.example.org`.
    pub base_url: String,
    /// Path of the inclusion proof endpoint.
    pub inclusion_proof_path: String,
    /// Session storage key for the persisted identity.
    pub storage_key: String,
    /// Request timeout. `None` leaves the transport default in place.
    #[serde(with = "optional_millis")]
    pub timeout: Option<Duration>,
    /// Allows `http://` base URLs. Meant for local development.
    pub allow_insecure: bool,
}

impl SimkitConfig {
    /// Default configuration pointing at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Parses a configuration from JSON. Missing fields take their default value.
    ///
    /// # Errors
    /// Returns `SimkitError::InvalidInput` if the JSON is malformed or `base_url` is empty.
    pub fn from_json(json: &str) -> Result<Self, SimkitError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| SimkitError::InvalidInput(format!("invalid config: {e}")))?;

        if config.base_url.trim().is_empty() {
            return Err(SimkitError::InvalidInput(
                "base_url must not be empty".to_string(),
            ));
        }

        Ok(config)
    }

    /// Full URL of the inclusion proof endpoint.
    #[must_use]
    pub fn inclusion_proof_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.inclusion_proof_path
        )
    }
}

impl Default for SimkitConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            inclusion_proof_path: DEFAULT_INCLUSION_PROOF_PATH.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            timeout: None,
            allow_insecure: false,
        }
    }
}

mod optional_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::ref_option)]
    pub fn serialize<S>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(duration) => serializer
                .serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
    }
}
