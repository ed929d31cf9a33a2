use thiserror::Error;

/// Error outputs from `SimKit`
///
/// None of these reach the hook surface of [`crate::IdentityManager`]: every
/// lifecycle operation degrades to an absent value instead. They are returned by
/// the lower-level building blocks.
#[derive(Debug, Error)]
pub enum SimkitError {
    /// The presented input is not valid for the requested operation
    #[error("invalid_input: {0}")]
    InvalidInput(String),
    /// The serialized secret material could not be parsed
    #[error("invalid_secret: {0}")]
    InvalidSecret(String),
    /// Unexpected error serializing information
    #[error("serialization_error: {0}")]
    SerializationError(String),
    /// Network connection error with details
    #[error("network_error: {url} (status {status:?}): {error}")]
    NetworkError {
        /// The URL that was requested.
        url: String,
        /// The HTTP status code, if a response was received.
        status: Option<u16>,
        /// Description of the failure.
        error: String,
    },
    /// A plain-text URL was used while insecure transport is not allowed
    #[error("insecure_url: {0}")]
    InsecureUrl(String),
}

impl From<serde_json::Error> for SimkitError {
    fn from(error: serde_json::Error) -> Self {
        Self::SerializationError(error.to_string())
    }
}
