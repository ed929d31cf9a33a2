//! Platform interface for session storage.

use super::error::StorageResult;

/// Per-session key/value store holding string values.
///
/// Scoped to a session: values survive reloads of the application but not the end of
/// the session. Implementations must be safe to share between tasks.
#[cfg_attr(feature = "ffi", uniffi::export(with_foreign))]
pub trait SessionStorage: Send + Sync {
    /// Reads the value stored under `key`, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn get(&self, key: String) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (e.g. quota exceeded).
    fn set(&self, key: String, value: String) -> StorageResult<()>;

    /// Removes the value stored under `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    fn remove(&self, key: String) -> StorageResult<()>;
}
