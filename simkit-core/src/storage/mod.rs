//! The session key/value store and the adapter the identity layer talks to.
//!
//! [`SessionStorage`] is the black-box store provided by the host (a browser's
//! session storage, a file per key for a CLI, an in-memory map for tests).
//! [`SessionPersistence`] wraps it so that no storage failure ever reaches the
//! caller.

pub mod error;
pub mod file;
pub mod memory;
pub mod persistence;
pub mod traits;

pub use error::{StorageError, StorageResult};
pub use file::FileSessionStorage;
pub use memory::MemorySessionStorage;
pub use persistence::SessionPersistence;
pub use traits::SessionStorage;
