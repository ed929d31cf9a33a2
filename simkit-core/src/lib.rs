//! `simkit-core` manages a session-scoped World ID simulator identity.
//!
//! An identity is a Semaphore secret plus its public commitment. The
//! [`IdentityManager`] creates or restores the identity, asks the sequencer
//! whether its commitment is included for every [`CredentialType`], persists it
//! to a session key/value store and publishes it through an [`IdentityStore`]
//! that rendering surfaces subscribe to.
//!
//! ```rust,no_run
//! use simkit_core::{Chain, IdentityManager, MemorySessionStorage, SimkitConfig};
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let config = SimkitConfig::new("https://simulator.example.org");
//! let manager = IdentityManager::new(config, Arc::new(MemorySessionStorage::new()));
//!
//! let identity = match manager.retrieve_identity().await {
//!     Some(identity) => identity,
//!     None => manager.create_identity(Chain::Mainnet).await,
//! };
//! println!("{} verified: {:?}", identity.id(), identity.verified());
//! # })
//! ```
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The network an identity and its inclusion proofs are scoped to.
///
/// Each chain has its own set of sequencers, so the same commitment can be verified
/// on one chain and unknown on another.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumString,
    Display,
    Serialize,
    Deserialize,
)]
#[cfg_attr(feature = "ffi", derive(uniffi::Enum))]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    /// Ethereum mainnet.
    Mainnet,
    /// Optimism.
    Optimism,
    /// Polygon PoS.
    Polygon,
}

mod cache;
pub use cache::*;

mod commitment;
pub use commitment::*;

mod config;
pub use config::*;

mod credential_type;
pub use credential_type::*;

mod error;
pub use error::*;

mod identity;
pub use identity::*;

/// Forwards log records to a host-provided sink.
pub mod logger;

mod manager;
pub use manager::*;

mod secret;
pub use secret::*;

mod sequencer;
pub use sequencer::*;

mod shell;
pub use shell::*;

/// Session persistence: the key/value store abstraction and its adapter.
pub mod storage;
pub use storage::{
    FileSessionStorage, MemorySessionStorage, SessionPersistence, SessionStorage,
};

mod store;
pub use store::*;

mod view;
pub use view::*;

// private modules
mod request;

#[cfg(feature = "ffi")]
uniffi::setup_scaffolding!("simkit_core");

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_chain_string_forms() {
        assert_eq!(Chain::Mainnet.to_string(), "mainnet");
        assert_eq!(Chain::from_str("polygon").unwrap(), Chain::Polygon);
        assert_eq!(serde_json::to_string(&Chain::Optimism).unwrap(), "\"optimism\"");
        assert!(Chain::from_str("ropsten").is_err());
    }
}
