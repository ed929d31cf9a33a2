use std::fmt;

use serde::Serialize;

use crate::{
    credential_type::CredentialMap, identity::Identity, store::IdentityStore, Chain,
};

/// What a row of the identity list displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityRow {
    /// Short public identifier.
    pub id: String,
    /// The chain the identity is scoped to.
    pub chain: Chain,
    /// Verification flag per credential type.
    pub verified: CredentialMap<bool>,
    /// Whether the identity is saved in the session.
    pub persisted: bool,
}

impl From<&Identity> for IdentityRow {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id().to_string(),
            chain: identity.chain(),
            verified: *identity.verified(),
            persisted: identity.persisted(),
        }
    }
}

impl fmt::Display for IdentityRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}", self.id, self.chain)?;
        for (credential_type, verified) in self.verified.iter() {
            let mark = if *verified { '✓' } else { '✗' };
            write!(f, "  {credential_type}:{mark}")?;
        }
        Ok(())
    }
}

/// The rows of the identity list, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IdentityList {
    /// One row per identity.
    pub rows: Vec<IdentityRow>,
}

impl IdentityList {
    /// Builds the list from the store's current value: zero or one row.
    #[must_use]
    pub fn from_store(store: &IdentityStore) -> Self {
        Self {
            rows: store.get().iter().map(IdentityRow::from).collect(),
        }
    }

    /// Returns `true` if there is nothing to display.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for IdentityList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            return writeln!(f, "No identities");
        }
        for row in &self.rows {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}
