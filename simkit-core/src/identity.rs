use serde::{Deserialize, Serialize};

use crate::{
    credential_type::CredentialMap, error::SimkitError, secret::SecretMaterial,
    sequencer::ProofRecord, Chain,
};

/// The live identity of a session.
///
/// `id`, `verified` and `inclusion_proof` are derived values. They are only ever
/// recomputed by [`crate::IdentityManager::update_identity`], which is why they have
/// no setters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    id: String,
    secret: SecretMaterial,
    chain: Chain,
    persisted: bool,
    verified: CredentialMap<bool>,
    inclusion_proof: CredentialMap<Option<ProofRecord>>,
}

impl Identity {
    /// A fresh identity: new secret material, nothing verified, never persisted.
    ///
    /// The id is left empty until the identity goes through an update.
    #[must_use]
    pub fn generate(chain: Chain) -> Self {
        Self {
            id: String::new(),
            secret: SecretMaterial::generate(),
            chain,
            persisted: false,
            verified: CredentialMap::default(),
            inclusion_proof: CredentialMap::default(),
        }
    }

    /// Short public identifier, derived from the commitment.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The secret material backing this identity.
    #[must_use]
    pub const fn secret(&self) -> &SecretMaterial {
        &self.secret
    }

    /// The chain the identity and its proofs are scoped to.
    #[must_use]
    pub const fn chain(&self) -> Chain {
        self.chain
    }

    /// Whether the identity has been written to session storage at least once.
    #[must_use]
    pub const fn persisted(&self) -> bool {
        self.persisted
    }

    /// Verification flag per credential type.
    #[must_use]
    pub const fn verified(&self) -> &CredentialMap<bool> {
        &self.verified
    }

    /// Inclusion proof per credential type, if the sequencer returned one.
    #[must_use]
    pub const fn inclusion_proof(&self) -> &CredentialMap<Option<ProofRecord>> {
        &self.inclusion_proof
    }

    /// Rebuilds the identity with freshly derived values. The proof map fully replaces
    /// the previous one and `verified` follows it entry by entry.
    pub(crate) fn with_proofs(
        &self,
        id: String,
        inclusion_proof: CredentialMap<Option<ProofRecord>>,
    ) -> Self {
        Self {
            id,
            secret: self.secret.clone(),
            chain: self.chain,
            persisted: self.persisted,
            verified: inclusion_proof.map(|_, proof| proof.is_some()),
            inclusion_proof,
        }
    }

    pub(crate) fn mark_persisted(&mut self) {
        self.persisted = true;
    }

    /// Converts the identity to its stored form.
    #[must_use]
    pub fn to_stored(&self) -> StoredIdentity {
        StoredIdentity {
            id: self.id.clone(),
            secret_material: self.secret.to_serialized(),
            chain: self.chain,
            persisted: self.persisted,
            verified: self.verified,
            inclusion_proof: self.inclusion_proof.clone(),
        }
    }
}

impl TryFrom<StoredIdentity> for Identity {
    type Error = SimkitError;

    fn try_from(stored: StoredIdentity) -> Result<Self, Self::Error> {
        let secret = SecretMaterial::from_serialized(&stored.secret_material)?;

        Ok(Self {
            id: stored.id,
            secret,
            chain: stored.chain,
            persisted: stored.persisted,
            verified: stored.verified,
            inclusion_proof: stored.inclusion_proof,
        })
    }
}

/// The serialized form of an [`Identity`], as kept in session storage.
///
/// Identical to the identity except the secret material is replaced by its
/// serialized string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredIdentity {
    /// Short public identifier.
    pub id: String,
    /// Output of [`SecretMaterial::to_serialized`].
    pub secret_material: String,
    /// The chain the identity is scoped to.
    pub chain: Chain,
    /// Whether the identity has been persisted before.
    pub persisted: bool,
    /// Verification flag per credential type.
    pub verified: CredentialMap<bool>,
    /// Inclusion proof per credential type.
    pub inclusion_proof: CredentialMap<Option<ProofRecord>>,
}

impl StoredIdentity {
    /// Serializes to the JSON document written to session storage.
    ///
    /// # Errors
    /// Returns `SimkitError::SerializationError` if serialization fails.
    pub fn to_json(&self) -> Result<String, SimkitError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses the JSON document read from session storage.
    ///
    /// # Errors
    /// Returns `SimkitError::SerializationError` if the document is malformed.
    pub fn from_json(json: &str) -> Result<Self, SimkitError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::CredentialType;

    #[test]
    fn test_generated_identity_is_blank() {
        let identity = Identity::generate(Chain::Polygon);

        assert_eq!(identity.id(), "");
        assert_eq!(identity.chain(), Chain::Polygon);
        assert!(!identity.persisted());
        assert_eq!(*identity.verified(), CredentialMap { orb: false, phone: false });
        assert_eq!(*identity.inclusion_proof(), CredentialMap { orb: None, phone: None });
    }

    #[test]
    fn test_with_proofs_replaces_everything() {
        let identity = Identity::generate(Chain::Mainnet);
        let proof = ProofRecord::from(json!({"root": "0x1", "proof": []}));

        let verified = identity.with_proofs(
            "0x12345678".to_string(),
            CredentialMap::from_fn(|credential_type| {
                (credential_type == CredentialType::Orb).then(|| proof.clone())
            }),
        );
        assert_eq!(verified.id(), "0x12345678");
        assert_eq!(*verified.verified(), CredentialMap { orb: true, phone: false });

        let demoted = verified.with_proofs(
            "0x12345678".to_string(),
            CredentialMap::from_fn(|_| None),
        );
        assert_eq!(*demoted.verified(), CredentialMap { orb: false, phone: false });
        assert!(demoted.inclusion_proof().orb.is_none());
    }

    #[test]
    fn test_stored_identity_roundtrip() {
        let mut identity = Identity::generate(Chain::Optimism);
        identity.mark_persisted();

        let json = identity.to_stored().to_json().unwrap();
        let restored = Identity::try_from(StoredIdentity::from_json(&json).unwrap()).unwrap();

        assert_eq!(restored.secret().commitment(), identity.secret().commitment());
        assert_eq!(restored, identity);
    }

    #[test]
    fn test_stored_identity_layout() {
        let identity = Identity::generate(Chain::Mainnet);
        let value = serde_json::to_value(identity.to_stored()).unwrap();

        assert_eq!(value["chain"], "mainnet");
        assert_eq!(value["persisted"], false);
        assert_eq!(value["verified"], json!({"orb": false, "phone": false}));
        assert_eq!(value["inclusionProof"], json!({"orb": null, "phone": null}));
        assert_eq!(value["secretMaterial"].as_str().unwrap().len(), 64);
    }

    #[test]
    fn test_corrupted_secret_is_rejected() {
        let mut stored = Identity::generate(Chain::Mainnet).to_stored();
        stored.secret_material = "not a secret".to_string();

        assert!(matches!(
            Identity::try_from(stored),
            Err(SimkitError::InvalidSecret(_))
        ));
    }
}
