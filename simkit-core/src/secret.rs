use rand::RngCore;
use semaphore_rs::identity::seed_hex;
use zeroize::Zeroize;

use crate::{commitment::Commitment, error::SimkitError};

/// Length of the hashed secret, as ASCII hex.
const SECRET_HEX_LENGTH: usize = 64;

/// The secret half of an identity.
///
/// Wraps a Semaphore identity derived from a hashed secret. The hashed secret is the
/// only thing that needs to be kept to rebuild the identity, so it doubles as the
/// serialized form stored in the session.
///
/// # Security
/// The hashed secret is zeroized when the value is dropped and is never included in
/// `Debug` output. Copies handed out by [`SecretMaterial::to_serialized`] are the
/// caller's responsibility.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretMaterial {
    semaphore_identity: semaphore_rs::identity::Identity,
    /// The hashed secret, as 64 bytes of ASCII hex. Actual hashed secret is 32 bytes.
    secret_hex: [u8; SECRET_HEX_LENGTH],
}

impl SecretMaterial {
    /// Generates fresh secret material from 32 random bytes.
    #[must_use]
    pub fn generate() -> Self {
        let mut secret = [0_u8; 32];
        rand::thread_rng().fill_bytes(&mut secret);

        let secret_hex = seed_hex(&secret);
        secret.zeroize();

        Self::from_secret_hex(secret_hex)
    }

    /// Rebuilds secret material from the output of [`SecretMaterial::to_serialized`].
    ///
    /// # Errors
    /// Returns `SimkitError::InvalidSecret` if the input is not 64 hex characters.
    pub fn from_serialized(serialized: &str) -> Result<Self, SimkitError> {
        let serialized = serialized.trim();

        if serialized.len() != SECRET_HEX_LENGTH {
            return Err(SimkitError::InvalidSecret(format!(
                "expected {SECRET_HEX_LENGTH} characters, got {}",
                serialized.len()
            )));
        }

        if !serialized.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(SimkitError::InvalidSecret(
                "secret contains non-hex characters".to_string(),
            ));
        }

        let mut secret_hex = [0_u8; SECRET_HEX_LENGTH];
        secret_hex.copy_from_slice(serialized.to_ascii_lowercase().as_bytes());

        Ok(Self::from_secret_hex(secret_hex))
    }

    /// The serialized form kept in session storage.
    #[must_use]
    pub fn to_serialized(&self) -> String {
        self.secret_hex.iter().map(|b| char::from(*b)).collect()
    }

    /// The identity commitment, i.e. the public part of this secret.
    #[must_use]
    pub fn commitment(&self) -> Commitment {
        self.semaphore_identity.commitment().into()
    }

    fn from_secret_hex(secret_hex: [u8; SECRET_HEX_LENGTH]) -> Self {
        // `from_hashed_secret` consumes its input buffer, so hand it a copy
        let mut seed = secret_hex;
        let semaphore_identity =
            semaphore_rs::identity::Identity::from_hashed_secret(&mut seed, None);
        seed.zeroize();

        Self {
            semaphore_identity,
            secret_hex,
        }
    }
}

impl Drop for SecretMaterial {
    fn drop(&mut self) {
        self.secret_hex.zeroize();
    }
}

impl std::fmt::Debug for SecretMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretMaterial")
            .field("commitment", &self.commitment())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_roundtrip_keeps_commitment() {
        let secret = SecretMaterial::generate();
        let serialized = secret.to_serialized();
        assert_eq!(serialized.len(), SECRET_HEX_LENGTH);

        let restored = SecretMaterial::from_serialized(&serialized).unwrap();
        assert_eq!(restored.commitment(), secret.commitment());
        assert_eq!(restored, secret);
    }

    #[test]
    fn test_known_secret_commitment() {
        // seed_hex(b"not_a_real_secret") with the canonical trapdoor
        let secret_hex = seed_hex(b"not_a_real_secret");
        let serialized: String = secret_hex.iter().map(|b| char::from(*b)).collect();

        let secret = SecretMaterial::from_serialized(&serialized).unwrap();
        let expected = semaphore_rs::identity::Identity::from_secret(
            &mut b"not_a_real_secret".to_vec(),
            None,
        );
        assert_eq!(*secret.commitment(), expected.commitment());
        assert_eq!(secret.commitment().public_id(), "0x00035234");
    }

    #[test]
    fn test_generated_secrets_differ() {
        let a = SecretMaterial::generate();
        let b = SecretMaterial::generate();
        assert_ne!(a.commitment(), b.commitment());
    }

    #[test]
    fn test_rejects_malformed_input() {
        assert!(SecretMaterial::from_serialized("").is_err());
        assert!(SecretMaterial::from_serialized("abc").is_err());
        assert!(SecretMaterial::from_serialized(&"z".repeat(64)).is_err());
        assert!(SecretMaterial::from_serialized(&"0".repeat(65)).is_err());
    }

    #[test]
    fn test_debug_hides_secret() {
        let secret = SecretMaterial::generate();
        let debug = format!("{secret:?}");
        assert!(!debug.contains(&secret.to_serialized()));
        assert!(debug.contains("commitment"));
    }
}
