use std::ops::Deref;

use ruint::aliases::U256;

/// Number of characters of the encoded commitment that make up the public id.
pub const PUBLIC_ID_LENGTH: usize = 10;

/// A Semaphore identity commitment, the public part of an identity.
///
/// The canonical string form of a commitment is a padded hex string from Big Endian
/// bytes (`0x` followed by 64 lowercase hex digits). That form is what the sequencer
/// expects as a lookup key, and its first [`PUBLIC_ID_LENGTH`] characters are the
/// short public id shown to users.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Commitment(pub U256);

impl Commitment {
    /// Outputs the canonical encoding: the value padded to 32 bytes, plus the `0x` prefix.
    #[must_use]
    pub fn encode(&self) -> String {
        format!("{:#066x}", self.0)
    }

    /// Short public identifier derived from the encoding.
    ///
    /// Deterministic, but not collision free: two commitments sharing their top
    /// 32 bits share a public id.
    #[must_use]
    pub fn public_id(&self) -> String {
        public_id_from_encoded(&self.encode())
    }
}

/// Truncates an encoded commitment to its public id.
pub(crate) fn public_id_from_encoded(encoded: &str) -> String {
    encoded.chars().take(PUBLIC_ID_LENGTH).collect()
}

impl From<Commitment> for U256 {
    fn from(val: Commitment) -> Self {
        val.0
    }
}

impl From<U256> for Commitment {
    fn from(val: U256) -> Self {
        Self(val)
    }
}

impl std::fmt::Display for Commitment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.encode())
    }
}

impl Deref for Commitment {
    type Target = U256;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ruint::uint;

    #[test]
    fn test_encode() {
        assert_eq!(
            Commitment(U256::from(1)).encode(),
            "0x0000000000000000000000000000000000000000000000000000000000000001"
        );
        assert_eq!(
            Commitment(U256::from(42)).encode(),
            "0x000000000000000000000000000000000000000000000000000000000000002a"
        );

        assert_eq!(
            Commitment(uint!(
                80084422859880547211683076133703299733277748156566366325829078699459944778998_U256
            ))
            .encode(),
            "0xb10e2d527612073b26eecdfd717e6a320cf44b4afac2b0732d9fcbe2b7fa0cf6"
        );
    }

    #[test]
    fn test_public_id() {
        let commitment = Commitment(uint!(
            0x036b6384b5eca791c62761152d0c79bb0604c104a5fb6f4eb0703f3154bb3db0_U256
        ));

        assert_eq!(commitment.public_id(), "0x036b6384");
        assert_eq!(commitment.public_id().len(), PUBLIC_ID_LENGTH);
        // small values keep their padding
        assert_eq!(Commitment(U256::from(42)).public_id(), "0x00000000");
    }

    #[test]
    fn test_public_id_is_deterministic() {
        let commitment = Commitment(uint!(
            0x000352340ece4a3509b5a053118e289300e9e9677d135ae1a625219a10923a7e_U256
        ));
        let copy = Commitment::from(U256::from(commitment));

        assert_eq!(commitment.public_id(), copy.public_id());
        assert_eq!(commitment.public_id(), "0x00035234");
        assert_eq!(copy.to_string(), commitment.encode());
    }
}
