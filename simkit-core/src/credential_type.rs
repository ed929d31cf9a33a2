use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// A `CredentialType` represents a verification method whose membership set an identity
/// commitment can be included in.
///
/// More details in `https://docs.world.org/world-id/concepts#proof-of-personhood`
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumString,
    EnumIter,
    Hash,
    Display,
    Serialize,
    Deserialize,
)]
#[cfg_attr(feature = "ffi", derive(uniffi::Enum))]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CredentialType {
    /// Represents persons who have been biometrically verified at an Orb. Highest level of proof of personhood verification.
    Orb,
    /// Represents persons who have verified a unique phone number.
    Phone,
}

impl CredentialType {
    /// Every declared credential type, in declaration order.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }
}

/// One value per [`CredentialType`].
///
/// Each credential type is a field, so a map can never miss an entry. Construction goes
/// through [`CredentialMap::from_fn`], whose exhaustive match turns adding a credential
/// type into a compile error everywhere a map is built.
///
/// Serializes as an object keyed by the credential type's wire name, e.g.
/// `{"orb": true, "phone": false}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CredentialMap<T> {
    /// Value for [`CredentialType::Orb`].
    pub orb: T,
    /// Value for [`CredentialType::Phone`].
    pub phone: T,
}

impl<T> CredentialMap<T> {
    /// Builds a map by evaluating `f` once for each credential type.
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(CredentialType) -> T,
    {
        Self {
            orb: f(CredentialType::Orb),
            phone: f(CredentialType::Phone),
        }
    }

    /// Returns the value for `credential_type`.
    #[must_use]
    pub const fn get(&self, credential_type: CredentialType) -> &T {
        match credential_type {
            CredentialType::Orb => &self.orb,
            CredentialType::Phone => &self.phone,
        }
    }

    /// Iterates over `(credential type, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (CredentialType, &T)> {
        CredentialType::all().map(move |credential_type| {
            (credential_type, self.get(credential_type))
        })
    }

    /// Builds a new map by applying `f` to every entry.
    pub fn map<U, F>(&self, mut f: F) -> CredentialMap<U>
    where
        F: FnMut(CredentialType, &T) -> U,
    {
        CredentialMap::from_fn(|credential_type| {
            f(credential_type, self.get(credential_type))
        })
    }
}
