//! # Account Identities — the `lyc1…` address type
//!
//! An [`AccountId`] is the canonical reference to a participant: the
//! BLAKE3 hash of their Ed25519 public key, encoded as a Bech32 string
//! with the `lyc` human-readable prefix. Bech32's checksum catches
//! transcription errors before they become misdirected tuition, which
//! matters when a registrar is copy-pasting university addresses into an
//! enrollment form.
//!
//! Hashing instead of using the raw public key buys a layer of
//! indirection (the address format survives a future key-scheme change)
//! and a fixed 32-byte identity regardless of key type.
//!
//! `AccountId` is `Copy` and cheap to compare: it is used as the key of
//! every registry, balance, and ownership map in the contract layer.

use bech32::{Bech32, Hrp};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::config::{ACCOUNT_HRP, ACCOUNT_ID_LENGTH};
use crate::identity::keypair::AccountPublicKey;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur while parsing an account address.
#[derive(Debug, Error)]
pub enum AccountIdError {
    /// The Bech32 string could not be decoded.
    #[error("bech32 decode error: {0}")]
    Bech32Decode(String),

    /// The decoded address has an unexpected human-readable prefix.
    #[error("invalid HRP: expected '{expected}', got '{got}'")]
    InvalidHrp {
        /// The expected HRP.
        expected: String,
        /// The HRP that was actually found.
        got: String,
    },

    /// The decoded data has an unexpected length.
    #[error("invalid address data length: expected {expected} bytes, got {got}")]
    InvalidDataLength {
        /// Expected number of bytes.
        expected: usize,
        /// Actual number of bytes.
        got: usize,
    },
}

// ---------------------------------------------------------------------------
// AccountId
// ---------------------------------------------------------------------------

/// A Lyceum account identity.
///
/// Internally the BLAKE3 hash of the originating public key. The Bech32
/// address string is computed on the fly; the hash is the canonical
/// representation and the only thing compared, hashed, or ordered.
///
/// # Examples
///
/// ```
/// use lyceum_protocol::identity::{AccountId, AccountKeypair};
///
/// let kp = AccountKeypair::generate();
/// let id = kp.account_id();
/// let address = id.to_address();
/// assert!(address.starts_with("lyc1"));
///
/// let recovered = AccountId::from_address(&address).unwrap();
/// assert_eq!(id, recovered);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId {
    key_hash: [u8; ACCOUNT_ID_LENGTH],
}

impl AccountId {
    /// Derive an account identity from a public key.
    pub fn from_public_key(pk: &AccountPublicKey) -> Self {
        let key_hash = blake3::hash(pk.as_bytes());
        Self {
            key_hash: *key_hash.as_bytes(),
        }
    }

    /// Construct an identity directly from its 32-byte hash.
    ///
    /// For embedders that already hold the canonical hash (e.g. a state
    /// snapshot); derivation from key material should go through
    /// [`from_public_key`](Self::from_public_key).
    pub fn from_bytes(key_hash: [u8; ACCOUNT_ID_LENGTH]) -> Self {
        Self { key_hash }
    }

    /// Encode this identity as a Bech32 address string (`lyc1…`).
    pub fn to_address(&self) -> String {
        let hrp = Hrp::parse(ACCOUNT_HRP).expect("static HRP is valid");
        bech32::encode::<Bech32>(hrp, &self.key_hash)
            .expect("encoding a 32-byte payload never fails")
    }

    /// Parse a Bech32-encoded address back into an [`AccountId`].
    ///
    /// Validates the HRP, checksum, and data length.
    pub fn from_address(addr: &str) -> Result<Self, AccountIdError> {
        let (hrp, data) =
            bech32::decode(addr).map_err(|e| AccountIdError::Bech32Decode(e.to_string()))?;

        let expected_hrp = Hrp::parse(ACCOUNT_HRP).expect("static HRP is valid");
        if hrp != expected_hrp {
            return Err(AccountIdError::InvalidHrp {
                expected: ACCOUNT_HRP.to_string(),
                got: hrp.to_string(),
            });
        }

        let key_hash: [u8; ACCOUNT_ID_LENGTH] =
            data.try_into().map_err(|e: Vec<u8>| AccountIdError::InvalidDataLength {
                expected: ACCOUNT_ID_LENGTH,
                got: e.len(),
            })?;

        Ok(Self { key_hash })
    }

    /// The raw 32-byte hash underlying this identity.
    pub fn as_bytes(&self) -> &[u8; ACCOUNT_ID_LENGTH] {
        &self.key_hash
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_address())
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Debug renders the Bech32 address: a hex dump of the hash helps
        // nobody reading a test failure.
        write!(f, "AccountId({})", self.to_address())
    }
}

impl Serialize for AccountId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_address())
        } else {
            serializer.serialize_bytes(&self.key_hash)
        }
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            AccountId::from_address(&s).map_err(serde::de::Error::custom)
        } else {
            let bytes = <Vec<u8>>::deserialize(deserializer)?;
            let key_hash: [u8; ACCOUNT_ID_LENGTH] =
                bytes.try_into().map_err(|e: Vec<u8>| {
                    serde::de::Error::custom(format!(
                        "expected {}-byte key hash, got {}",
                        ACCOUNT_ID_LENGTH,
                        e.len()
                    ))
                })?;
            Ok(AccountId { key_hash })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::AccountKeypair;

    fn test_id(seed: u8) -> AccountId {
        AccountKeypair::from_seed(&[seed; 32]).account_id()
    }

    #[test]
    fn address_starts_with_lyc1() {
        let addr = test_id(1).to_address();
        assert!(addr.starts_with("lyc1"), "got {addr}");
    }

    #[test]
    fn address_roundtrip() {
        let id = test_id(2);
        let recovered = AccountId::from_address(&id.to_address()).unwrap();
        assert_eq!(id, recovered);
    }

    #[test]
    fn distinct_keys_yield_distinct_ids() {
        assert_ne!(test_id(1), test_id(2));
    }

    #[test]
    fn wrong_hrp_rejected() {
        // A valid Bech32 string under a foreign prefix must not parse.
        let hrp = Hrp::parse("pay").unwrap();
        let foreign = bech32::encode::<Bech32>(hrp, &[0u8; 32]).unwrap();
        assert!(matches!(
            AccountId::from_address(&foreign),
            Err(AccountIdError::InvalidHrp { .. })
        ));
    }

    #[test]
    fn wrong_length_rejected() {
        let hrp = Hrp::parse(ACCOUNT_HRP).unwrap();
        let short = bech32::encode::<Bech32>(hrp, &[0u8; 20]).unwrap();
        assert!(matches!(
            AccountId::from_address(&short),
            Err(AccountIdError::InvalidDataLength { expected: 32, got: 20 })
        ));
    }

    #[test]
    fn garbage_rejected() {
        assert!(matches!(
            AccountId::from_address("definitely not an address"),
            Err(AccountIdError::Bech32Decode(_))
        ));
    }

    #[test]
    fn serde_human_readable_uses_address() {
        let id = test_id(3);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.to_address()));
        let restored: AccountId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, restored);
    }

    #[test]
    fn ids_are_usable_as_map_keys() {
        use std::collections::HashMap;
        let mut m = HashMap::new();
        m.insert(test_id(1), 10u64);
        m.insert(test_id(2), 20u64);
        assert_eq!(m[&test_id(1)], 10);
        assert_eq!(m[&test_id(2)], 20);
    }
}
