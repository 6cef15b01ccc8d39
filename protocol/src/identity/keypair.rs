//! Ed25519 keypair generation for Lyceum account provisioning.
//!
//! Every account on the hosting ledger traces back to an Ed25519 keypair.
//! Lyceum only ever consumes the public half — signature creation and
//! verification happen in the ledger's execution layer — but the keypair
//! is where an identity is born, so the provisioning path lives here.
//!
//! Private key bytes never appear in logs or error messages. Keep it
//! that way.

use ed25519_dalek::{SigningKey, SECRET_KEY_LENGTH};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::identity::account::AccountId;

/// Errors that can occur during key operations.
///
/// Intentionally vague about *why* the material was rejected — leaking
/// details about key bytes through error messages is a classic footgun.
#[derive(Debug, Error)]
pub enum KeyError {
    /// The supplied secret key bytes are the wrong length or not valid hex.
    #[error("invalid secret key bytes: wrong length or malformed encoding")]
    InvalidSecretKey,
}

/// An Ed25519 keypair backing one Lyceum account.
///
/// Deliberately does NOT implement `Serialize`/`Deserialize`: a private
/// key that can ride along in any derived struct will, eventually, and
/// nobody will notice until it has.
pub struct AccountKeypair {
    signing_key: SigningKey,
}

/// The public half of an account keypair, safe to share with the world.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountPublicKey {
    bytes: [u8; 32],
}

impl AccountKeypair {
    /// Generate a fresh keypair using the OS cryptographic RNG.
    ///
    /// `OsRng` defers entropy to the operating system, which is the only
    /// party with any business providing it.
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut OsRng);
        Self { signing_key }
    }

    /// Construct a keypair deterministically from a 32-byte seed.
    ///
    /// Total, since Ed25519 accepts any 32 bytes as secret key material.
    /// Useful for fixtures and for deriving accounts from a KDF. A weak
    /// seed yields a weak key; use a CSPRNG or KDF to produce it.
    pub fn from_seed(seed: &[u8; SECRET_KEY_LENGTH]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Reconstruct a keypair from a hex-encoded secret key.
    ///
    /// Convenience for loading devnet fixtures from config files. Please
    /// do not put raw hex keys in config files in production.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_str).map_err(|_| KeyError::InvalidSecretKey)?;
        let seed: [u8; SECRET_KEY_LENGTH] =
            bytes.try_into().map_err(|_| KeyError::InvalidSecretKey)?;
        Ok(Self::from_seed(&seed))
    }

    /// The public half of this keypair.
    pub fn public_key(&self) -> AccountPublicKey {
        AccountPublicKey {
            bytes: self.signing_key.verifying_key().to_bytes(),
        }
    }

    /// The account identity derived from this keypair's public key.
    pub fn account_id(&self) -> AccountId {
        AccountId::from_public_key(&self.public_key())
    }
}

impl AccountPublicKey {
    /// Raw public key bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }
}

impl fmt::Debug for AccountPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountPublicKey({})", hex::encode(self.bytes))
    }
}
