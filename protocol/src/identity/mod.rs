//! # Identity Module — Account Provisioning & Addressing
//!
//! Participants in Lyceum — universities, professors, students, and the
//! ministry itself — are identified by an [`AccountId`]: the BLAKE3 hash
//! of an Ed25519 public key, rendered as a Bech32 address with the `lyc`
//! prefix.
//!
//! The contracts never look inside an `AccountId`. It is an opaque map
//! key with value semantics; authentication of the caller behind it is
//! the hosting ledger's job, not ours. What this module provides is the
//! provisioning path — generating keypairs and deriving well-formed
//! identities — so that tests, demos, and substrate integrations all
//! speak the same address format.
//!
//! ```text
//! public_key (32 bytes)
//!     -> BLAKE3(public_key) -> 32 bytes
//!     -> Bech32("lyc", hash) -> lyc1u8f3mv0q...
//! ```

pub mod account;
pub mod keypair;

pub use account::{AccountId, AccountIdError};
pub use keypair::{AccountKeypair, AccountPublicKey, KeyError};
