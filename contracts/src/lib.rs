//! # Lyceum Contracts
//!
//! The stateful heart of the Lyceum academic-credential ledger. These
//! contracts implement the economy the protocol crate only prices:
//!
//! - **Registry** — the authoritative rolls of universities, professors,
//!   and students, amendable only by the ministry's registrar identity.
//! - **Credit Token** — the fungible credit ledger, with per-issuer
//!   provenance sub-balances so a credit is spendable only at the
//!   university that sold it.
//! - **Course Token** — one non-fungible record space per course
//!   offering: enrollment minting, grading, and relocation of passed
//!   records between universities.
//! - **Ministry** — the orchestrating state controller that owns the
//!   registry and the ledger and acts as the factory for course
//!   offerings.
//!
//! ## Design Principles
//!
//! 1. All monetary operations check for overflow — `checked_add` and
//!    `checked_sub` everywhere; wrapping arithmetic has no business near
//!    money.
//! 2. State transitions are explicit: enum variants, not boolean flags.
//! 3. Every privileged operation takes the caller identity explicitly and
//!    validates it before touching state; a rejected call leaves state
//!    byte-for-byte unchanged.
//! 4. Every public type derives serde traits so contract state can be
//!    snapshotted and shipped by the hosting substrate.
//!
//! The hosting ledger is assumed to serialize all mutating calls into a
//! single global order; every public operation here is one atomic unit of
//! work with no internal suspension point. Embedders running outside such
//! a substrate should wrap the [`state::Ministry`] in their own
//! transactional boundary (one mutex is enough).

pub mod course_token;
pub mod credit_token;
pub mod registry;
pub mod state;
