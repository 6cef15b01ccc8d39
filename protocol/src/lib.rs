// Copyright (c) 2026 Lyceum Labs. MIT License.
// See LICENSE for details.

//! # Lyceum Protocol — Core Library
//!
//! Protocol-level primitives for the Lyceum academic-credential ledger:
//! the things every contract needs but no contract owns.
//!
//! Lyceum models a credential economy the way a ledger sees it. Students
//! buy fungible credit tokens from a university at a fixed rate, spend
//! them to enroll in courses, and — if the professor is merciful — walk
//! away owning a non-fungible enrollment record that doubles as the
//! diploma. The stateful contracts live in the `lyceum-contracts` crate;
//! this crate holds what they build on:
//!
//! - **config** — Protocol constants and exchange parameters. Every magic
//!   number lives here, nowhere else.
//! - **identity** — Account identities: Ed25519-derived, BLAKE3-hashed,
//!   Bech32-rendered. Opaque everywhere else.
//! - **pricing** — The deterministic tuition formulas. Pure functions,
//!   integer arithmetic, no state, no surprises.
//!
//! ## Design Philosophy
//!
//! 1. All monetary and credit amounts are `u64` in smallest-unit
//!    denomination. Overflow is an error, never a wrap.
//! 2. The hosting ledger authenticates callers and settles native value;
//!    this library never verifies a signature and never touches a wallet.
//! 3. If it prices money, it is a pure function with a pinned test.

pub mod config;
pub mod identity;
pub mod pricing;
