//! # Registry Contract
//!
//! The authoritative rolls of the credential economy: which identities
//! are universities, which are professors, which are students. Every
//! other contract gates its operations on these existence checks, so the
//! registry is deliberately boring — append-only sequences with an
//! O(1) membership index, amendable by exactly one identity.
//!
//! Roles are independent sets. Registering the same identity under two
//! roles is a caller usage error the registry does not defend against;
//! registering it twice under one role is rejected.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

use lyceum_protocol::identity::AccountId;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur during registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The caller is not the registrar fixed at construction time.
    #[error("unauthorized: only the registrar may amend the registry")]
    Unauthorized,

    /// The identity is already present in that role's roll.
    #[error("already registered as {role}: {account}")]
    AlreadyRegistered {
        /// The role the duplicate registration targeted.
        role: Role,
        /// The offending identity.
        account: AccountId,
    },
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A participant role in the credential economy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Issues credit tokens and teaches courses.
    University,
    /// Grades enrollments on behalf of a university.
    Professor,
    /// Buys credits, enrolls, and eventually owns diplomas.
    Student,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::University => write!(f, "university"),
            Role::Professor => write!(f, "professor"),
            Role::Student => write!(f, "student"),
        }
    }
}

/// One roll entry: an identity and its human-readable display name.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegistryEntry {
    /// The registered identity.
    pub account: AccountId,
    /// Display name supplied at registration ("UNIR", "Javier Montesinos", ...).
    pub display_name: String,
    /// When the registrar added this entry.
    pub registered_at: DateTime<Utc>,
}

/// One role's roll: insertion-ordered entries plus a membership index.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct RoleRoll {
    entries: Vec<RegistryEntry>,
    /// `account -> position in entries`, kept in lockstep with `entries`.
    index: HashMap<AccountId, usize>,
}

impl RoleRoll {
    fn insert(
        &mut self,
        role: Role,
        account: AccountId,
        display_name: String,
    ) -> Result<(), RegistryError> {
        if self.index.contains_key(&account) {
            return Err(RegistryError::AlreadyRegistered { role, account });
        }
        self.index.insert(account, self.entries.len());
        self.entries.push(RegistryEntry {
            account,
            display_name,
            registered_at: Utc::now(),
        });
        Ok(())
    }

    fn contains(&self, account: &AccountId) -> bool {
        self.index.contains_key(account)
    }

    fn get(&self, account: &AccountId) -> Option<&RegistryEntry> {
        self.index.get(account).map(|&i| &self.entries[i])
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// The registry contract.
///
/// The registrar identity is injected at construction and cannot be
/// rotated; every write checks it. Reads are open to anyone.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Registry {
    registrar: AccountId,
    universities: RoleRoll,
    professors: RoleRoll,
    students: RoleRoll,
}

impl Registry {
    /// Creates an empty registry amendable only by `registrar`.
    pub fn new(registrar: AccountId) -> Self {
        Self {
            registrar,
            universities: RoleRoll::default(),
            professors: RoleRoll::default(),
            students: RoleRoll::default(),
        }
    }

    /// The identity allowed to amend the rolls.
    pub fn registrar(&self) -> &AccountId {
        &self.registrar
    }

    /// Adds a university to the roll.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Unauthorized`] unless `caller` is the registrar;
    /// [`RegistryError::AlreadyRegistered`] on a duplicate identity.
    pub fn register_university(
        &mut self,
        caller: &AccountId,
        account: AccountId,
        display_name: impl Into<String>,
    ) -> Result<(), RegistryError> {
        self.authorize(caller)?;
        self.universities
            .insert(Role::University, account, display_name.into())
    }

    /// Adds a professor to the roll. Same gating as universities.
    pub fn register_professor(
        &mut self,
        caller: &AccountId,
        account: AccountId,
        display_name: impl Into<String>,
    ) -> Result<(), RegistryError> {
        self.authorize(caller)?;
        self.professors
            .insert(Role::Professor, account, display_name.into())
    }

    /// Adds a student to the roll. Same gating as universities.
    pub fn register_student(
        &mut self,
        caller: &AccountId,
        account: AccountId,
        display_name: impl Into<String>,
    ) -> Result<(), RegistryError> {
        self.authorize(caller)?;
        self.students
            .insert(Role::Student, account, display_name.into())
    }

    /// Registered universities, in insertion order.
    pub fn universities(&self) -> &[RegistryEntry] {
        &self.universities.entries
    }

    /// Registered professors, in insertion order.
    pub fn professors(&self) -> &[RegistryEntry] {
        &self.professors.entries
    }

    /// Registered students, in insertion order.
    pub fn students(&self) -> &[RegistryEntry] {
        &self.students.entries
    }

    /// Whether `account` is a registered university.
    pub fn is_university(&self, account: &AccountId) -> bool {
        self.universities.contains(account)
    }

    /// Whether `account` is a registered professor.
    pub fn is_professor(&self, account: &AccountId) -> bool {
        self.professors.contains(account)
    }

    /// Whether `account` is a registered student.
    pub fn is_student(&self, account: &AccountId) -> bool {
        self.students.contains(account)
    }

    /// Roll entry for `account` in `role`, if present.
    pub fn entry(&self, role: Role, account: &AccountId) -> Option<&RegistryEntry> {
        match role {
            Role::University => self.universities.get(account),
            Role::Professor => self.professors.get(account),
            Role::Student => self.students.get(account),
        }
    }

    fn authorize(&self, caller: &AccountId) -> Result<(), RegistryError> {
        if caller != &self.registrar {
            return Err(RegistryError::Unauthorized);
        }
        Ok(())
    }
}
