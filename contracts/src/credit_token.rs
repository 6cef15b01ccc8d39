//! # Credit Token Contract
//!
//! The fungible side of the credential economy. Credits are fungible for
//! transfer but not for spending: every credit a student holds remembers
//! which university issued it, and only that university's courses will
//! accept it. The ledger therefore keeps two views in lockstep:
//!
//! - the **total balance** per account, and
//! - the **provenance sub-balances** per (student, issuing university).
//!
//! Invariants, maintained atomically by every balance-affecting call:
//!
//! 1. The sum of all total balances equals the supply issued at genesis
//!    registrations — nothing in this contract mints afterwards or burns.
//! 2. For every student, the provenance sub-balances sum to the student's
//!    total balance.
//!
//! Every mutation is compute-then-commit: all checked arithmetic happens
//! before the first map write, so a failed call leaves the books exactly
//! as it found them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

use lyceum_protocol::identity::AccountId;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The holder's total balance cannot cover the debit.
    #[error("insufficient balance: {holder} holds {available}, required {required}")]
    InsufficientBalance {
        /// The account being debited.
        holder: AccountId,
        /// Its current total balance.
        available: u64,
        /// The amount the operation needed.
        required: u64,
    },

    /// The student's sub-balance for this specific issuer cannot cover
    /// the debit. Credits issued elsewhere do not help, no matter how
    /// many the student holds.
    #[error(
        "insufficient provenance balance: {student} holds {available} issued by {university}, required {required}"
    )]
    InsufficientProvenanceBalance {
        /// The spending student.
        student: AccountId,
        /// The issuing university whose credits were required.
        university: AccountId,
        /// The student's sub-balance for that university.
        available: u64,
        /// The amount the enrollment needed.
        required: u64,
    },

    /// A credit would push a balance past `u64::MAX`.
    #[error("balance overflow crediting {account}")]
    BalanceOverflow {
        /// The account whose balance would overflow.
        account: AccountId,
    },
}

// ---------------------------------------------------------------------------
// CreditLedger
// ---------------------------------------------------------------------------

/// The credit-token ledger.
///
/// All amounts are credit units (see the protocol crate's
/// `CREDIT_UNIT_SCALE`). `total_issued` is tracked at issuance so the
/// conservation invariant is checkable in O(1) rather than recomputed.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CreditLedger {
    /// Total fungible balance per account.
    balances: HashMap<AccountId, u64>,
    /// `student -> issuing university -> sub-balance`.
    provenance: HashMap<AccountId, HashMap<AccountId, u64>>,
    /// Sum of all genesis issuances; the books must always total this.
    total_issued: u64,
}

impl CreditLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mints a university's initial credit float at registration time.
    ///
    /// This is the only operation that changes the circulating supply;
    /// everything else transfers. Returns the university's new balance.
    ///
    /// # Errors
    ///
    /// [`LedgerError::BalanceOverflow`] if the university balance or the
    /// issued total would exceed `u64::MAX`.
    pub fn issue_genesis(
        &mut self,
        university: AccountId,
        amount: u64,
    ) -> Result<u64, LedgerError> {
        let overflow = || LedgerError::BalanceOverflow { account: university };
        let new_balance = self
            .balance_of(&university)
            .checked_add(amount)
            .ok_or_else(overflow)?;
        let new_total = self.total_issued.checked_add(amount).ok_or_else(overflow)?;

        self.balances.insert(university, new_balance);
        self.total_issued = new_total;

        debug!(university = %university, amount, "genesis credit supply issued");
        Ok(new_balance)
    }

    /// Settles a token purchase: moves `amount` from the issuing
    /// university's float to the student, and records the provenance.
    ///
    /// A transfer, not a mint — the university must still hold the
    /// credits it is selling.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InsufficientBalance`] if the university's float is
    /// short; [`LedgerError::BalanceOverflow`] if the student's balance
    /// would overflow. Either way, nothing moves.
    pub fn credit_from_purchase(
        &mut self,
        student: &AccountId,
        university: &AccountId,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let uni_balance = self.balance_of(university);
        let new_uni_balance =
            uni_balance
                .checked_sub(amount)
                .ok_or(LedgerError::InsufficientBalance {
                    holder: *university,
                    available: uni_balance,
                    required: amount,
                })?;
        let new_student_balance = self
            .balance_of(student)
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow { account: *student })?;
        let new_sub_balance = self
            .provenance_balance_of(student, university)
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow { account: *student })?;

        self.balances.insert(*university, new_uni_balance);
        self.balances.insert(*student, new_student_balance);
        self.provenance
            .entry(*student)
            .or_default()
            .insert(*university, new_sub_balance);

        debug!(student = %student, university = %university, amount, "credits purchased");
        Ok(())
    }

    /// Settles an enrollment: moves `amount` from the student back to the
    /// university, consuming the matching provenance sub-balance.
    ///
    /// Spending is provenance-scoped — only credits originally issued by
    /// `university` qualify.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InsufficientProvenanceBalance`] if the student's
    /// sub-balance for this university is short;
    /// [`LedgerError::BalanceOverflow`] if the university's balance would
    /// overflow. Either way, nothing moves.
    pub fn debit_for_enrollment(
        &mut self,
        student: &AccountId,
        university: &AccountId,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let sub_balance = self.provenance_balance_of(student, university);
        let new_sub_balance = sub_balance.checked_sub(amount).ok_or(
            LedgerError::InsufficientProvenanceBalance {
                student: *student,
                university: *university,
                available: sub_balance,
                required: amount,
            },
        )?;
        // The provenance invariant guarantees sub-balance <= total, so
        // this subtraction cannot fail once the check above has passed;
        // checked anyway, because money.
        let student_balance = self.balance_of(student);
        let new_student_balance =
            student_balance
                .checked_sub(amount)
                .ok_or(LedgerError::InsufficientBalance {
                    holder: *student,
                    available: student_balance,
                    required: amount,
                })?;
        let new_uni_balance = self
            .balance_of(university)
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow { account: *university })?;

        self.balances.insert(*student, new_student_balance);
        self.balances.insert(*university, new_uni_balance);
        self.provenance
            .entry(*student)
            .or_default()
            .insert(*university, new_sub_balance);

        debug!(student = %student, university = %university, amount, "credits spent on enrollment");
        Ok(())
    }

    /// Total balance of an account. Unknown accounts hold zero.
    pub fn balance_of(&self, account: &AccountId) -> u64 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// The portion of `student`'s balance issued by `university`.
    pub fn provenance_balance_of(&self, student: &AccountId, university: &AccountId) -> u64 {
        self.provenance
            .get(student)
            .and_then(|per_uni| per_uni.get(university))
            .copied()
            .unwrap_or(0)
    }

    /// Sum of `student`'s provenance sub-balances across all issuers.
    /// Equals [`balance_of`](Self::balance_of) for any account that only
    /// ever received credits through purchases.
    pub fn provenance_total_of(&self, student: &AccountId) -> u64 {
        self.provenance
            .get(student)
            .map(|per_uni| per_uni.values().sum())
            .unwrap_or(0)
    }

    /// Total supply ever issued at genesis registrations.
    pub fn total_issued(&self) -> u64 {
        self.total_issued
    }

    /// Sum of every account's total balance. Conservation means this
    /// always equals [`total_issued`](Self::total_issued); tests hold the
    /// contract to it.
    pub fn total_held(&self) -> u64 {
        self.balances.values().sum()
    }
}
