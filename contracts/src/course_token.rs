//! # Course Token Contract
//!
//! One `CourseOffering` per course, each owning an independent
//! non-fungible record space: one record per enrollment, 1-based ids,
//! assigned monotonically and never reused. The record doubles as the
//! diploma artifact once passed.
//!
//! ## Record State Machine
//!
//! ```text
//!            enroll                    evaluate (grade < threshold)
//!    ┌─────────────────► Enrolled ──────────────────► EvaluatedFailed
//!    │                      │                          (terminal,
//!    │                      │ evaluate                  owner = university)
//!    │                      │ (grade >= threshold)
//!    │                      ▼
//!    │               EvaluatedPassed ◄──┐
//!    │               (owner = student)  │ relocate
//!    │                      │           │ (owner + university move
//!    │                      └───────────┘  to the new university)
//! ```
//!
//! Transitions that do not match the current state are rejected; the
//! grade written by the first evaluation is never overwritten.
//!
//! Enrollment is the only operation here that touches money: it debits
//! the course's tuition from the student's provenance-scoped credit
//! balance before minting the record, all within one atomic call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use tracing::info;

use lyceum_protocol::config::{GRADE_MAX, PASS_THRESHOLD};
use lyceum_protocol::identity::AccountId;
use lyceum_protocol::pricing::{self, AcademicYear, ExperimentalFactor, PricingError};

use crate::credit_token::{CreditLedger, LedgerError};
use crate::registry::{Registry, Role};

/// Identifier of one enrollment record within its course offering.
/// 1-based and monotonically assigned; never reused.
pub type RecordId = u64;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur during course offering operations.
#[derive(Debug, Error)]
pub enum CourseError {
    /// Teaching assignments are written only by the registrar.
    #[error("unauthorized: only the registrar may assign teaching staff")]
    UnauthorizedAssignment,

    /// The caller is not the professor assigned for the record's
    /// university on this course.
    #[error("unauthorized: caller is not the professor assigned for {university}")]
    NotAssignedProfessor {
        /// The university whose assigned professor was required.
        university: AccountId,
    },

    /// A referenced identity is absent from the required roll.
    #[error("not registered as {role}: {account}")]
    NotRegistered {
        /// The roll the identity was expected in.
        role: Role,
        /// The missing identity.
        account: AccountId,
    },

    /// Enrollment requires a professor to already be assigned for the
    /// teaching university.
    #[error("no professor assigned for {university} on this course")]
    NoProfessorAssigned {
        /// The university without an assignment.
        university: AccountId,
    },

    /// The record has already been evaluated; the first grade stands.
    #[error("record {record_id} has already been evaluated")]
    AlreadyEvaluated {
        /// The record in question.
        record_id: RecordId,
    },

    /// The record exists but names a different student.
    #[error("record {record_id} does not belong to student {student}")]
    StudentMismatch {
        /// The record in question.
        record_id: RecordId,
        /// The student the caller named.
        student: AccountId,
    },

    /// The grade is off the scale.
    #[error("grade {grade} is off the 0..={max} scale")]
    InvalidGrade {
        /// The rejected grade.
        grade: u32,
        /// The scale maximum.
        max: u32,
    },

    /// Only the record's current owner may relocate it.
    #[error("caller is not the owner of record {record_id}")]
    NotOwner {
        /// The record in question.
        record_id: RecordId,
    },

    /// Only a passed record may relocate; unevaluated and failed records
    /// stay where they are.
    #[error("record {record_id} is {status} and cannot be relocated")]
    NotRelocatable {
        /// The record in question.
        record_id: RecordId,
        /// Its current status.
        status: EnrollmentStatus,
    },

    /// The referenced record does not exist in this offering.
    #[error("record not found: {0}")]
    RecordNotFound(RecordId),

    /// The tuition debit failed; the enrollment did not happen.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// The tuition could not be priced.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Lifecycle status of an enrollment record.
///
/// `EvaluatedFailed` is terminal. `EvaluatedPassed` self-loops under
/// relocation: the record stays passed, only its owner and university
/// move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnrollmentStatus {
    /// Minted, tuition paid, awaiting a grade. Owned by the university.
    Enrolled,
    /// Graded below the pass threshold. Stays with the university.
    EvaluatedFailed,
    /// Graded at or above the pass threshold. Owned by the student
    /// (until relocated to another university).
    EvaluatedPassed,
}

impl EnrollmentStatus {
    /// Whether a grade has been written.
    pub fn evaluated(&self) -> bool {
        !matches!(self, EnrollmentStatus::Enrolled)
    }

    /// Whether the record cleared the pass threshold.
    pub fn passed(&self) -> bool {
        matches!(self, EnrollmentStatus::EvaluatedPassed)
    }

    /// Whether the record may change university.
    pub fn relocatable(&self) -> bool {
        matches!(self, EnrollmentStatus::EvaluatedPassed)
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnrollmentStatus::Enrolled => write!(f, "Enrolled"),
            EnrollmentStatus::EvaluatedFailed => write!(f, "EvaluatedFailed"),
            EnrollmentStatus::EvaluatedPassed => write!(f, "EvaluatedPassed"),
        }
    }
}

/// One enrollment: the non-fungible record minted when a student pays
/// tuition for a course, graded by the assigned professor, and — once
/// passed — owned by the student as their diploma.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EnrollmentRecord {
    /// Record id within this course offering.
    pub id: RecordId,
    /// Current owner: the university until a pass, then the student,
    /// then whichever university the record was relocated to.
    pub owner: AccountId,
    /// The enrolled student. Never changes.
    pub student: AccountId,
    /// The university the enrollment is held under. Changes only on
    /// relocation.
    pub university: AccountId,
    /// The academic year of the attempt.
    pub academic_year: AcademicYear,
    /// The grade, once evaluated. The first written grade is final.
    pub grade: Option<u32>,
    /// Lifecycle status.
    pub status: EnrollmentStatus,
    /// When the enrollment was minted.
    pub enrolled_at: DateTime<Utc>,
    /// Timestamp of the most recent transition.
    pub updated_at: DateTime<Utc>,
}

impl EnrollmentRecord {
    /// Whether a grade has been written.
    pub fn evaluated(&self) -> bool {
        self.status.evaluated()
    }

    /// Whether the record cleared the pass threshold.
    pub fn passed(&self) -> bool {
        self.status.passed()
    }
}

// ---------------------------------------------------------------------------
// CourseOffering
// ---------------------------------------------------------------------------

/// One course's enrollment-record space and teaching roster.
///
/// Created by the ministry's offering factory; `name`, `symbol`,
/// `base_credits`, and `experimental_factor` are immutable afterwards.
/// The offering holds no money itself — it drives the shared
/// [`CreditLedger`] passed into [`enroll`](Self::enroll).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CourseOffering {
    /// Same central authority as the registry; gates teaching assignments.
    registrar: AccountId,
    name: String,
    symbol: String,
    base_credits: u64,
    experimental_factor: ExperimentalFactor,
    /// Next id to mint. Starts at 1; record 0 never exists.
    next_record_id: RecordId,
    records: HashMap<RecordId, EnrollmentRecord>,
    /// `university -> assigned professor`. Latest write wins.
    teaching: HashMap<AccountId, AccountId>,
    /// Records currently owned per account.
    record_counts: HashMap<AccountId, u64>,
    /// `student -> start year of their latest attempt`, for repeat pricing.
    prior_years: HashMap<AccountId, u32>,
    created_at: DateTime<Utc>,
}

impl CourseOffering {
    /// Creates an empty offering. Called by the ministry factory, which
    /// passes its own registrar identity through.
    pub fn new(
        registrar: AccountId,
        name: impl Into<String>,
        symbol: impl Into<String>,
        base_credits: u64,
        experimental_factor: ExperimentalFactor,
    ) -> Self {
        Self {
            registrar,
            name: name.into(),
            symbol: symbol.into(),
            base_credits,
            experimental_factor,
            next_record_id: 1,
            records: HashMap::new(),
            teaching: HashMap::new(),
            record_counts: HashMap::new(),
            prior_years: HashMap::new(),
            created_at: Utc::now(),
        }
    }

    /// Course name, e.g. `"Calculo 1"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Course symbol, e.g. `"CAL1"`.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Credits this course is worth, in full credits.
    pub fn base_credits(&self) -> u64 {
        self.base_credits
    }

    /// Experimental level of the curriculum.
    pub fn experimental_factor(&self) -> ExperimentalFactor {
        self.experimental_factor
    }

    /// When the offering was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// How many records this offering has minted so far.
    pub fn records_issued(&self) -> u64 {
        self.next_record_id - 1
    }

    // -----------------------------------------------------------------------
    // Teaching roster
    // -----------------------------------------------------------------------

    /// Assigns `professor` to grade on behalf of `university` for this
    /// course. Central-authority operation — universities do not pick
    /// their own graders. Overwriting an existing assignment is allowed;
    /// the latest write wins.
    ///
    /// # Errors
    ///
    /// [`CourseError::UnauthorizedAssignment`] unless `caller` is the
    /// registrar; [`CourseError::NotRegistered`] if either party is
    /// missing from its roll.
    pub fn authorize_university_professor(
        &mut self,
        registry: &Registry,
        caller: &AccountId,
        university: AccountId,
        professor: AccountId,
    ) -> Result<(), CourseError> {
        if caller != &self.registrar {
            return Err(CourseError::UnauthorizedAssignment);
        }
        if !registry.is_university(&university) {
            return Err(CourseError::NotRegistered {
                role: Role::University,
                account: university,
            });
        }
        if !registry.is_professor(&professor) {
            return Err(CourseError::NotRegistered {
                role: Role::Professor,
                account: professor,
            });
        }

        self.teaching.insert(university, professor);
        info!(course = %self.symbol, university = %university, professor = %professor,
            "teaching assignment recorded");
        Ok(())
    }

    /// The professor assigned for `university`, if any.
    pub fn professor_for(&self, university: &AccountId) -> Option<&AccountId> {
        self.teaching.get(university)
    }

    // -----------------------------------------------------------------------
    // Enrollment
    // -----------------------------------------------------------------------

    /// Tuition quote for `student`, in credit units: the exact amount
    /// [`enroll`](Self::enroll) would debit right now, including the
    /// repeat surcharge if the student has attempted this course before.
    pub fn tuition_for(&self, student: &AccountId) -> Result<u64, CourseError> {
        Ok(pricing::course_token_cost(
            self.experimental_factor,
            self.prior_year_for(student),
            self.base_credits,
        )?)
    }

    /// Enrolls `caller` in this course under `university`: debits the
    /// tuition from the caller's provenance-scoped balance and mints a
    /// new record owned by the university. Returns the record id.
    ///
    /// All checks precede the debit and the debit precedes the mint, so
    /// a failure at any step leaves both the ledger and the record space
    /// untouched.
    ///
    /// # Errors
    ///
    /// [`CourseError::NotRegistered`] if caller or university is not on
    /// its roll; [`CourseError::NoProfessorAssigned`] if the university
    /// has no grader here yet; [`CourseError::Ledger`] (insufficient
    /// provenance balance) if the caller cannot pay.
    pub fn enroll(
        &mut self,
        registry: &Registry,
        ledger: &mut CreditLedger,
        caller: &AccountId,
        university: AccountId,
        academic_year: AcademicYear,
    ) -> Result<RecordId, CourseError> {
        if !registry.is_student(caller) {
            return Err(CourseError::NotRegistered {
                role: Role::Student,
                account: *caller,
            });
        }
        if !registry.is_university(&university) {
            return Err(CourseError::NotRegistered {
                role: Role::University,
                account: university,
            });
        }
        if !self.teaching.contains_key(&university) {
            return Err(CourseError::NoProfessorAssigned { university });
        }

        let cost = self.tuition_for(caller)?;
        ledger.debit_for_enrollment(caller, &university, cost)?;

        // Point of no return: the tuition is paid, everything below is
        // infallible.
        let id = self.next_record_id;
        self.next_record_id = id
            .checked_add(1)
            .expect("enrollment record id space exhausted");
        let now = Utc::now();
        self.records.insert(
            id,
            EnrollmentRecord {
                id,
                owner: university,
                student: *caller,
                university,
                academic_year,
                grade: None,
                status: EnrollmentStatus::Enrolled,
                enrolled_at: now,
                updated_at: now,
            },
        );
        self.bump_count(university);
        self.prior_years.insert(*caller, academic_year.start_year());

        info!(course = %self.symbol, record = id, student = %caller,
            university = %university, year = %academic_year, cost,
            "enrollment minted");
        Ok(id)
    }

    // -----------------------------------------------------------------------
    // Evaluation
    // -----------------------------------------------------------------------

    /// Grades an enrollment. Only the professor assigned for the
    /// record's university may call; only an `Enrolled` record may be
    /// graded, and the first grade is final.
    ///
    /// At or above the pass threshold the record transfers from the
    /// university to the student, tallies included. Returns the
    /// resulting status.
    ///
    /// # Errors
    ///
    /// [`CourseError::InvalidGrade`], [`CourseError::RecordNotFound`],
    /// [`CourseError::NoProfessorAssigned`],
    /// [`CourseError::NotAssignedProfessor`],
    /// [`CourseError::StudentMismatch`], or
    /// [`CourseError::AlreadyEvaluated`]. State is untouched on any of
    /// them.
    pub fn evaluate(
        &mut self,
        caller: &AccountId,
        student: &AccountId,
        record_id: RecordId,
        grade: u32,
    ) -> Result<EnrollmentStatus, CourseError> {
        if grade > GRADE_MAX {
            return Err(CourseError::InvalidGrade {
                grade,
                max: GRADE_MAX,
            });
        }

        let record = self
            .records
            .get(&record_id)
            .ok_or(CourseError::RecordNotFound(record_id))?;
        let university = record.university;

        let assigned = self
            .teaching
            .get(&university)
            .ok_or(CourseError::NoProfessorAssigned { university })?;
        if caller != assigned {
            return Err(CourseError::NotAssignedProfessor { university });
        }
        if record.student != *student {
            return Err(CourseError::StudentMismatch {
                record_id,
                student: *student,
            });
        }
        if record.status != EnrollmentStatus::Enrolled {
            return Err(CourseError::AlreadyEvaluated { record_id });
        }

        let passed = grade >= PASS_THRESHOLD;
        let record = self
            .records
            .get_mut(&record_id)
            .ok_or(CourseError::RecordNotFound(record_id))?;
        record.grade = Some(grade);
        record.status = if passed {
            EnrollmentStatus::EvaluatedPassed
        } else {
            EnrollmentStatus::EvaluatedFailed
        };
        record.updated_at = Utc::now();
        if passed {
            record.owner = *student;
        }
        let status = record.status;

        if passed {
            self.drop_count(&university);
            self.bump_count(*student);
        }

        info!(course = %self.symbol, record = record_id, student = %student,
            grade, %status, "enrollment evaluated");
        Ok(status)
    }

    // -----------------------------------------------------------------------
    // Relocation
    // -----------------------------------------------------------------------

    /// Moves a passed record to another university: credit-recognition
    /// transfer. Only the current owner may initiate, and only an
    /// `EvaluatedPassed` record qualifies — unevaluated and failed
    /// records stay where they are.
    ///
    /// # Errors
    ///
    /// [`CourseError::RecordNotFound`], [`CourseError::NotOwner`],
    /// [`CourseError::NotRegistered`] for the target university, or
    /// [`CourseError::NotRelocatable`].
    pub fn relocate(
        &mut self,
        registry: &Registry,
        caller: &AccountId,
        record_id: RecordId,
        new_university: AccountId,
    ) -> Result<(), CourseError> {
        if !registry.is_university(&new_university) {
            return Err(CourseError::NotRegistered {
                role: Role::University,
                account: new_university,
            });
        }

        let record = self
            .records
            .get(&record_id)
            .ok_or(CourseError::RecordNotFound(record_id))?;
        if record.owner != *caller {
            return Err(CourseError::NotOwner { record_id });
        }
        if !record.status.relocatable() {
            return Err(CourseError::NotRelocatable {
                record_id,
                status: record.status,
            });
        }

        let old_owner = record.owner;
        let record = self
            .records
            .get_mut(&record_id)
            .ok_or(CourseError::RecordNotFound(record_id))?;
        record.owner = new_university;
        record.university = new_university;
        record.updated_at = Utc::now();

        self.drop_count(&old_owner);
        self.bump_count(new_university);

        info!(course = %self.symbol, record = record_id, from = %old_owner,
            to = %new_university, "record relocated");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// The record with the given id.
    pub fn record(&self, record_id: RecordId) -> Result<&EnrollmentRecord, CourseError> {
        self.records
            .get(&record_id)
            .ok_or(CourseError::RecordNotFound(record_id))
    }

    /// Current owner of the record.
    pub fn owner_of(&self, record_id: RecordId) -> Result<AccountId, CourseError> {
        self.record(record_id).map(|r| r.owner)
    }

    /// How many records `account` currently owns in this offering.
    pub fn record_count_of(&self, account: &AccountId) -> u64 {
        self.record_counts.get(account).copied().unwrap_or(0)
    }

    fn prior_year_for(&self, student: &AccountId) -> u32 {
        self.prior_years.get(student).copied().unwrap_or(0)
    }

    fn bump_count(&mut self, account: AccountId) {
        *self.record_counts.entry(account).or_insert(0) += 1;
    }

    fn drop_count(&mut self, account: &AccountId) {
        if let Some(count) = self.record_counts.get_mut(account) {
            *count = count.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lyceum_protocol::identity::AccountKeypair;

    fn acct(seed: u8) -> AccountId {
        AccountKeypair::from_seed(&[seed; 32]).account_id()
    }

    fn year() -> AcademicYear {
        AcademicYear::parse("2025/26").unwrap()
    }

    /// Admin, university, professor, student, with the student funded
    /// well past one standard tuition.
    fn campus() -> (Registry, CreditLedger, CourseOffering, [AccountId; 4]) {
        let admin = acct(0);
        let uni = acct(1);
        let prof = acct(2);
        let student = acct(3);

        let mut registry = Registry::new(admin);
        registry.register_university(&admin, uni, "UNIR").unwrap();
        registry.register_professor(&admin, prof, "Javier Montesinos").unwrap();
        registry.register_student(&admin, student, "Ada").unwrap();

        let mut ledger = CreditLedger::new();
        ledger.issue_genesis(uni, 10_000_000).unwrap();
        ledger.credit_from_purchase(&student, &uni, 500_000).unwrap();

        let mut course = CourseOffering::new(admin, "Calculo 1", "CAL1", 7, ExperimentalFactor::Standard);
        course
            .authorize_university_professor(&registry, &admin, uni, prof)
            .unwrap();

        (registry, ledger, course, [admin, uni, prof, student])
    }

    #[test]
    fn offering_metadata_is_fixed_at_creation() {
        let course = CourseOffering::new(acct(0), "Calculo 1", "CAL1", 7, ExperimentalFactor::Standard);
        assert_eq!(course.name(), "Calculo 1");
        assert_eq!(course.symbol(), "CAL1");
        assert_eq!(course.base_credits(), 7);
        assert_eq!(course.experimental_factor(), ExperimentalFactor::Standard);
        assert_eq!(course.records_issued(), 0);
    }

    #[test]
    fn teaching_assignment_and_overwrite() {
        let (registry, _, mut course, [admin, uni, prof, _]) = campus();
        assert_eq!(course.professor_for(&uni), Some(&prof));

        // Latest write wins.
        let mut registry2 = registry.clone();
        let prof2 = acct(9);
        registry2.register_professor(&admin, prof2, "Dr. Nueva").unwrap();
        course
            .authorize_university_professor(&registry2, &admin, uni, prof2)
            .unwrap();
        assert_eq!(course.professor_for(&uni), Some(&prof2));
    }

    #[test]
    fn assignment_requires_registrar() {
        let (registry, _, mut course, [_, uni, prof, student]) = campus();
        let result = course.authorize_university_professor(&registry, &student, uni, prof);
        assert!(matches!(result, Err(CourseError::UnauthorizedAssignment)));
    }

    #[test]
    fn assignment_requires_registered_parties() {
        let (registry, _, mut course, [admin, uni, ..]) = campus();
        let ghost = acct(8);
        assert!(matches!(
            course.authorize_university_professor(&registry, &admin, ghost, acct(2)),
            Err(CourseError::NotRegistered { role: Role::University, .. })
        ));
        assert!(matches!(
            course.authorize_university_professor(&registry, &admin, uni, ghost),
            Err(CourseError::NotRegistered { role: Role::Professor, .. })
        ));
    }

    #[test]
    fn enroll_mints_record_owned_by_university() {
        let (registry, mut ledger, mut course, [_, uni, _, student]) = campus();
        let balance_before = ledger.balance_of(&student);

        let id = course
            .enroll(&registry, &mut ledger, &student, uni, year())
            .unwrap();
        assert_eq!(id, 1);

        let record = course.record(id).unwrap();
        assert_eq!(record.owner, uni);
        assert_eq!(record.student, student);
        assert_eq!(record.university, uni);
        assert_eq!(record.status, EnrollmentStatus::Enrolled);
        assert_eq!(record.grade, None);
        assert_eq!(course.record_count_of(&uni), 1);

        // Standard 7-credit course: 70_000 units of tuition.
        assert_eq!(ledger.balance_of(&student), balance_before - 70_000);
    }

    #[test]
    fn record_ids_are_monotonic_from_one() {
        let (registry, mut ledger, mut course, [_, uni, _, student]) = campus();
        let first = course.enroll(&registry, &mut ledger, &student, uni, year()).unwrap();
        let second = course
            .enroll(&registry, &mut ledger, &student, uni, AcademicYear::parse("2026/27").unwrap())
            .unwrap();
        assert_eq!((first, second), (1, 2));
        assert_eq!(course.records_issued(), 2);
    }

    #[test]
    fn repeat_enrollment_pays_the_surcharge() {
        let (registry, mut ledger, mut course, [_, uni, _, student]) = campus();
        assert_eq!(course.tuition_for(&student).unwrap(), 70_000);
        course.enroll(&registry, &mut ledger, &student, uni, year()).unwrap();

        // Second attempt: the prior year is on file, +50%.
        assert_eq!(course.tuition_for(&student).unwrap(), 105_000);
        let balance_before = ledger.balance_of(&student);
        course
            .enroll(&registry, &mut ledger, &student, uni, AcademicYear::parse("2026/27").unwrap())
            .unwrap();
        assert_eq!(ledger.balance_of(&student), balance_before - 105_000);
    }

    #[test]
    fn enroll_requires_assigned_professor() {
        let (mut registry, mut ledger, mut course, [admin, _, _, student]) = campus();
        let uni_b = acct(5);
        registry.register_university(&admin, uni_b, "Other U").unwrap();
        ledger.issue_genesis(uni_b, 1_000_000).unwrap();
        ledger.credit_from_purchase(&student, &uni_b, 200_000).unwrap();

        let result = course.enroll(&registry, &mut ledger, &student, uni_b, year());
        assert!(matches!(
            result,
            Err(CourseError::NoProfessorAssigned { university }) if university == uni_b
        ));
    }

    #[test]
    fn enroll_requires_registered_student() {
        let (registry, mut ledger, mut course, [_, uni, ..]) = campus();
        let outsider = acct(7);
        let result = course.enroll(&registry, &mut ledger, &outsider, uni, year());
        assert!(matches!(
            result,
            Err(CourseError::NotRegistered { role: Role::Student, .. })
        ));
    }

    #[test]
    fn enroll_with_foreign_credits_rejected_atomically() {
        // Student holds University-A credits only; the course is taught
        // under University B. The debit must fail and mint nothing.
        let (mut registry, mut ledger, mut course, [admin, _, prof, student]) = campus();
        let uni_b = acct(5);
        registry.register_university(&admin, uni_b, "Other U").unwrap();
        ledger.issue_genesis(uni_b, 1_000_000).unwrap();
        course
            .authorize_university_professor(&registry, &admin, uni_b, prof)
            .unwrap();

        let result = course.enroll(&registry, &mut ledger, &student, uni_b, year());
        assert!(matches!(
            result,
            Err(CourseError::Ledger(LedgerError::InsufficientProvenanceBalance { .. }))
        ));
        assert_eq!(course.records_issued(), 0);
        assert_eq!(ledger.balance_of(&student), 500_000);
    }

    #[test]
    fn failing_grade_keeps_university_ownership() {
        let (registry, mut ledger, mut course, [_, uni, prof, student]) = campus();
        let id = course.enroll(&registry, &mut ledger, &student, uni, year()).unwrap();

        let status = course.evaluate(&prof, &student, id, 400).unwrap();
        assert_eq!(status, EnrollmentStatus::EvaluatedFailed);

        let record = course.record(id).unwrap();
        assert_eq!(record.grade, Some(400));
        assert!(record.evaluated());
        assert!(!record.passed());
        assert_eq!(record.owner, uni);
        assert_eq!(course.record_count_of(&uni), 1);
        assert_eq!(course.record_count_of(&student), 0);
    }

    #[test]
    fn passing_grade_transfers_ownership_to_student() {
        let (registry, mut ledger, mut course, [_, uni, prof, student]) = campus();
        let id = course.enroll(&registry, &mut ledger, &student, uni, year()).unwrap();

        let status = course.evaluate(&prof, &student, id, 700).unwrap();
        assert_eq!(status, EnrollmentStatus::EvaluatedPassed);
        assert_eq!(course.owner_of(id).unwrap(), student);
        assert_eq!(course.record_count_of(&uni), 0);
        assert_eq!(course.record_count_of(&student), 1);
    }

    #[test]
    fn threshold_grade_passes() {
        let (registry, mut ledger, mut course, [_, uni, prof, student]) = campus();
        let id = course.enroll(&registry, &mut ledger, &student, uni, year()).unwrap();
        let status = course.evaluate(&prof, &student, id, PASS_THRESHOLD).unwrap();
        assert_eq!(status, EnrollmentStatus::EvaluatedPassed);
    }

    #[test]
    fn double_evaluation_rejected_and_grade_stands() {
        let (registry, mut ledger, mut course, [_, uni, prof, student]) = campus();
        let id = course.enroll(&registry, &mut ledger, &student, uni, year()).unwrap();
        course.evaluate(&prof, &student, id, 700).unwrap();

        let result = course.evaluate(&prof, &student, id, 100);
        assert!(matches!(result, Err(CourseError::AlreadyEvaluated { .. })));
        assert_eq!(course.record(id).unwrap().grade, Some(700));
        assert_eq!(course.owner_of(id).unwrap(), student);
    }

    #[test]
    fn only_the_assigned_professor_may_grade() {
        let (mut registry, mut ledger, mut course, [admin, uni, _, student]) = campus();
        let other_prof = acct(6);
        registry.register_professor(&admin, other_prof, "Dr. Else").unwrap();
        let id = course.enroll(&registry, &mut ledger, &student, uni, year()).unwrap();

        let result = course.evaluate(&other_prof, &student, id, 700);
        assert!(matches!(result, Err(CourseError::NotAssignedProfessor { .. })));
        assert_eq!(course.record(id).unwrap().status, EnrollmentStatus::Enrolled);
    }

    #[test]
    fn evaluate_checks_student_and_scale() {
        let (registry, mut ledger, mut course, [_, uni, prof, student]) = campus();
        let id = course.enroll(&registry, &mut ledger, &student, uni, year()).unwrap();

        assert!(matches!(
            course.evaluate(&prof, &acct(9), id, 700),
            Err(CourseError::StudentMismatch { .. })
        ));
        assert!(matches!(
            course.evaluate(&prof, &student, id, GRADE_MAX + 1),
            Err(CourseError::InvalidGrade { .. })
        ));
        assert!(matches!(
            course.evaluate(&prof, &student, 99, 700),
            Err(CourseError::RecordNotFound(99))
        ));
    }

    #[test]
    fn relocation_moves_owner_university_and_tallies() {
        let (mut registry, mut ledger, mut course, [admin, uni, prof, student]) = campus();
        let uni_c = acct(5);
        registry.register_university(&admin, uni_c, "Destino U").unwrap();

        let id = course.enroll(&registry, &mut ledger, &student, uni, year()).unwrap();
        course.evaluate(&prof, &student, id, 700).unwrap();

        course.relocate(&registry, &student, id, uni_c).unwrap();
        let record = course.record(id).unwrap();
        assert_eq!(record.owner, uni_c);
        assert_eq!(record.university, uni_c);
        assert_eq!(record.status, EnrollmentStatus::EvaluatedPassed);
        assert_eq!(course.record_count_of(&student), 0);
        assert_eq!(course.record_count_of(&uni_c), 1);
        assert_eq!(course.record_count_of(&uni), 0);
    }

    #[test]
    fn relocation_requires_current_owner() {
        let (mut registry, mut ledger, mut course, [admin, uni, prof, student]) = campus();
        let uni_c = acct(5);
        registry.register_university(&admin, uni_c, "Destino U").unwrap();
        let id = course.enroll(&registry, &mut ledger, &student, uni, year()).unwrap();
        course.evaluate(&prof, &student, id, 700).unwrap();

        // The university lost ownership on the pass.
        let result = course.relocate(&registry, &uni, id, uni_c);
        assert!(matches!(result, Err(CourseError::NotOwner { .. })));
    }

    #[test]
    fn unevaluated_and_failed_records_do_not_relocate() {
        let (mut registry, mut ledger, mut course, [admin, uni, prof, student]) = campus();
        let uni_c = acct(5);
        registry.register_university(&admin, uni_c, "Destino U").unwrap();

        let ungraded = course.enroll(&registry, &mut ledger, &student, uni, year()).unwrap();
        assert!(matches!(
            course.relocate(&registry, &uni, ungraded, uni_c),
            Err(CourseError::NotRelocatable { status: EnrollmentStatus::Enrolled, .. })
        ));

        let failed = course
            .enroll(&registry, &mut ledger, &student, uni, AcademicYear::parse("2026/27").unwrap())
            .unwrap();
        course.evaluate(&prof, &student, failed, 400).unwrap();
        assert!(matches!(
            course.relocate(&registry, &uni, failed, uni_c),
            Err(CourseError::NotRelocatable { status: EnrollmentStatus::EvaluatedFailed, .. })
        ));
    }

    #[test]
    fn relocation_target_must_be_registered() {
        let (registry, mut ledger, mut course, [_, uni, prof, student]) = campus();
        let id = course.enroll(&registry, &mut ledger, &student, uni, year()).unwrap();
        course.evaluate(&prof, &student, id, 700).unwrap();

        let result = course.relocate(&registry, &student, id, acct(8));
        assert!(matches!(
            result,
            Err(CourseError::NotRegistered { role: Role::University, .. })
        ));
    }

    #[test]
    fn reads_are_idempotent() {
        let (registry, mut ledger, mut course, [_, uni, _, student]) = campus();
        let id = course.enroll(&registry, &mut ledger, &student, uni, year()).unwrap();

        let first = course.record(id).unwrap().clone();
        let second = course.record(id).unwrap().clone();
        assert_eq!(first.id, second.id);
        assert_eq!(first.owner, second.owner);
        assert_eq!(first.status, second.status);
        assert_eq!(first.grade, second.grade);
        assert_eq!(first.updated_at, second.updated_at);
    }

    #[test]
    fn offering_serialization_roundtrip() {
        let (registry, mut ledger, mut course, [_, uni, prof, student]) = campus();
        let id = course.enroll(&registry, &mut ledger, &student, uni, year()).unwrap();
        course.evaluate(&prof, &student, id, 700).unwrap();

        let json = serde_json::to_string(&course).unwrap();
        let restored: CourseOffering = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.symbol(), "CAL1");
        assert_eq!(restored.owner_of(id).unwrap(), student);
        assert_eq!(restored.record_count_of(&student), 1);
    }
}
