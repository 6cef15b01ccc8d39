//! # Ministry Contract — the orchestrating state controller
//!
//! Single entry point for the credential economy. The ministry owns the
//! registry and the credit ledger, fixes the administrative identity at
//! construction, sells credit tokens against native payment, and acts as
//! the factory for course offerings.
//!
//! Per-offering operations (teaching assignments, enrollment, grading,
//! relocation) are exposed here as wrappers that wire the shared registry
//! and ledger references into the addressed offering — one `&mut self`
//! call per state transition, which is what keeps every transition a
//! single atomic unit of work without any interior locking.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::info;

use lyceum_protocol::config::{CREDIT_UNIT_SCALE, UNIVERSITY_GENESIS_SUPPLY};
use lyceum_protocol::identity::AccountId;
use lyceum_protocol::pricing::{self, AcademicYear, ExperimentalFactor, PricingError};

use crate::course_token::{CourseError, CourseOffering, EnrollmentStatus, RecordId};
use crate::credit_token::{CreditLedger, LedgerError};
use crate::registry::{Registry, RegistryError, Role};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur during ministry operations.
#[derive(Debug, Error)]
pub enum MinistryError {
    /// The caller is not the ministry administrator.
    #[error("unauthorized: caller is not the ministry administrator")]
    Unauthorized,

    /// A referenced identity is absent from the required roll.
    #[error("not registered as {role}: {account}")]
    NotRegistered {
        /// The roll the identity was expected in.
        role: Role,
        /// The missing identity.
        account: AccountId,
    },

    /// The supplied native payment does not equal the computed price.
    /// Exact or nothing — the ministry does not make change.
    #[error("payment mismatch: required {required} wei, received {received}")]
    PaymentMismatch {
        /// The price [`pricing::credits_to_payment`] computed.
        required: u64,
        /// What the caller actually attached.
        received: u64,
    },

    /// The referenced course offering does not exist.
    #[error("course offering not found: {0}")]
    CourseNotFound(CourseId),

    /// A registry write failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// A ledger movement failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// A pricing formula failed.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// A course offering operation failed.
    #[error(transparent)]
    Course(#[from] CourseError),
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Identifier of a course offering within the ministry: sequential,
/// assigned at creation, stable forever.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CourseId(pub u64);

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "course#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Ministry
// ---------------------------------------------------------------------------

/// The ministry: central authority and state controller.
///
/// The administrative identity (the account that constructed the
/// ministry) gates registrations, offering creation, and teaching
/// assignments. It is not rotatable.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Ministry {
    admin: AccountId,
    registry: Registry,
    ledger: CreditLedger,
    offerings: Vec<CourseOffering>,
}

impl Ministry {
    /// Creates a ministry administered by `admin`.
    pub fn new(admin: AccountId) -> Self {
        Self {
            admin,
            registry: Registry::new(admin),
            ledger: CreditLedger::new(),
            offerings: Vec::new(),
        }
    }

    /// The administrative identity.
    pub fn admin(&self) -> &AccountId {
        &self.admin
    }

    /// Read access to the rolls.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Read access to the credit ledger.
    pub fn ledger(&self) -> &CreditLedger {
        &self.ledger
    }

    // -----------------------------------------------------------------------
    // Registration
    // -----------------------------------------------------------------------

    /// Registers a university and mints its genesis credit float — the
    /// entire supply it can ever sell to students.
    ///
    /// # Errors
    ///
    /// Registry gating and duplicate errors; a ledger overflow can only
    /// occur past ~3×10^10 registered universities, at which point the
    /// books have bigger problems.
    pub fn register_university(
        &mut self,
        caller: &AccountId,
        account: AccountId,
        display_name: impl Into<String>,
    ) -> Result<(), MinistryError> {
        self.registry
            .register_university(caller, account, display_name)?;
        self.ledger
            .issue_genesis(account, UNIVERSITY_GENESIS_SUPPLY)?;
        info!(university = %account, supply = UNIVERSITY_GENESIS_SUPPLY, "university registered");
        Ok(())
    }

    /// Registers a professor.
    pub fn register_professor(
        &mut self,
        caller: &AccountId,
        account: AccountId,
        display_name: impl Into<String>,
    ) -> Result<(), MinistryError> {
        self.registry
            .register_professor(caller, account, display_name)?;
        info!(professor = %account, "professor registered");
        Ok(())
    }

    /// Registers a student.
    pub fn register_student(
        &mut self,
        caller: &AccountId,
        account: AccountId,
        display_name: impl Into<String>,
    ) -> Result<(), MinistryError> {
        self.registry
            .register_student(caller, account, display_name)?;
        info!(student = %account, "student registered");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Token purchase
    // -----------------------------------------------------------------------

    /// Sells `credits` full credits of `university`'s issuance to the
    /// calling student. `payment_wei` is the native value attached to the
    /// call; it must equal [`pricing::credits_to_payment`] exactly. The
    /// value itself is retained for the university by the hosting
    /// ledger's settlement layer — this contract only checks the amount
    /// and moves the credit tokens.
    ///
    /// Returns the credit units transferred.
    ///
    /// # Errors
    ///
    /// [`MinistryError::NotRegistered`] for an unknown student or
    /// university, [`MinistryError::PaymentMismatch`] for a wrong
    /// payment, and the ledger's `InsufficientBalance` if the university
    /// float is exhausted. State is untouched on any of them.
    pub fn purchase_tokens(
        &mut self,
        caller: &AccountId,
        university: AccountId,
        credits: u64,
        payment_wei: u64,
    ) -> Result<u64, MinistryError> {
        if !self.registry.is_student(caller) {
            return Err(MinistryError::NotRegistered {
                role: Role::Student,
                account: *caller,
            });
        }
        if !self.registry.is_university(&university) {
            return Err(MinistryError::NotRegistered {
                role: Role::University,
                account: university,
            });
        }

        let required = pricing::credits_to_payment(credits)?;
        if payment_wei != required {
            return Err(MinistryError::PaymentMismatch {
                required,
                received: payment_wei,
            });
        }

        // Cannot overflow: the wei product above is strictly larger and
        // has already been checked.
        let units = credits * CREDIT_UNIT_SCALE;
        self.ledger
            .credit_from_purchase(caller, &university, units)?;

        info!(student = %caller, university = %university, credits, units,
            payment_wei, "credit tokens purchased");
        Ok(units)
    }

    // -----------------------------------------------------------------------
    // Pricing pass-throughs
    // -----------------------------------------------------------------------

    /// Native price of `credits` full credits, in wei. Stateless quote.
    pub fn credits_to_payment(&self, credits: u64) -> Result<u64, MinistryError> {
        Ok(pricing::credits_to_payment(credits)?)
    }

    /// Generic tuition quote for arbitrary parameters. Stateless; for
    /// the quote a specific student would actually pay on a specific
    /// course, use [`tuition_for`](Self::tuition_for).
    pub fn course_token_cost(
        &self,
        factor: ExperimentalFactor,
        prior_enrollment_year: u32,
        base_credits: u64,
    ) -> Result<u64, MinistryError> {
        Ok(pricing::course_token_cost(
            factor,
            prior_enrollment_year,
            base_credits,
        )?)
    }

    /// The exact tuition `student` would be debited by
    /// [`enroll`](Self::enroll) on `course` right now.
    pub fn tuition_for(
        &self,
        course: CourseId,
        student: &AccountId,
    ) -> Result<u64, MinistryError> {
        Ok(self.offering(course)?.tuition_for(student)?)
    }

    // -----------------------------------------------------------------------
    // Course offerings
    // -----------------------------------------------------------------------

    /// Creates a new course offering. Administrative operation.
    pub fn create_course_offering(
        &mut self,
        caller: &AccountId,
        name: impl Into<String>,
        symbol: impl Into<String>,
        base_credits: u64,
        experimental_factor: ExperimentalFactor,
    ) -> Result<CourseId, MinistryError> {
        if caller != &self.admin {
            return Err(MinistryError::Unauthorized);
        }
        let offering =
            CourseOffering::new(self.admin, name, symbol, base_credits, experimental_factor);
        info!(course = offering.symbol(), base_credits, factor = %experimental_factor,
            "course offering created");
        self.offerings.push(offering);
        Ok(CourseId(self.offerings.len() as u64 - 1))
    }

    /// All course offerings, in creation order.
    pub fn offerings(&self) -> &[CourseOffering] {
        &self.offerings
    }

    /// The offering with the given id.
    pub fn offering(&self, course: CourseId) -> Result<&CourseOffering, MinistryError> {
        self.offerings
            .get(course.0 as usize)
            .ok_or(MinistryError::CourseNotFound(course))
    }

    /// Assigns a professor to grade for a university on `course`.
    /// Administrative operation, same authority as the registry writes.
    pub fn authorize_university_professor(
        &mut self,
        caller: &AccountId,
        course: CourseId,
        university: AccountId,
        professor: AccountId,
    ) -> Result<(), MinistryError> {
        let offering = self
            .offerings
            .get_mut(course.0 as usize)
            .ok_or(MinistryError::CourseNotFound(course))?;
        offering.authorize_university_professor(&self.registry, caller, university, professor)?;
        Ok(())
    }

    /// Enrolls the calling student in `course` under `university`,
    /// debiting tuition from their provenance-scoped balance. Returns
    /// the new record id.
    pub fn enroll(
        &mut self,
        caller: &AccountId,
        course: CourseId,
        university: AccountId,
        academic_year: AcademicYear,
    ) -> Result<RecordId, MinistryError> {
        let offering = self
            .offerings
            .get_mut(course.0 as usize)
            .ok_or(MinistryError::CourseNotFound(course))?;
        let id = offering.enroll(
            &self.registry,
            &mut self.ledger,
            caller,
            university,
            academic_year,
        )?;
        Ok(id)
    }

    /// Grades an enrollment on `course`. Returns the resulting status.
    pub fn evaluate(
        &mut self,
        caller: &AccountId,
        course: CourseId,
        student: &AccountId,
        record_id: RecordId,
        grade: u32,
    ) -> Result<EnrollmentStatus, MinistryError> {
        let offering = self
            .offerings
            .get_mut(course.0 as usize)
            .ok_or(MinistryError::CourseNotFound(course))?;
        Ok(offering.evaluate(caller, student, record_id, grade)?)
    }

    /// Relocates a passed record on `course` to another university.
    pub fn relocate(
        &mut self,
        caller: &AccountId,
        course: CourseId,
        record_id: RecordId,
        new_university: AccountId,
    ) -> Result<(), MinistryError> {
        let offering = self
            .offerings
            .get_mut(course.0 as usize)
            .ok_or(MinistryError::CourseNotFound(course))?;
        offering.relocate(&self.registry, caller, record_id, new_university)?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Balance reads
    // -----------------------------------------------------------------------

    /// Total credit balance of an account.
    pub fn balance_of(&self, account: &AccountId) -> u64 {
        self.ledger.balance_of(account)
    }

    /// The portion of `student`'s balance issued by `university`.
    pub fn provenance_balance_of(&self, student: &AccountId, university: &AccountId) -> u64 {
        self.ledger.provenance_balance_of(student, university)
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

    /// Ministry with one university, professor, and student registered.
    fn ministry() -> (Ministry, [AccountId; 4]) {
        let admin = acct(0);
        let uni = acct(1);
        let prof = acct(2);
        let student = acct(3);

        let mut m = Ministry::new(admin);
        m.register_university(&admin, uni, "UNIR").unwrap();
        m.register_professor(&admin, prof, "Javier Montesinos").unwrap();
        m.register_student(&admin, student, "Ada").unwrap();
        (m, [admin, uni, prof, student])
    }

    #[test]
    fn registration_mints_genesis_float() {
        let (m, [_, uni, ..]) = ministry();
        assert_eq!(m.balance_of(&uni), UNIVERSITY_GENESIS_SUPPLY);
        assert_eq!(m.ledger().total_issued(), UNIVERSITY_GENESIS_SUPPLY);
    }

    #[test]
    fn non_admin_cannot_register() {
        let (mut m, [_, _, _, student]) = ministry();
        let result = m.register_university(&student, acct(9), "Fake U");
        assert!(matches!(
            result,
            Err(MinistryError::Registry(RegistryError::Unauthorized))
        ));
    }

    #[test]
    fn purchase_requires_exact_payment() {
        let (mut m, [_, uni, _, student]) = ministry();
        let required = m.credits_to_payment(10).unwrap();

        let short = m.purchase_tokens(&student, uni, 10, required - 1);
        assert!(matches!(
            short,
            Err(MinistryError::PaymentMismatch { received, .. }) if received == required - 1
        ));
        let over = m.purchase_tokens(&student, uni, 10, required + 1);
        assert!(matches!(over, Err(MinistryError::PaymentMismatch { .. })));
        assert_eq!(m.balance_of(&student), 0);

        let units = m.purchase_tokens(&student, uni, 10, required).unwrap();
        assert_eq!(units, 100_000);
        assert_eq!(m.balance_of(&student), 100_000);
        assert_eq!(m.provenance_balance_of(&student, &uni), 100_000);
    }

    #[test]
    fn purchase_requires_registered_parties() {
        let (mut m, [_, uni, _, student]) = ministry();
        let wei = m.credits_to_payment(1).unwrap();

        assert!(matches!(
            m.purchase_tokens(&acct(9), uni, 1, wei),
            Err(MinistryError::NotRegistered { role: Role::Student, .. })
        ));
        assert!(matches!(
            m.purchase_tokens(&student, acct(9), 1, wei),
            Err(MinistryError::NotRegistered { role: Role::University, .. })
        ));
    }

    #[test]
    fn offering_factory_is_admin_only() {
        let (mut m, [admin, _, _, student]) = ministry();
        assert!(matches!(
            m.create_course_offering(&student, "Calculo 1", "CAL1", 7, ExperimentalFactor::Standard),
            Err(MinistryError::Unauthorized)
        ));

        let id = m
            .create_course_offering(&admin, "Calculo 1", "CAL1", 7, ExperimentalFactor::Standard)
            .unwrap();
        assert_eq!(id, CourseId(0));
        assert_eq!(m.offerings().len(), 1);
        assert_eq!(m.offering(id).unwrap().name(), "Calculo 1");
    }

    #[test]
    fn offering_ids_are_sequential() {
        let (mut m, [admin, ..]) = ministry();
        let a = m
            .create_course_offering(&admin, "Calculo 1", "CAL1", 7, ExperimentalFactor::Standard)
            .unwrap();
        let b = m
            .create_course_offering(&admin, "Algebra", "ALG1", 6, ExperimentalFactor::Pilot)
            .unwrap();
        assert_eq!((a, b), (CourseId(0), CourseId(1)));
        assert!(matches!(
            m.offering(CourseId(2)),
            Err(MinistryError::CourseNotFound(CourseId(2)))
        ));
    }

    #[test]
    fn full_lifecycle_through_the_ministry() {
        let (mut m, [admin, uni, prof, student]) = ministry();
        let course = m
            .create_course_offering(&admin, "Calculo 1", "CAL1", 7, ExperimentalFactor::Standard)
            .unwrap();
        m.authorize_university_professor(&admin, course, uni, prof)
            .unwrap();

        let wei = m.credits_to_payment(10).unwrap();
        m.purchase_tokens(&student, uni, 10, wei).unwrap();

        let quoted = m.tuition_for(course, &student).unwrap();
        let record = m.enroll(&student, course, uni, year()).unwrap();
        assert_eq!(m.balance_of(&student), 100_000 - quoted);

        let status = m.evaluate(&prof, course, &student, record, 700).unwrap();
        assert_eq!(status, EnrollmentStatus::EvaluatedPassed);
        assert_eq!(m.offering(course).unwrap().owner_of(record).unwrap(), student);

        // Conservation held across the whole scenario.
        assert_eq!(m.ledger().total_held(), m.ledger().total_issued());
    }

    #[test]
    fn ministry_serialization_roundtrip() {
        let (mut m, [admin, uni, prof, student]) = ministry();
        let course = m
            .create_course_offering(&admin, "Calculo 1", "CAL1", 7, ExperimentalFactor::Standard)
            .unwrap();
        m.authorize_university_professor(&admin, course, uni, prof)
            .unwrap();
        let wei = m.credits_to_payment(10).unwrap();
        m.purchase_tokens(&student, uni, 10, wei).unwrap();

        let json = serde_json::to_string(&m).unwrap();
        let restored: Ministry = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.balance_of(&student), 100_000);
        assert_eq!(restored.offerings().len(), 1);
        assert_eq!(restored.admin(), &admin);
    }
}
