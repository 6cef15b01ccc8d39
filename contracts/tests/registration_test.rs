//! Integration tests for entity registration.
//!
//! Exercises the ministry's rolls across module boundaries: who may
//! amend them, what gets listed, and in which order.

use lyceum_contracts::registry::{RegistryError, Role};
use lyceum_contracts::state::{Ministry, MinistryError};
use lyceum_protocol::config::UNIVERSITY_GENESIS_SUPPLY;
use lyceum_protocol::identity::{AccountId, AccountKeypair};

fn acct(seed: u8) -> AccountId {
    AccountKeypair::from_seed(&[seed; 32]).account_id()
}

// ---------------------------------------------------------------------------
// Roll Population
// ---------------------------------------------------------------------------

#[test]
fn register_university_lists_it_first() {
    let admin = acct(0);
    let mut ministry = Ministry::new(admin);

    ministry.register_university(&admin, acct(1), "UNIR").unwrap();

    let universities = ministry.registry().universities();
    assert_eq!(universities.len(), 1);
    assert_eq!(universities[0].account, acct(1));
    assert_eq!(universities[0].display_name, "UNIR");
}

#[test]
fn register_professor_lists_it_first() {
    let admin = acct(0);
    let mut ministry = Ministry::new(admin);

    ministry
        .register_professor(&admin, acct(2), "Javier Montesinos")
        .unwrap();

    let professors = ministry.registry().professors();
    assert_eq!(professors.len(), 1);
    assert_eq!(professors[0].account, acct(2));
}

#[test]
fn register_student_lists_it_first() {
    let admin = acct(0);
    let mut ministry = Ministry::new(admin);

    ministry.register_student(&admin, acct(3), "Ada").unwrap();

    let students = ministry.registry().students();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].account, acct(3));
}

#[test]
fn listings_keep_insertion_order() {
    let admin = acct(0);
    let mut ministry = Ministry::new(admin);

    for (i, seed) in [11u8, 7, 13, 5].iter().enumerate() {
        ministry
            .register_university(&admin, acct(*seed), format!("U{i}"))
            .unwrap();
    }

    let listed: Vec<AccountId> = ministry
        .registry()
        .universities()
        .iter()
        .map(|e| e.account)
        .collect();
    assert_eq!(listed, vec![acct(11), acct(7), acct(13), acct(5)]);
}

#[test]
fn registration_funds_the_university_float() {
    let admin = acct(0);
    let mut ministry = Ministry::new(admin);
    ministry.register_university(&admin, acct(1), "UNIR").unwrap();

    // The full float exists the moment the university is registered;
    // students buy out of it, nothing mints later.
    assert_eq!(ministry.balance_of(&acct(1)), UNIVERSITY_GENESIS_SUPPLY);
    assert_eq!(ministry.ledger().total_issued(), UNIVERSITY_GENESIS_SUPPLY);
}

// ---------------------------------------------------------------------------
// Gating
// ---------------------------------------------------------------------------

#[test]
fn only_the_admin_may_register() {
    let admin = acct(0);
    let intruder = acct(9);
    let mut ministry = Ministry::new(admin);

    for result in [
        ministry.register_university(&intruder, acct(1), "Fake U"),
        ministry.register_professor(&intruder, acct(2), "Fake Prof"),
        ministry.register_student(&intruder, acct(3), "Fake Student"),
    ] {
        assert!(matches!(
            result,
            Err(MinistryError::Registry(RegistryError::Unauthorized))
        ));
    }

    assert!(ministry.registry().universities().is_empty());
    assert!(ministry.registry().professors().is_empty());
    assert!(ministry.registry().students().is_empty());
}

#[test]
fn duplicate_registration_rejected_per_role() {
    let admin = acct(0);
    let mut ministry = Ministry::new(admin);
    ministry.register_university(&admin, acct(1), "UNIR").unwrap();

    let result = ministry.register_university(&admin, acct(1), "UNIR bis");
    assert!(matches!(
        result,
        Err(MinistryError::Registry(RegistryError::AlreadyRegistered {
            role: Role::University,
            ..
        }))
    ));
    // The roll and the float are both unchanged.
    assert_eq!(ministry.registry().universities().len(), 1);
    assert_eq!(ministry.balance_of(&acct(1)), UNIVERSITY_GENESIS_SUPPLY);
}

#[test]
fn entry_lookup_returns_display_names() {
    let admin = acct(0);
    let mut ministry = Ministry::new(admin);
    ministry
        .register_professor(&admin, acct(2), "Javier Montesinos")
        .unwrap();

    let entry = ministry
        .registry()
        .entry(Role::Professor, &acct(2))
        .expect("registered professor must have an entry");
    assert_eq!(entry.display_name, "Javier Montesinos");
    assert!(ministry.registry().entry(Role::Student, &acct(2)).is_none());
}
