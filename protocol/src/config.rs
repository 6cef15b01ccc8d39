//! # Protocol Configuration & Constants
//!
//! Every magic number in Lyceum lives here. A constant hardcoded
//! anywhere else is a bug with extra steps.
//!
//! These values define the economics of the network. Universities price
//! their admissions against them, so changing any of them after launch is
//! a governance event, not a refactor.

// ---------------------------------------------------------------------------
// Credit Denomination
// ---------------------------------------------------------------------------

/// Smallest-unit scale of one academic credit. One credit = 10_000 credit
/// units; all ledger balances and course costs are denominated in units.
/// Four decimal places of credit is enough for any partial-recognition
/// scheme we have seen, and keeps every amount an integer.
pub const CREDIT_UNIT_SCALE: u64 = 10_000;

/// Exchange rate charged by universities: wei per credit unit. At this
/// rate one full credit costs 0.068 native coin — tuition, not gas money.
pub const WEI_PER_CREDIT_UNIT: u64 = 6_800_000_000_000;

/// Credit supply minted to a university when the ministry registers it,
/// denominated in credit units (60 000 full credits). This is the entire
/// float the university can ever sell; nothing in the protocol mints
/// afterwards, which is what makes the conservation invariant checkable.
pub const UNIVERSITY_GENESIS_SUPPLY: u64 = 60_000 * CREDIT_UNIT_SCALE;

// ---------------------------------------------------------------------------
// Grading
// ---------------------------------------------------------------------------

/// Upper bound of the grading scale. Grades are integers in `0..=1000`,
/// i.e. per-mille — fine-grained enough that nobody argues about rounding.
pub const GRADE_MAX: u32 = 1_000;

/// Minimum grade that passes a course. At or above this, the enrollment
/// record transfers from the university to the student.
pub const PASS_THRESHOLD: u32 = 500;

// ---------------------------------------------------------------------------
// Tuition Adjustment (basis points)
// ---------------------------------------------------------------------------

/// Denominator for all basis-point arithmetic. 1 bp = 0.01%.
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Tuition discount granted per experimental level of a course offering.
/// Experimental curricula are subsidized to attract enrollment: 10% off
/// per level.
pub const EXPERIMENTAL_DISCOUNT_BPS_PER_LEVEL: u64 = 1_000;

/// Flat surcharge applied when a student re-enrolls in a course they have
/// attempted before: repeat attempts cost 50% more.
pub const REPEAT_SURCHARGE_BPS: u64 = 5_000;

// ---------------------------------------------------------------------------
// Addressing
// ---------------------------------------------------------------------------

/// Bech32 human-readable prefix for Lyceum account addresses. Short
/// enough to type, distinctive enough to never be mistaken for a payment
/// chain address.
pub const ACCOUNT_HRP: &str = "lyc";

/// Length in bytes of the hash underlying an account identity.
pub const ACCOUNT_ID_LENGTH: usize = 32;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pass_threshold_is_on_the_grade_scale() {
        assert!(PASS_THRESHOLD <= GRADE_MAX);
        assert!(PASS_THRESHOLD > 0);
    }

    #[test]
    fn genesis_supply_is_whole_credits() {
        // The float a university starts with must be an exact number of
        // full credits, or the books never balance to a round figure.
        assert_eq!(UNIVERSITY_GENESIS_SUPPLY % CREDIT_UNIT_SCALE, 0);
        assert!(UNIVERSITY_GENESIS_SUPPLY > 0);
    }

    #[test]
    fn adjustment_rates_stay_inside_the_denominator() {
        // A discount above 100% would mean paying students to enroll.
        // Tempting, but no.
        assert!(EXPERIMENTAL_DISCOUNT_BPS_PER_LEVEL < BPS_DENOMINATOR);
        assert!(REPEAT_SURCHARGE_BPS <= BPS_DENOMINATOR);
    }

    #[test]
    fn hrp_is_lowercase_ascii() {
        assert!(ACCOUNT_HRP
            .chars()
            .all(|c| c.is_ascii_lowercase() && c.is_ascii_alphabetic()));
    }
}
