//! # Pricing — deterministic tuition formulas
//!
//! Two questions get answered here, and nowhere else:
//!
//! 1. How much native coin does a batch of credit tokens cost?
//!    ([`credits_to_payment`])
//! 2. How many credit tokens does one enrollment consume?
//!    ([`course_token_cost`])
//!
//! Both are pure functions over integers. Callers are expected to quote
//! first and commit second — a student fetches the cost, then enrolls —
//! so the same inputs must produce the same output forever. No state, no
//! clocks, no rounding ambiguity; overflow is reported, never wrapped.
//!
//! The tuition-adjustment shape (experimental discount, repeat surcharge)
//! is a business formula. It is deliberately confined to this module so
//! it can be renegotiated without touching the contract layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::config::{
    BPS_DENOMINATOR, CREDIT_UNIT_SCALE, EXPERIMENTAL_DISCOUNT_BPS_PER_LEVEL,
    REPEAT_SURCHARGE_BPS, WEI_PER_CREDIT_UNIT,
};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur while evaluating a pricing formula.
#[derive(Debug, Error)]
pub enum PricingError {
    /// The computation exceeds the representable range. Nothing was
    /// charged; the request itself is unpriceable.
    #[error("arithmetic overflow while pricing {operation}")]
    ArithmeticOverflow {
        /// Which formula overflowed, for the audit trail.
        operation: &'static str,
    },

    /// The experimental level is outside the defined range.
    #[error("invalid experimental factor level: {0} (defined levels are 0..=2)")]
    InvalidExperimentalFactor(u8),

    /// The academic-year token does not have the `"2025/26"` shape.
    #[error("invalid academic year token '{0}': expected the form \"2025/26\"")]
    InvalidAcademicYear(String),
}

// ---------------------------------------------------------------------------
// ExperimentalFactor
// ---------------------------------------------------------------------------

/// How experimental a course offering's curriculum is.
///
/// Experimental offerings are subsidized — each level grants a fixed
/// tuition discount — because nobody signs up to be a guinea pig at full
/// price.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExperimentalFactor {
    /// Established curriculum, full tuition.
    Standard,
    /// Partially revised curriculum.
    Pilot,
    /// First-run curriculum.
    Experimental,
}

impl ExperimentalFactor {
    /// Parse the raw integer level used on the wire (0, 1, or 2).
    pub fn from_level(level: u8) -> Result<Self, PricingError> {
        match level {
            0 => Ok(ExperimentalFactor::Standard),
            1 => Ok(ExperimentalFactor::Pilot),
            2 => Ok(ExperimentalFactor::Experimental),
            other => Err(PricingError::InvalidExperimentalFactor(other)),
        }
    }

    /// The raw integer level.
    pub fn level(&self) -> u8 {
        match self {
            ExperimentalFactor::Standard => 0,
            ExperimentalFactor::Pilot => 1,
            ExperimentalFactor::Experimental => 2,
        }
    }

    /// Tuition discount for this level, in basis points.
    pub fn discount_bps(&self) -> u64 {
        self.level() as u64 * EXPERIMENTAL_DISCOUNT_BPS_PER_LEVEL
    }
}

impl fmt::Display for ExperimentalFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperimentalFactor::Standard => write!(f, "Standard"),
            ExperimentalFactor::Pilot => write!(f, "Pilot"),
            ExperimentalFactor::Experimental => write!(f, "Experimental"),
        }
    }
}

// ---------------------------------------------------------------------------
// AcademicYear
// ---------------------------------------------------------------------------

/// A validated academic-year token, e.g. `"2025/26"`.
///
/// Stored as the numeric start year; the canonical token is re-derived on
/// display and serialization, so a parsed value can never carry a
/// mismatched suffix.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AcademicYear {
    start_year: u32,
}

impl AcademicYear {
    /// Parse a `"2025/26"`-shaped token.
    ///
    /// The suffix must be the last two digits of the year following the
    /// four-digit start year; anything else is rejected.
    pub fn parse(token: &str) -> Result<Self, PricingError> {
        let invalid = || PricingError::InvalidAcademicYear(token.to_string());

        let (start, suffix) = token.split_once('/').ok_or_else(invalid)?;
        if start.len() != 4 || suffix.len() != 2 {
            return Err(invalid());
        }
        let start_year: u32 = start.parse().map_err(|_| invalid())?;
        let suffix: u32 = suffix.parse().map_err(|_| invalid())?;
        if suffix != (start_year + 1) % 100 {
            return Err(invalid());
        }
        Ok(Self { start_year })
    }

    /// Build directly from a four-digit start year.
    pub fn from_start_year(start_year: u32) -> Result<Self, PricingError> {
        if !(1000..=9999).contains(&start_year) {
            return Err(PricingError::InvalidAcademicYear(start_year.to_string()));
        }
        Ok(Self { start_year })
    }

    /// The calendar year the academic year starts in. This is the value
    /// fed back into [`course_token_cost`] as the prior enrollment year
    /// on a repeat attempt.
    pub fn start_year(&self) -> u32 {
        self.start_year
    }
}

impl fmt::Display for AcademicYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{:02}", self.start_year, (self.start_year + 1) % 100)
    }
}

impl fmt::Debug for AcademicYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AcademicYear({self})")
    }
}

impl Serialize for AcademicYear {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for AcademicYear {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        AcademicYear::parse(&s).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Formulas
// ---------------------------------------------------------------------------

/// Native payment required to purchase `credits` full credits:
/// `credits × CREDIT_UNIT_SCALE × WEI_PER_CREDIT_UNIT`, in wei.
///
/// # Errors
///
/// [`PricingError::ArithmeticOverflow`] when the product exceeds `u64`.
pub fn credits_to_payment(credits: u64) -> Result<u64, PricingError> {
    credits
        .checked_mul(CREDIT_UNIT_SCALE)
        .and_then(|units| units.checked_mul(WEI_PER_CREDIT_UNIT))
        .ok_or(PricingError::ArithmeticOverflow {
            operation: "credits_to_payment",
        })
}

/// Credit-token cost of one enrollment, in credit units.
///
/// Starts from `base_credits × CREDIT_UNIT_SCALE`, applies the
/// experimental-level discount, then a flat repeat surcharge when
/// `prior_enrollment_year` is non-zero (zero means first attempt).
///
/// Pure and state-free so callers can quote before committing.
///
/// # Errors
///
/// [`PricingError::ArithmeticOverflow`] when any intermediate product
/// exceeds `u64`.
pub fn course_token_cost(
    factor: ExperimentalFactor,
    prior_enrollment_year: u32,
    base_credits: u64,
) -> Result<u64, PricingError> {
    let overflow = || PricingError::ArithmeticOverflow {
        operation: "course_token_cost",
    };

    let base = base_credits
        .checked_mul(CREDIT_UNIT_SCALE)
        .ok_or_else(overflow)?;

    // discount_bps < BPS_DENOMINATOR, so the discount never exceeds base.
    let discount = base
        .checked_mul(factor.discount_bps())
        .ok_or_else(overflow)?
        / BPS_DENOMINATOR;
    let mut cost = base - discount;

    if prior_enrollment_year != 0 {
        let surcharge = cost
            .checked_mul(REPEAT_SURCHARGE_BPS)
            .ok_or_else(overflow)?
            / BPS_DENOMINATOR;
        cost = cost.checked_add(surcharge).ok_or_else(overflow)?;
    }

    Ok(cost)
}
