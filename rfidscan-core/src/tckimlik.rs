//! TC Kimlik (Turkish national ID) check digit algorithm
//!
//! An ID has 11 digits `d0..d10`. The last two are check digits:
//!
//! ```text
//! odd  = d0 + d2 + d4 + d6 + d8
//! even = d1 + d3 + d5 + d7
//! d9   = (odd * 7 - even) mod 10     (non-negative modulo)
//! d10  = (d0 + d1 + ... + d9) mod 10
//! ```
//!
//! The first digit may never be 0.

use tracing::trace;

use crate::error::{Error, Result};

/// Number of digits in a TC Kimlik number
pub const LENGTH: usize = 11;

/// Outcome of validating an 11 digit candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub check_digit_10_actual: u8,
    pub check_digit_10_expected: u8,
    pub check_digit_11_actual: u8,
    pub check_digit_11_expected: u8,

    /// Sum of digits at indices 0, 2, 4, 6, 8
    pub odd_sum: u32,

    /// Sum of digits at indices 1, 3, 5, 7
    pub even_sum: u32,

    /// Sum of the first ten digits
    pub first_ten_sum: u32,

    /// First digit is 0 (never valid)
    pub leading_zero: bool,
}

impl ValidationResult {
    /// Short reason for an invalid result, `None` when valid
    pub fn failure_reason(&self) -> Option<&'static str> {
        if self.leading_zero {
            Some("First digit cannot be 0")
        } else if !self.is_valid {
            Some("Check digits don't match")
        } else {
            None
        }
    }
}

/// Validate a TC Kimlik number
///
/// # Errors
///
/// Returns [`Error::InvalidInputFormat`] unless `digits` is exactly 11 ASCII
/// digits. Classify first; only `TurkishId` frames are valid input.
///
/// # Examples
///
/// ```
/// use rfidscan_core::tckimlik;
///
/// let result = tckimlik::validate("10000000146").unwrap();
/// assert!(result.is_valid);
/// assert_eq!(result.check_digit_10_expected, 4);
/// assert_eq!(result.check_digit_11_expected, 6);
/// ```
pub fn validate(digits: &str) -> Result<ValidationResult> {
    if digits.len() != LENGTH || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidInputFormat {
            input: digits.to_string(),
        });
    }

    let d: Vec<u8> = digits.bytes().map(|b| b - b'0').collect();

    let odd_sum: u32 = d[0..9].iter().step_by(2).map(|&x| x as u32).sum();
    let even_sum: u32 = d[1..8].iter().step_by(2).map(|&x| x as u32).sum();
    let first_ten_sum: u32 = d[..10].iter().map(|&x| x as u32).sum();

    // odd * 7 - even can go negative (e.g. 1_9_0_9_0_9_0_9...)
    let check_digit_10_expected = (odd_sum as i32 * 7 - even_sum as i32).rem_euclid(10) as u8;
    let check_digit_11_expected = (first_ten_sum % 10) as u8;

    let check_digit_10_actual = d[9];
    let check_digit_11_actual = d[10];
    let leading_zero = d[0] == 0;

    let is_valid = !leading_zero
        && check_digit_10_actual == check_digit_10_expected
        && check_digit_11_actual == check_digit_11_expected;

    trace!(
        odd_sum,
        even_sum,
        first_ten_sum,
        expected_10 = check_digit_10_expected,
        expected_11 = check_digit_11_expected,
        is_valid,
        "Validated TC Kimlik"
    );

    Ok(ValidationResult {
        is_valid,
        check_digit_10_actual,
        check_digit_10_expected,
        check_digit_11_actual,
        check_digit_11_expected,
        odd_sum,
        even_sum,
        first_ten_sum,
        leading_zero,
    })
}

/// Check if `digits` is a valid TC Kimlik number
pub fn is_valid(digits: &str) -> bool {
    validate(digits).map(|r| r.is_valid).unwrap_or(false)
}
