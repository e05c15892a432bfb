//! Frame classification
//!
//! Formats are detected from the shape of the payload only (length and
//! character set). Rules are evaluated in order and the first match wins:
//!
//! ```text
//! 1. len == 11, all digits      -> TurkishId
//! 2. len == 10, alphanumeric    -> StandardRfid
//! 3. len >= 16, all digits      -> LongFormatRfid
//! 4. len >= 8,  all hex digits  -> HexadecimalRfid
//! 5. otherwise                  -> Custom
//! ```
//!
//! Rule 3 shadows rule 4 for long numeric strings, which are also valid hex.
//! Classification never validates check digits; see [`crate::tckimlik`].

use rfidscan_types::CardFormat;

/// A classification rule: predicate and the format it selects
#[derive(Clone, Copy)]
pub struct Rule {
    pub format: CardFormat,
    pub matches: fn(&str) -> bool,
}

/// Classification rules in priority order
///
/// [`CardFormat::Custom`] is the fallback and has no rule.
pub const RULES: [Rule; 4] = [
    Rule { format: CardFormat::TurkishId, matches: is_turkish_id },
    Rule { format: CardFormat::StandardRfid, matches: is_standard_rfid },
    Rule { format: CardFormat::LongFormatRfid, matches: is_long_format_rfid },
    Rule { format: CardFormat::HexadecimalRfid, matches: is_hexadecimal_rfid },
];

/// Classify a decoded frame
///
/// Total: every input, including the empty string, maps to a format.
///
/// # Examples
///
/// ```
/// use rfidscan_core::{classify, CardFormat};
///
/// assert_eq!(classify("10000000146"), CardFormat::TurkishId);
/// assert_eq!(classify("A1B2C3D4"), CardFormat::HexadecimalRfid);
/// assert_eq!(classify(""), CardFormat::Custom);
/// ```
pub fn classify(payload: &str) -> CardFormat {
    RULES
        .iter()
        .find(|rule| (rule.matches)(payload))
        .map(|rule| rule.format)
        .unwrap_or(CardFormat::Custom)
}

// All predicates are ASCII-only, so byte length equals character count
// whenever the character-class check passes.

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

pub fn is_turkish_id(s: &str) -> bool {
    s.len() == 11 && all_digits(s)
}

pub fn is_standard_rfid(s: &str) -> bool {
    s.len() == 10 && s.bytes().all(|b| b.is_ascii_alphanumeric())
}

pub fn is_long_format_rfid(s: &str) -> bool {
    s.len() >= 16 && all_digits(s)
}

pub fn is_hexadecimal_rfid(s: &str) -> bool {
    s.len() >= 8 && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Breakdown of an RFID card number for detailed reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RfidDetails {
    /// Card number (uppercased)
    pub card_number: String,

    /// Digits only
    pub numeric_only: String,

    /// ASCII alphanumeric characters only
    pub alphanumeric: String,

    /// Length-based format label
    pub length_format: String,
}

/// Extract RFID details from a payload
pub fn rfid_details(payload: &str) -> RfidDetails {
    let card_number = payload.to_ascii_uppercase();

    let length_format = match card_number.chars().count() {
        10 => "Standard 10-digit".to_string(),
        16 => "Extended 16-digit".to_string(),
        8 => "Short 8-digit".to_string(),
        n => format!("Custom {}-digit", n),
    };

    RfidDetails {
        numeric_only: card_number.chars().filter(|c| c.is_ascii_digit()).collect(),
        alphanumeric: card_number.chars().filter(|c| c.is_ascii_alphanumeric()).collect(),
        length_format,
        card_number,
    }
}
