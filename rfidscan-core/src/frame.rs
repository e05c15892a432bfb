//! Raw card frames and their display representations

use std::fmt;

use bytes::Bytes;
use chrono::{DateTime, Local};
use tracing::trace;

use rfidscan_types::CardFormat;

use crate::{
    classify::{classify, rfid_details, RfidDetails},
    constants::FRAME_NOISE,
    error::{Error, Result},
    tckimlik::{self, ValidationResult},
    MIN_FRAME_LEN,
};

/// One card read from the serial port
///
/// Immutable once decoded. The format is classified on construction.
///
/// # Examples
///
/// ```
/// use rfidscan_core::{RawFrame, CardFormat};
///
/// let frame = RawFrame::decode(&b"10000000146\r\n"[..], 1).unwrap();
/// assert_eq!(frame.text(), "10000000146");
/// assert_eq!(frame.format(), CardFormat::TurkishId);
/// assert!(frame.validation().unwrap().is_valid);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct RawFrame {
    bytes: Bytes,
    text: String,
    format: CardFormat,
    read_number: u64,
    captured_at: DateTime<Local>,
}

impl RawFrame {
    /// Decode a frame captured now
    ///
    /// # Errors
    ///
    /// Returns [`Error::FrameTooShort`] when fewer than [`MIN_FRAME_LEN`]
    /// characters remain after cleaning. Such reads are incomplete.
    pub fn decode(bytes: impl Into<Bytes>, read_number: u64) -> Result<Self> {
        Self::decode_at(bytes, read_number, Local::now())
    }

    /// Decode a frame with an explicit capture time
    pub fn decode_at(
        bytes: impl Into<Bytes>,
        read_number: u64,
        captured_at: DateTime<Local>,
    ) -> Result<Self> {
        let bytes = bytes.into();
        let text = clean(&bytes);
        let len = text.chars().count();

        if len < MIN_FRAME_LEN {
            return Err(Error::FrameTooShort {
                min: MIN_FRAME_LEN,
                actual: len,
            });
        }

        let format = classify(&text);

        trace!(read_number, len, format = %format, "Decoded frame");

        Ok(Self {
            bytes,
            text,
            format,
            read_number,
            captured_at,
        })
    }

    /// Bytes as received
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Cleaned payload text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Payload length in characters
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn format(&self) -> CardFormat {
        self.format
    }

    pub fn read_number(&self) -> u64 {
        self.read_number
    }

    pub fn captured_at(&self) -> DateTime<Local> {
        self.captured_at
    }

    /// Received bytes as space separated uppercase hex (`31 32 33`)
    pub fn hex(&self) -> String {
        spaced_hex(&self.bytes)
    }

    /// Decimal rendering of the frame
    ///
    /// Hexadecimal RFID cards are read as a base-16 card number. Every other
    /// format converts the received bytes, taken as one big-endian integer.
    pub fn decimal(&self) -> Option<String> {
        match self.format {
            CardFormat::HexadecimalRfid => hex_to_decimal(&self.text),
            _ => hex_to_decimal(&hex::encode_upper(&self.bytes)),
        }
    }

    /// TC Kimlik validation, for `TurkishId` frames only
    pub fn validation(&self) -> Option<ValidationResult> {
        match self.format {
            CardFormat::TurkishId => tckimlik::validate(&self.text).ok(),
            _ => None,
        }
    }

    /// RFID breakdown, for RFID formats only
    pub fn rfid_details(&self) -> Option<RfidDetails> {
        self.format.is_rfid().then(|| rfid_details(&self.text))
    }
}

impl fmt::Debug for RawFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawFrame")
            .field("read_number", &self.read_number)
            .field("format", &self.format)
            .field("text", &self.text)
            .field("bytes", &self.hex())
            .field("captured_at", &self.captured_at.to_rfc3339())
            .finish()
    }
}

impl fmt::Display for RawFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Read #{} [{}] {}", self.read_number, self.format, self.text)
    }
}

/// Decode lossily (invalid UTF-8 is dropped) and strip line noise
fn clean(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }

    text.replace(FRAME_NOISE, "").trim().to_string()
}

/// Bytes as space separated uppercase hex pairs
pub fn spaced_hex(bytes: &[u8]) -> String {
    let hex = hex::encode_upper(bytes);
    let mut out = String::with_capacity(hex.len() + hex.len() / 2);

    for (i, pair) in hex.as_bytes().chunks(2).enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.extend(pair.iter().map(|&b| b as char));
    }

    out
}

/// Convert a hex string of any length to decimal
///
/// Returns `None` for an empty or non-hex input.
pub fn hex_to_decimal(hex: &str) -> Option<String> {
    if hex.is_empty() {
        return None;
    }

    // Little-endian base-10 digits
    let mut digits: Vec<u8> = vec![0];

    for c in hex.chars() {
        let mut carry = c.to_digit(16)?;

        for d in digits.iter_mut() {
            let v = *d as u32 * 16 + carry;
            *d = (v % 10) as u8;
            carry = v / 10;
        }

        while carry > 0 {
            digits.push((carry % 10) as u8);
            carry /= 10;
        }
    }

    Some(digits.iter().rev().map(|&d| char::from(b'0' + d)).collect())
}
