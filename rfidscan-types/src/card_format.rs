//! Card format classification

use std::fmt;

/// Card format detected from a frame's content
///
/// Exactly one format applies to every frame. The value is derived purely
/// from the frame text; see `rfidscan_core::classify` for the rules.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CardFormat {
    /// 11 decimal digits (TC Kimlik candidate)
    TurkishId,

    /// 10 alphanumeric characters
    StandardRfid,

    /// 16 or more decimal digits
    LongFormatRfid,

    /// 8 or more hexadecimal digits
    HexadecimalRfid,

    /// Anything else
    Custom,
}

impl CardFormat {
    /// All formats in classification priority order
    pub const ALL: [CardFormat; 5] = [
        CardFormat::TurkishId,
        CardFormat::StandardRfid,
        CardFormat::LongFormatRfid,
        CardFormat::HexadecimalRfid,
        CardFormat::Custom,
    ];

    /// Human readable label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::TurkishId => "Turkish ID Card (TC Kimlik)",
            Self::StandardRfid => "Standard RFID Card",
            Self::LongFormatRfid => "Long Format RFID Card",
            Self::HexadecimalRfid => "Hexadecimal RFID Card",
            Self::Custom => "Unknown Card Type",
        }
    }

    /// Check if this is one of the RFID formats
    pub fn is_rfid(&self) -> bool {
        matches!(
            self,
            Self::StandardRfid | Self::LongFormatRfid | Self::HexadecimalRfid
        )
    }
}

impl fmt::Display for CardFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
