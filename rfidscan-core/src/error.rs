//! Error types for rfidscan-core

/// Result type alias for rfidscan-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Card data errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Validator called on something that is not 11 ASCII digits
    #[error("Invalid input format: TC Kimlik must be exactly 11 digits, got {input:?}")]
    InvalidInputFormat {
        input: String,
    },

    /// Frame is too short to be a complete card read
    #[error("Frame too short: expected at least {min} characters, got {actual}")]
    FrameTooShort {
        min: usize,
        actual: usize,
    },
}

impl Error {
    /// Check if error marks an incomplete serial read (safe to discard)
    pub fn is_incomplete_read(&self) -> bool {
        matches!(self, Self::FrameTooShort { .. })
    }
}
