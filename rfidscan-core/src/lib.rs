//! # rfidscan-core
//!
//! Card data primitives for serial RFID readers.
//!
//! This crate provides:
//! - Frame classification by card format
//! - TC Kimlik (Turkish national ID) check digit validation
//! - Raw frame decoding and line assembly

pub mod classify;
pub mod constants;
pub mod error;
pub mod frame;
pub mod framing;
pub mod tckimlik;

pub use classify::{classify, rfid_details, RfidDetails};
pub use error::{Error, Result};
pub use frame::RawFrame;
pub use framing::FrameAssembler;
pub use tckimlik::ValidationResult;

pub use rfidscan_types::CardFormat;

/// Minimum cleaned frame length; shorter reads are treated as incomplete
pub const MIN_FRAME_LEN: usize = 8;

/// Maximum buffered line length before a frame is forced out
pub const MAX_FRAME_LEN: usize = 256;
