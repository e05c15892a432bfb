//! Type definitions for rfidscan

pub mod card_format;
pub mod port_info;

pub use card_format::CardFormat;
pub use port_info::PortInfo;
