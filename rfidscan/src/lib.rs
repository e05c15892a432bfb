//! # rfidscan
//!
//! Diagnostics for RFID readers that stream card numbers over a serial port.
//!
//! ## Features
//!
//! - Card format classification (TC Kimlik, standard/long/hex RFID)
//! - TC Kimlik check digit validation
//! - Serial port discovery and auto-selection
//! - Detailed and simple monitoring reports
//!
//! ## Quick Start
//!
//! ```no_run
//! use rfidscan::{Monitor, MonitorMode, MonitorOptions, Reader};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> rfidscan::Result<()> {
//!     let reader = Reader::serial("/dev/ttyUSB0", Default::default());
//!     let mut monitor = Monitor::new(reader);
//!
//!     let (_stop_tx, stop) = tokio::sync::watch::channel(false);
//!     let options = MonitorOptions::timed(MonitorMode::Detailed);
//!
//!     let summary = monitor.run(options, &mut std::io::stdout(), &stop).await?;
//!     println!("{} card(s) read", summary.reads);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod error;
pub mod logging;
pub mod menu;
pub mod monitor;
pub mod reader;
pub mod report;

#[cfg(test)]
mod testing;

// Re-exports
pub use error::{Error, Result};
pub use menu::MenuChoice;
pub use monitor::{Monitor, MonitorMode, MonitorOptions, MonitorSummary, StopReason};
pub use reader::Reader;

// Re-export types
pub use rfidscan_core::{classify, tckimlik, CardFormat, RawFrame, ValidationResult};
pub use rfidscan_transport::{SerialConfig, SerialTransport, Transport};
pub use rfidscan_types::PortInfo;
