//! Transport layer for serial RFID readers
//!
//! Provides serial port communication and port discovery.

pub mod discovery;
pub mod error;
pub mod serial;

pub use discovery::{detect_best_port, list_ports, probe, rank_ports};
pub use error::{Error, Result};
pub use serial::{SerialConfig, SerialTransport};

use std::time::Duration;

use async_trait::async_trait;
use bytes::BytesMut;

/// Transport trait for reader connections
///
/// Readers only talk; nothing is ever written back to the device.
#[async_trait]
pub trait Transport: Send {
    /// Open the connection
    async fn connect(&mut self) -> Result<()>;

    /// Close the connection (no-op when already closed)
    async fn disconnect(&mut self) -> Result<()>;

    /// Check if connected
    fn is_connected(&self) -> bool;

    /// Receive whatever bytes are available
    ///
    /// Fails with [`Error::ReadTimeout`] if nothing arrives within `timeout`.
    async fn receive(&mut self, timeout: Duration) -> Result<BytesMut>;

    /// Port name for logging and reports
    fn port_name(&self) -> String;
}
