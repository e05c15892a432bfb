//! Serial transport for RFID readers
//!
//! Readers show up as USB virtual COM ports (FTDI, CH340, CP210x bridges)
//! and stream one card number per line at 9600 8N1.

use std::time::Duration;

use async_trait::async_trait;
use bytes::BytesMut;
use tokio::io::AsyncReadExt;
use tokio::time::timeout;
use tokio_serial::{DataBits, FlowControl, Parity, SerialPortBuilderExt, SerialStream, StopBits};
use tracing::{debug, info, trace, warn};

use rfidscan_core::constants::DEFAULT_BAUD_RATE;

use crate::{error::*, Transport};

/// Receive buffer size; a card line is far shorter
const RECEIVE_BUFFER_SIZE: usize = 1024;

/// Serial line settings
///
/// Defaults match common RFID readers: 9600 baud, 8 data bits, no parity,
/// 1 stop bit, no flow control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialConfig {
    pub baud_rate: u32,
    pub data_bits: DataBits,
    pub parity: Parity,
    pub stop_bits: StopBits,
    pub flow_control: FlowControl,
}

impl SerialConfig {
    /// Default settings at a different baud rate
    pub fn with_baud_rate(baud_rate: u32) -> Self {
        Self {
            baud_rate,
            ..Self::default()
        }
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
            flow_control: FlowControl::None,
        }
    }
}

/// Serial transport for RFID readers
pub struct SerialTransport {
    port: String,
    config: SerialConfig,
    stream: Option<SerialStream>,
}

impl SerialTransport {
    /// Create new serial transport (not yet opened)
    pub fn new(port: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            config: SerialConfig::default(),
            stream: None,
        }
    }

    /// Set line settings
    pub fn with_config(mut self, config: SerialConfig) -> Self {
        self.config = config;
        self
    }
}

#[async_trait]
impl Transport for SerialTransport {
    async fn connect(&mut self) -> Result<()> {
        if self.is_connected() {
            return Err(Error::AlreadyConnected);
        }

        debug!(
            port = %self.port,
            baud_rate = self.config.baud_rate,
            data_bits = ?self.config.data_bits,
            parity = ?self.config.parity,
            stop_bits = ?self.config.stop_bits,
            flow_control = ?self.config.flow_control,
            "Opening serial port"
        );

        let stream = tokio_serial::new(&self.port, self.config.baud_rate)
            .data_bits(self.config.data_bits)
            .parity(self.config.parity)
            .stop_bits(self.config.stop_bits)
            .flow_control(self.config.flow_control)
            .open_native_async()
            .map_err(|source| Error::Open {
                port: self.port.clone(),
                source,
            })?;

        info!(port = %self.port, baud_rate = self.config.baud_rate, "Serial port opened");

        self.stream = Some(stream);
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<()> {
        if self.stream.take().is_some() {
            info!(port = %self.port, "Serial port closed");
        }

        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    async fn receive(&mut self, read_timeout: Duration) -> Result<BytesMut> {
        let stream = self.stream.as_mut().ok_or(Error::NotConnected)?;

        let mut buf = BytesMut::with_capacity(RECEIVE_BUFFER_SIZE);

        let n = timeout(read_timeout, stream.read_buf(&mut buf))
            .await
            .map_err(|_| Error::ReadTimeout)?
            .map_err(|e| {
                warn!(port = %self.port, error = %e, "Serial read failed");
                Error::Io(e)
            })?;

        if n == 0 {
            warn!(port = %self.port, "Serial port returned EOF");
            return Err(Error::ConnectionClosed);
        }

        trace!("Received {} bytes: {:02X?}", n, &buf[..n.min(32)]);

        Ok(buf)
    }

    fn port_name(&self) -> String {
        self.port.clone()
    }
}

impl Drop for SerialTransport {
    fn drop(&mut self) {
        if self.is_connected() {
            debug!(port = %self.port, "Serial transport dropped while open, closing port");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_serial_config_default() {
        let config = SerialConfig::default();
        assert_eq!(config.baud_rate, 9600);
        assert_eq!(config.data_bits, DataBits::Eight);
        assert_eq!(config.parity, Parity::None);
        assert_eq!(config.stop_bits, StopBits::One);
        assert_eq!(config.flow_control, FlowControl::None);
    }

    #[test]
    fn test_serial_config_baud_rate() {
        let config = SerialConfig::with_baud_rate(115200);
        assert_eq!(config.baud_rate, 115200);
        assert_eq!(config.data_bits, DataBits::Eight);
    }

    #[tokio::test]
    async fn test_serial_transport_create() {
        let transport = SerialTransport::new("/dev/ttyUSB0");
        assert!(!transport.is_connected());
        assert_eq!(transport.port_name(), "/dev/ttyUSB0");
    }

    #[tokio::test]
    async fn test_receive_when_not_connected() {
        let mut transport = SerialTransport::new("/dev/ttyUSB0");
        let result = transport.receive(Duration::from_millis(10)).await;
        assert!(matches!(result, Err(Error::NotConnected)));
    }

    #[tokio::test]
    async fn test_connect_missing_port() {
        let mut transport = SerialTransport::new("/dev/rfidscan-does-not-exist");

        let result = transport.connect().await;
        assert!(matches!(result, Err(Error::Open { .. })));
        assert!(!transport.is_connected());
    }

    #[tokio::test]
    async fn test_disconnect_when_closed() {
        let mut transport = SerialTransport::new("/dev/ttyUSB0");
        assert!(transport.disconnect().await.is_ok());
    }
}
