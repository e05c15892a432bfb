//! High-level reader interface

use std::time::Duration;

use bytes::Bytes;
use tracing::{debug, info, trace, warn};

use rfidscan_core::{constants::DEFAULT_READ_TIMEOUT_MS, FrameAssembler, RawFrame};
use rfidscan_transport::{SerialConfig, SerialTransport, Transport};

use crate::error::Result;

/// RFID reader on a byte transport
///
/// Turns the reader's byte stream into [`RawFrame`]s. Incomplete reads
/// (fewer than 8 characters after cleaning) are discarded here.
///
/// # Examples
///
/// ```no_run
/// use rfidscan::Reader;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> rfidscan::Result<()> {
///     let mut reader = Reader::serial("/dev/ttyUSB0", Default::default());
///
///     reader.connect().await?;
///
///     if let Some(frame) = reader.next_frame(1).await? {
///         println!("{}: {}", frame.format(), frame.text());
///     }
///
///     reader.disconnect().await?;
///     Ok(())
/// }
/// ```
pub struct Reader<T: Transport = SerialTransport> {
    transport: T,
    assembler: FrameAssembler,
    read_timeout: Duration,
}

impl Reader<SerialTransport> {
    /// Create a reader on a serial port
    pub fn serial(port: impl Into<String>, config: SerialConfig) -> Self {
        Self::new(SerialTransport::new(port).with_config(config))
    }
}

impl<T: Transport> Reader<T> {
    /// Create a reader on any transport
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            assembler: FrameAssembler::new(),
            read_timeout: Duration::from_millis(DEFAULT_READ_TIMEOUT_MS),
        }
    }

    /// Set read timeout (also the idle time before a partial line is flushed)
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    pub fn is_connected(&self) -> bool {
        self.transport.is_connected()
    }

    pub fn port_name(&self) -> String {
        self.transport.port_name()
    }

    /// Underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Open the port
    pub async fn connect(&mut self) -> Result<()> {
        info!("Connecting to {}...", self.transport.port_name());

        self.transport.connect().await?;
        self.assembler.clear();

        Ok(())
    }

    /// Close the port
    pub async fn disconnect(&mut self) -> Result<()> {
        if !self.is_connected() {
            return Ok(());
        }

        info!("Disconnecting from {}...", self.transport.port_name());

        self.transport.disconnect().await?;
        self.assembler.clear();

        Ok(())
    }

    /// Wait for the next card frame
    ///
    /// Performs at most one transport read. Returns `Ok(None)` when that read
    /// produced no complete frame, including when the line was idle for the
    /// whole read timeout.
    pub async fn next_frame(&mut self, read_number: u64) -> Result<Option<RawFrame>> {
        if let Some(frame) = self.drain(read_number) {
            return Ok(Some(frame));
        }

        match self.transport.receive(self.read_timeout).await {
            Ok(data) => {
                self.assembler.push(&data);
                Ok(self.drain(read_number))
            }
            Err(e) if e.is_timeout() => {
                // Readers without a line terminator: an idle line ends the frame
                Ok(self
                    .assembler
                    .flush()
                    .and_then(|line| self.accept(line, read_number)))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn drain(&mut self, read_number: u64) -> Option<RawFrame> {
        while let Some(line) = self.assembler.next_frame() {
            if let Some(frame) = self.accept(line, read_number) {
                return Some(frame);
            }
        }
        None
    }

    fn accept(&self, line: Bytes, read_number: u64) -> Option<RawFrame> {
        match RawFrame::decode(line, read_number) {
            Ok(frame) => {
                trace!("Accepted: {:?}", frame);
                Some(frame)
            }
            Err(e) if e.is_incomplete_read() => {
                debug!("Discarding incomplete read: {}", e);
                None
            }
            Err(e) => {
                warn!("Discarding unreadable frame: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ScriptedTransport, Step};
    use rfidscan_core::CardFormat;

    fn reader(script: Vec<Step>) -> Reader<ScriptedTransport> {
        Reader::new(ScriptedTransport::new(script)).with_read_timeout(Duration::from_millis(100))
    }

    #[test]
    fn test_reader_create() {
        let reader = Reader::serial("/dev/ttyUSB0", SerialConfig::default());
        assert!(!reader.is_connected());
        assert_eq!(reader.port_name(), "/dev/ttyUSB0");
        assert_eq!(reader.read_timeout(), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_frame_line() {
        let mut reader = reader(vec![Step::Data(b"10000000146\r\n")]);
        reader.connect().await.unwrap();

        let frame = reader.next_frame(1).await.unwrap().unwrap();
        assert_eq!(frame.text(), "10000000146");
        assert_eq!(frame.format(), CardFormat::TurkishId);
        assert_eq!(frame.read_number(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_frame_keeps_terminator_bytes() {
        let mut reader = reader(vec![Step::Data(b"10000000146\r\n")]);
        reader.connect().await.unwrap();

        let frame = reader.next_frame(1).await.unwrap().unwrap();
        assert_eq!(frame.text(), "10000000146");
        assert_eq!(frame.hex(), "31 30 30 30 30 30 30 30 31 34 36 0D 0A");
        assert_eq!(
            frame.decimal(),
            rfidscan_core::frame::hex_to_decimal("31303030303030303134360D0A")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_frame_split_across_reads() {
        let mut reader = reader(vec![Step::Data(b"CAB9"), Step::Data(b"EAF2\r\n")]);
        reader.connect().await.unwrap();

        assert!(reader.next_frame(1).await.unwrap().is_none());

        let frame = reader.next_frame(1).await.unwrap().unwrap();
        assert_eq!(frame.text(), "CAB9EAF2");
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_frame_several_lines_in_one_read() {
        let mut reader = reader(vec![Step::Data(b"AB12CD34EF\r\n1234567890123456\r\n")]);
        reader.connect().await.unwrap();

        let first = reader.next_frame(1).await.unwrap().unwrap();
        let second = reader.next_frame(2).await.unwrap().unwrap();

        assert_eq!(first.format(), CardFormat::StandardRfid);
        assert_eq!(second.format(), CardFormat::LongFormatRfid);
        assert_eq!(second.read_number(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_frame_idle_flush() {
        let mut reader = reader(vec![Step::Data(b"CAB9EAF2"), Step::Timeout]);
        reader.connect().await.unwrap();

        assert!(reader.next_frame(1).await.unwrap().is_none());

        let frame = reader.next_frame(1).await.unwrap().unwrap();
        assert_eq!(frame.format(), CardFormat::HexadecimalRfid);
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_frame_discards_incomplete() {
        let mut reader = reader(vec![
            Step::Data(b"123\r\n"),
            Step::Data(b"4567\r\nA1B2C3D4\r\n"),
        ]);
        reader.connect().await.unwrap();

        assert!(reader.next_frame(1).await.unwrap().is_none());

        let frame = reader.next_frame(1).await.unwrap().unwrap();
        assert_eq!(frame.text(), "A1B2C3D4");
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_frame_idle_empty() {
        let mut reader = reader(vec![]);
        reader.connect().await.unwrap();

        assert!(reader.next_frame(1).await.unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_frame_connection_closed() {
        let mut reader = reader(vec![Step::Closed]);
        reader.connect().await.unwrap();

        let result = reader.next_frame(1).await;
        assert!(matches!(
            result,
            Err(crate::Error::Transport(rfidscan_transport::Error::ConnectionClosed))
        ));
    }

    #[tokio::test]
    async fn test_next_frame_not_connected() {
        let mut reader = reader(vec![]);

        let result = reader.next_frame(1).await;
        assert!(matches!(
            result,
            Err(crate::Error::Transport(rfidscan_transport::Error::NotConnected))
        ));
    }

    #[tokio::test]
    async fn test_disconnect() {
        let mut reader = reader(vec![]);
        reader.connect().await.unwrap();
        assert!(reader.is_connected());

        reader.disconnect().await.unwrap();
        reader.disconnect().await.unwrap();
        assert!(!reader.is_connected());
        assert_eq!(reader.transport().disconnects, 1);
    }
}
