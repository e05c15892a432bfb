//! Reader defaults

/// Default serial baud rate
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Default read timeout (milliseconds)
///
/// A partial line that sees no new bytes for this long is flushed as a frame.
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 1000;

/// Shortest accepted read timeout (milliseconds)
pub const MIN_READ_TIMEOUT_MS: u64 = 10;

/// Timeout used when probing a port during detection (milliseconds)
pub const PROBE_TIMEOUT_MS: u64 = 1000;

/// Length of the timed monitoring sessions offered by the menu (seconds)
pub const TIMED_SESSION_SECS: u64 = 30;

/// Characters stripped from decoded frames
pub const FRAME_NOISE: [char; 3] = ['\r', '\n', '\0'];

/// Substrings (lowercase) in a port description that suggest a card reader
pub const READER_KEYWORDS: [&str; 4] = ["rfid", "card", "reader", "serial"];

/// USB-serial bridge vendor commonly used by readers
pub const FTDI_KEYWORD: &str = "ftdi";
