//! Transport errors

use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Not connected")]
    NotConnected,

    #[error("Already connected")]
    AlreadyConnected,

    #[error("Read timeout")]
    ReadTimeout,

    #[error("Connection closed by device")]
    ConnectionClosed,

    #[error("Failed to open serial port {port}: {source}")]
    Open {
        port: String,
        #[source]
        source: tokio_serial::Error,
    },

    #[error("Failed to enumerate serial ports: {0}")]
    Enumerate(#[source] tokio_serial::Error),

    #[error("No suitable serial port found for RFID reader")]
    NoPortFound,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Check if this is an idle read (no data before the timeout)
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::ReadTimeout)
    }

    /// Check if the port is held by another process or needs privileges
    pub fn is_access_denied(&self) -> bool {
        match self {
            Self::Open { source, .. } => {
                let msg = source.description.to_ascii_lowercase();
                matches!(
                    source.kind,
                    tokio_serial::ErrorKind::Io(io::ErrorKind::PermissionDenied)
                ) || ["access is denied", "permission denied", "busy"]
                    .iter()
                    .any(|hint| msg.contains(hint))
            }
            Self::Io(e) => e.kind() == io::ErrorKind::PermissionDenied,
            _ => false,
        }
    }
}
