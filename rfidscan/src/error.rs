//! High-level error types

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Card data error: {0}")]
    Core(#[from] rfidscan_core::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] rfidscan_transport::Error),

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Operator hint for common failures
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Transport(e) if e.is_access_denied() => Some(
                "The port is probably in use by another application. \
                 Close it, or run with elevated privileges.",
            ),
            Self::Transport(rfidscan_transport::Error::NoPortFound) => {
                Some("Check the reader connection and drivers, or pass --port explicitly.")
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint() {
        let err = Error::from(rfidscan_transport::Error::NoPortFound);
        assert!(err.hint().unwrap().contains("--port"));

        let err = Error::from(rfidscan_transport::Error::ReadTimeout);
        assert_eq!(err.hint(), None);

        let err = Error::from(rfidscan_core::Error::FrameTooShort { min: 8, actual: 2 });
        assert_eq!(err.hint(), None);
    }
}
