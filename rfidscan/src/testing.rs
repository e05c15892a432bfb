//! In-memory transport for reader and monitor tests

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use bytes::BytesMut;

use rfidscan_transport::{Error, Result, Transport};

/// One scripted receive outcome
#[derive(Debug, Clone)]
pub enum Step {
    Data(&'static [u8]),
    Timeout,
    Closed,
}

/// Transport that replays a script, then idles
///
/// Once the script is exhausted every receive waits out its timeout, so
/// tests should run with paused time.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    script: VecDeque<Step>,
    connected: bool,
    refuse_connect: bool,
    pub connects: usize,
    pub disconnects: usize,
}

impl ScriptedTransport {
    pub fn new(script: impl IntoIterator<Item = Step>) -> Self {
        Self {
            script: script.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Fail every connect attempt
    pub fn refusing() -> Self {
        Self {
            refuse_connect: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn connect(&mut self) -> Result<()> {
        if self.refuse_connect {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "Access is denied.",
            )));
        }
        if self.connected {
            return Err(Error::AlreadyConnected);
        }

        self.connects += 1;
        self.connected = true;
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<()> {
        if self.connected {
            self.disconnects += 1;
        }
        self.connected = false;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    async fn receive(&mut self, timeout: Duration) -> Result<BytesMut> {
        if !self.connected {
            return Err(Error::NotConnected);
        }

        match self.script.pop_front() {
            Some(Step::Data(data)) => Ok(BytesMut::from(data)),
            Some(Step::Closed) => Err(Error::ConnectionClosed),
            Some(Step::Timeout) | None => {
                tokio::time::sleep(timeout).await;
                Err(Error::ReadTimeout)
            }
        }
    }

    fn port_name(&self) -> String {
        "SCRIPTED".to_string()
    }
}
