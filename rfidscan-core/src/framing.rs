//! Line framing for serial reader output
//!
//! Readers emit one card per line, terminated by `\r`, `\n` or `\r\n`.
//! Bytes arrive in arbitrary chunks, so they are buffered here until a
//! terminator is seen. Lines keep their terminator so a frame holds the
//! bytes exactly as received. Some readers never send a terminator; for those the
//! caller flushes the buffer once the line has gone idle.

use bytes::{Bytes, BytesMut};
use tracing::{debug, trace};

use crate::MAX_FRAME_LEN;

/// Accumulates serial bytes and splits them into frames
#[derive(Debug)]
pub struct FrameAssembler {
    buf: BytesMut,
    max_len: usize,
}

impl FrameAssembler {
    /// Create assembler with the default line cap ([`MAX_FRAME_LEN`])
    pub fn new() -> Self {
        Self::with_max_len(MAX_FRAME_LEN)
    }

    /// Create assembler with a custom line cap
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(max_len),
            max_len: max_len.max(1),
        }
    }

    /// Append received bytes
    pub fn push(&mut self, data: &[u8]) {
        trace!(bytes = data.len(), buffered = self.buf.len(), "Buffering serial data");
        self.buf.extend_from_slice(data);
    }

    /// Take the next complete line, terminator included
    ///
    /// A `\r\n` pair stays together. Bare terminators with nothing before
    /// them (such as a `\n` arriving after its `\r`) are skipped. A line that
    /// grows past the cap without a terminator is returned as-is.
    pub fn next_frame(&mut self) -> Option<Bytes> {
        loop {
            match self.buf.iter().position(|&b| b == b'\r' || b == b'\n') {
                Some(pos) => {
                    let end = if self.buf[pos] == b'\r' && self.buf.get(pos + 1) == Some(&b'\n') {
                        pos + 2
                    } else {
                        pos + 1
                    };
                    let line = self.buf.split_to(end).freeze();

                    if pos > 0 {
                        return Some(line);
                    }
                }
                None if self.buf.len() >= self.max_len => {
                    debug!(len = self.buf.len(), max = self.max_len, "Line overflow, forcing frame");
                    return Some(self.buf.split_to(self.max_len).freeze());
                }
                None => return None,
            }
        }
    }

    /// Take whatever is buffered as a frame (idle flush)
    pub fn flush(&mut self) -> Option<Bytes> {
        if self.buf.is_empty() {
            return None;
        }

        Some(self.buf.split().freeze())
    }

    /// Drop buffered bytes
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Number of buffered bytes
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }
}

impl Default for FrameAssembler {
    fn default() -> Self {
        Self::new()
    }
}
