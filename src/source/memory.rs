//! In-memory source
//!
//! A growable `BytesMut` with a position, handy for tests and for staging
//! data before it reaches a file.

use bytes::BytesMut;

use crate::error::{ChannelError, Result};

use super::ByteSource;

/// A [`ByteSource`] held entirely in memory
#[derive(Debug, Default)]
pub struct MemorySource {
    data: BytesMut,
    position: u64,
    closed: bool,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source holding a copy of `data`
    pub fn from_bytes(data: &[u8]) -> Self {
        Self {
            data: BytesMut::from(data),
            position: 0,
            closed: false,
        }
    }

    /// The stored bytes (readable even after close)
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            Err(ChannelError::Closed)
        } else {
            Ok(())
        }
    }
}

impl From<Vec<u8>> for MemorySource {
    fn from(data: Vec<u8>) -> Self {
        Self {
            data: BytesMut::from(&data[..]),
            position: 0,
            closed: false,
        }
    }
}

impl ByteSource for MemorySource {
    fn position(&mut self, index: u64) -> Result<()> {
        self.ensure_open()?;
        self.position = index;
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.ensure_open()?;
        let len = self.data.len() as u64;
        if self.position >= len {
            return Ok(0);
        }
        let start = self.position as usize;
        let n = buf.len().min(self.data.len() - start);
        buf[..n].copy_from_slice(&self.data[start..start + n]);
        self.position += n as u64;
        Ok(n)
    }

    fn write(&mut self, buf: &[u8]) -> Result<()> {
        self.ensure_open()?;
        let start = self.position as usize;
        let end = start + buf.len();
        if end > self.data.len() {
            // Writing past the end zero-fills the gap, like a file
            self.data.resize(end, 0);
        }
        self.data[start..end].copy_from_slice(buf);
        self.position = end as u64;
        Ok(())
    }

    fn size(&mut self) -> Result<u64> {
        self.ensure_open()?;
        Ok(self.data.len() as u64)
    }

    fn truncate(&mut self, new_size: u64) -> Result<()> {
        self.ensure_open()?;
        self.data.resize(new_size as usize, 0);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.ensure_open()
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }

    fn is_open(&self) -> bool {
        !self.closed
    }
}
