//! Physical source maintenance
//!
//! Block moves over the source: staged reads across dropped bytes, the tail
//! shift behind an insert, and compaction. Moves go through a scratch buffer
//! of `buffer_size` bytes so memory stays bounded for large sources.

use std::io;

use tracing::debug;

use crate::error::{ChannelError, Result};
use crate::source::ByteSource;

use super::{Access, DataChannel};

impl<S: ByteSource> DataChannel<S> {
    /// Stage `count` visible bytes starting at virtual `index`
    pub(super) fn read_virtual(&mut self, index: u64, count: usize) -> Result<()> {
        self.seek(index)?;
        let runs = self.index_map.runs(index, count as u64);

        let staged = self.buffer.stage(count);
        let mut offset = 0usize;
        let mut short = None;
        for (real, len) in runs {
            let len = len as usize;
            if self.position != Some(real) {
                self.source.position(real)?;
            }
            let n = self.source.read(&mut staged[offset..offset + len])?;
            self.position = Some(real + n as u64);
            offset += n;
            if n < len {
                short = Some(offset);
                break;
            }
        }

        if let Some(got) = short {
            // The source shrank underneath the channel
            self.buffer.reset();
            return Err(ChannelError::Underflow {
                needed: count as u64,
                remaining: got as u64,
            });
        }
        Ok(())
    }

    /// Move the bytes `[at, real_len)` right by `count`.
    ///
    /// Requires a compacted source. Copies back to front so an overlapping
    /// move never reads bytes it already overwrote.
    pub(super) fn shift_tail(&mut self, at: u64, count: u64) -> Result<()> {
        let chunk = self.config.buffer_size as u64;
        let mut scratch = vec![0u8; self.config.buffer_size];
        let mut end = self.real_len;

        while end > at {
            let start = end.saturating_sub(chunk).max(at);
            let n = (end - start) as usize;
            self.copy_block(start, start + count, &mut scratch[..n])?;
            end = start;
        }
        Ok(())
    }

    /// Rewrite the surviving bytes contiguously and truncate the source
    pub(super) fn compact_source(&mut self) -> Result<()> {
        if self.index_map.is_empty() {
            return Ok(());
        }
        let size = self.size();
        let dropped = self.index_map.forgotten_count();
        let runs = self.index_map.runs(0, size);
        let chunk = self.config.buffer_size as u64;
        let mut scratch = vec![0u8; self.config.buffer_size];

        // Runs only ever move left, so a front-to-back copy is safe
        let mut write_pos = 0u64;
        for (real, len) in runs {
            if real != write_pos {
                let mut done = 0u64;
                while done < len {
                    let n = (len - done).min(chunk) as usize;
                    self.copy_block(real + done, write_pos + done, &mut scratch[..n])?;
                    done += n as u64;
                }
            }
            write_pos += len;
        }

        self.source.truncate(size)?;
        self.real_len = size;
        self.index_map.clear();
        self.buffer.reset();
        self.position = None;

        debug!(size, dropped, "Compacted channel source");
        Ok(())
    }

    /// Copy `block.len()` bytes from real `from` to real `to`
    fn copy_block(&mut self, from: u64, to: u64, block: &mut [u8]) -> Result<()> {
        self.source.position(from)?;
        let n = self.source.read(block)?;
        if n < block.len() {
            return Err(ChannelError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("source ended at {} while moving {} bytes", from + n as u64, block.len()),
            )));
        }
        self.source.position(to)?;
        self.source.write(block)?;
        self.position = Some(to + n as u64);
        Ok(())
    }
}
