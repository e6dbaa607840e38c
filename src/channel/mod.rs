//! Channel Module
//!
//! The concrete data channel over a [`ByteSource`].
//!
//! ## Responsibilities
//! - Resolve virtual indices to real source positions
//! - Stage bytes through the per-channel load buffer
//! - Own and adjust the start/end cursors as content changes
//! - Keep drops logical until flush, then compact the source
//!
//! ## Read Path
//! ```text
//!   cursor.index ──► IndexMap::real_index ──► seek source ──► LoadBuffer
//!                                                               │
//!                                          cursor advance ◄── decode
//! ```

mod access;
mod storage;

use std::path::Path;

use tracing::{debug, trace, warn};

use crate::buffer::LoadBuffer;
use crate::codec::ByteOrder;
use crate::config::ChannelConfig;
use crate::cursor::{Cursor, Side};
use crate::error::{ChannelError, Result};
use crate::index::IndexMap;
use crate::source::{ByteSource, FileSource, MemorySource};

pub use access::Access;

/// A bidirectional random-access channel over a seekable byte source
///
/// ## Ownership
///
/// The channel exclusively owns its cursors, load buffer and index map. It
/// owns the source too and closes it on [`Access::close`] (or, best effort,
/// on drop). Not safe for concurrent use; wrap it in a lock to share it.
#[derive(Debug)]
pub struct DataChannel<S: ByteSource> {
    config: ChannelConfig,
    source: S,
    order: ByteOrder,

    /// Dropped-byte bookkeeping (virtual → real)
    index_map: IndexMap,

    /// Staging area for loads
    buffer: LoadBuffer,

    /// Lazily created on first access
    start: Option<Cursor>,
    end: Option<Cursor>,

    /// Physical length of the source, dropped bytes included
    real_len: u64,

    /// Last known source position; `None` when it has to be re-established
    position: Option<u64>,
}

impl DataChannel<FileSource> {
    /// Open (or create) a file-backed channel
    pub fn open(path: impl AsRef<Path>, config: ChannelConfig) -> Result<Self> {
        let source = FileSource::open(path.as_ref(), &config)?;
        Self::with_config(source, config)
    }

    /// Open with default config
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::open(path, ChannelConfig::default())
    }
}

impl DataChannel<MemorySource> {
    /// An in-memory channel holding a copy of `data`
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::new(MemorySource::from_bytes(data))
    }
}

impl<S: ByteSource> DataChannel<S> {
    /// Wrap a source using the default config
    pub fn new(source: S) -> Result<Self> {
        Self::with_config(source, ChannelConfig::default())
    }

    /// Wrap a source
    pub fn with_config(mut source: S, config: ChannelConfig) -> Result<Self> {
        if !source.is_open() {
            return Err(ChannelError::Closed);
        }
        let real_len = source.size()?;
        if real_len > config.max_size {
            return Err(ChannelError::Overflow {
                requested: real_len,
                limit: config.max_size,
            });
        }

        debug!(size = real_len, order = ?config.byte_order, "Opened data channel");

        Ok(Self {
            order: config.byte_order,
            index_map: IndexMap::with_capacity(config.index_capacity),
            buffer: LoadBuffer::with_capacity(config.buffer_size),
            start: None,
            end: None,
            real_len,
            position: None,
            source,
            config,
        })
    }

    /// Rewrite the source without its dropped bytes
    pub fn compact(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.compact_source()
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn index_map(&self) -> &IndexMap {
        &self.index_map
    }

    /// Bytes dropped since the last compaction
    pub fn forgotten_count(&self) -> u64 {
        self.index_map.forgotten_count()
    }

    /// Physical length of the source
    pub fn real_len(&self) -> u64 {
        self.real_len
    }

    /// Capacity of the multi-byte load buffer
    pub fn buffer_capacity(&self) -> usize {
        self.buffer.capacity()
    }

    fn each_cursor(&mut self, mut apply: impl FnMut(&mut Cursor)) {
        self.start.iter_mut().chain(self.end.iter_mut()).for_each(|c| apply(c));
    }
}

impl<S: ByteSource> Access for DataChannel<S> {
    fn is_open(&self) -> bool {
        self.source.is_open()
    }

    fn size(&self) -> u64 {
        self.real_len - self.index_map.forgotten_count()
    }

    fn set_size(&mut self, new_size: u64) -> Result<()> {
        self.ensure_open()?;
        if new_size > self.config.max_size {
            return Err(ChannelError::Overflow {
                requested: new_size,
                limit: self.config.max_size,
            });
        }
        let old_size = self.size();
        if new_size == old_size {
            return Ok(());
        }

        self.compact_source()?;
        self.source.truncate(new_size)?;
        self.real_len = new_size;
        self.position = None;
        self.buffer.reset();

        if new_size < old_size {
            self.each_cursor(|c| c.on_removed(new_size, old_size));
        } else {
            self.each_cursor(|c| c.on_inserted(old_size, new_size - old_size));
        }

        debug!(from = old_size, to = new_size, "Resized data channel");
        Ok(())
    }

    fn order(&self) -> ByteOrder {
        self.order
    }

    /// Pure state change, so it is accepted after close; any later value
    /// read or write still fails with `Closed`
    fn set_order(&mut self, order: ByteOrder) {
        self.order = order;
    }

    fn cursor(&mut self, side: Side) -> &mut Cursor {
        match side {
            Side::Start => self.start.get_or_insert_with(|| Cursor::new(Side::Start, 0)),
            Side::End => {
                let home = self.size() as i64 - 1;
                self.end.get_or_insert_with(|| Cursor::new(Side::End, home))
            }
        }
    }

    fn reset_cursors(&mut self) {
        self.start = None;
        self.end = None;
    }

    fn seek(&mut self, index: u64) -> Result<()> {
        self.ensure_open()?;
        let real = self.index_map.real_index(index);
        if self.position != Some(real) {
            trace!(index, real, "Repositioning source");
            self.source.position(real)?;
            self.position = Some(real);
        }
        self.buffer.reset();
        Ok(())
    }

    fn load(&mut self, side: Side, count: usize, consume: bool) -> Result<()> {
        self.ensure_open()?;
        let size = self.size();
        let index = self.cursor(side).index();

        let start = match side {
            Side::Start => {
                if index < 0 {
                    return Err(ChannelError::IndexOutOfBounds(format!("index: {} < 0", index)));
                }
                check_available(index as u64, size, count)?;
                index as u64
            }
            Side::End => {
                // Bytes [end - count, end) sit behind the cursor
                let end = index.saturating_add(1);
                if end > size as i64 {
                    return Err(ChannelError::IndexOutOfBounds(format!(
                        "index: {} > last index: {}",
                        index,
                        size as i64 - 1
                    )));
                }
                let end = end.max(0) as u64;
                if count > 0 && end == 0 {
                    return Err(ChannelError::Empty(
                        "no bytes remain before the end cursor".to_string(),
                    ));
                }
                if end < count as u64 {
                    return Err(ChannelError::Underflow {
                        needed: count as u64,
                        remaining: end,
                    });
                }
                end - count as u64
            }
        };

        self.read_virtual(start, count)?;

        if consume {
            self.forget(start, count as u64)?;
        } else {
            let cursor = self.cursor(side);
            match side {
                Side::Start => cursor.move_right(count as i64),
                Side::End => cursor.move_left(count as i64),
            };
        }
        Ok(())
    }

    fn load_at(&mut self, index: u64, count: usize) -> Result<()> {
        self.ensure_open()?;
        check_available(index, self.size(), count)?;
        self.read_virtual(index, count)
    }

    fn loaded(&self) -> &[u8] {
        self.buffer.loaded()
    }

    fn forget(&mut self, index: u64, count: u64) -> Result<()> {
        self.ensure_open()?;
        if count == 0 {
            return Ok(());
        }
        let size = self.size();
        let end = index
            .checked_add(count)
            .filter(|&end| end <= size)
            .ok_or_else(|| {
                ChannelError::IndexOutOfBounds(format!(
                    "range {}..{} exceeds channel size {}",
                    index,
                    index.saturating_add(count),
                    size
                ))
            })?;

        self.index_map.forget_range(index, count);
        self.each_cursor(|c| c.on_removed(index, end));
        Ok(())
    }

    fn insert(&mut self, index: u64, bytes: &[u8]) -> Result<()> {
        self.ensure_open()?;
        let size = self.size();
        if index > size {
            return Err(ChannelError::IndexOutOfBounds(format!(
                "index: {} > channel size: {}",
                index, size
            )));
        }
        if bytes.is_empty() {
            return Ok(());
        }
        let count = bytes.len() as u64;
        let requested = size.saturating_add(count);
        if requested > self.config.max_size {
            return Err(ChannelError::Overflow {
                requested,
                limit: self.config.max_size,
            });
        }

        // Real and virtual indices coincide after compaction
        self.compact_source()?;
        self.shift_tail(index, count)?;
        self.source.position(index)?;
        self.source.write(bytes)?;
        self.position = Some(index + count);
        self.real_len += count;
        self.buffer.reset();

        self.each_cursor(|c| c.on_inserted(index, count));
        Ok(())
    }

    fn overwrite(&mut self, index: u64, bytes: &[u8]) -> Result<()> {
        self.ensure_open()?;
        if bytes.is_empty() {
            return Ok(());
        }
        let size = self.size();
        let count = bytes.len() as u64;
        if index >= size || size - index < count {
            return Err(ChannelError::IndexOutOfBounds(format!(
                "range {}..{} exceeds channel size {}",
                index,
                index.saturating_add(count),
                size
            )));
        }

        let mut offset = 0usize;
        for (real, len) in self.index_map.runs(index, count) {
            let len = len as usize;
            if self.position != Some(real) {
                self.source.position(real)?;
            }
            self.source.write(&bytes[offset..offset + len])?;
            self.position = Some(real + len as u64);
            offset += len;
        }
        self.buffer.reset();
        Ok(())
    }

    fn truncate_all(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.source.truncate(0)?;
        self.real_len = 0;
        self.index_map.clear();
        self.buffer.reset();
        self.position = None;
        self.reset_cursors();
        debug!("Cleared data channel");
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.compact_source()?;
        self.source.flush()?;
        debug!(size = self.real_len, "Flushed data channel");
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if !self.source.is_open() {
            return Ok(());
        }
        let flushed = self.flush();
        let closed = self.source.close();
        flushed?;
        closed?;
        debug!("Closed data channel");
        Ok(())
    }
}

impl<S: ByteSource> Drop for DataChannel<S> {
    fn drop(&mut self) {
        if self.source.is_open() {
            if let Err(e) = self.close() {
                warn!(error = %e, "Failed to close data channel on drop");
            }
        }
    }
}

/// Validate that `count` bytes exist at `index` in a channel of `size` bytes
fn check_available(index: u64, size: u64, count: usize) -> Result<()> {
    if index > size {
        return Err(ChannelError::IndexOutOfBounds(format!(
            "index: {} > channel size: {}",
            index, size
        )));
    }
    let remaining = size - index;
    if count > 0 && remaining == 0 {
        return Err(ChannelError::Empty(format!(
            "no bytes remain at index {}",
            index
        )));
    }
    if remaining < count as u64 {
        return Err(ChannelError::Underflow {
            needed: count as u64,
            remaining,
        });
    }
    Ok(())
}
