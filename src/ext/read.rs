//! Read families
//!
//! Peek reads and advances, pop reads and forgets, drop only forgets.
//! Forward variants act at the start cursor, `*_last` variants at the end
//! cursor, `*_at` / `*_range` at explicit indices.

use crate::channel::Access;
use crate::codec::{Charset, Primitive};
use crate::cursor::Side;
use crate::error::{absent_on_exhaustion, ChannelError, Result};

use super::check_range;

/// Chunk size used when streaming the whole channel through a hasher
const CHECKSUM_CHUNK: u64 = 8 * 1024;

/// Read, pop and drop operations for every [`Access`] type
pub trait ReadOps: Access + Sized {
    // =========================================================================
    // Fixed-width values
    // =========================================================================

    /// Read a `T` at the start cursor and move past it
    fn peek<T: Primitive>(&mut self) -> Result<T> {
        self.load(Side::Start, T::WIDTH, false)?;
        self.get()
    }

    fn peek_or_none<T: Primitive>(&mut self) -> Result<Option<T>> {
        absent_on_exhaustion(self.peek())
    }

    /// Read the `T` ending at the end cursor and move in front of it
    fn peek_last<T: Primitive>(&mut self) -> Result<T> {
        self.load(Side::End, T::WIDTH, false)?;
        self.get()
    }

    fn peek_last_or_none<T: Primitive>(&mut self) -> Result<Option<T>> {
        absent_on_exhaustion(self.peek_last())
    }

    /// Read a `T` at the start cursor and forget its bytes
    fn pop<T: Primitive>(&mut self) -> Result<T> {
        self.load(Side::Start, T::WIDTH, true)?;
        self.get()
    }

    fn pop_or_none<T: Primitive>(&mut self) -> Result<Option<T>> {
        absent_on_exhaustion(self.pop())
    }

    fn pop_last<T: Primitive>(&mut self) -> Result<T> {
        self.load(Side::End, T::WIDTH, true)?;
        self.get()
    }

    fn pop_last_or_none<T: Primitive>(&mut self) -> Result<Option<T>> {
        absent_on_exhaustion(self.pop_last())
    }

    /// Forget the bytes of one `T` at the start cursor; `false` if too few remain
    fn drop_value<T: Primitive>(&mut self) -> Result<bool> {
        forget_at_cursor(self, Side::Start, T::WIDTH as u64)
    }

    fn drop_last_value<T: Primitive>(&mut self) -> Result<bool> {
        forget_at_cursor(self, Side::End, T::WIDTH as u64)
    }

    // =========================================================================
    // Byte arrays
    // =========================================================================

    fn peek_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        self.load(Side::Start, count, false)?;
        Ok(self.get_all())
    }

    fn peek_bytes_or_none(&mut self, count: usize) -> Result<Option<Vec<u8>>> {
        absent_on_exhaustion(self.peek_bytes(count))
    }

    fn peek_last_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        self.load(Side::End, count, false)?;
        Ok(self.get_all())
    }

    fn peek_last_bytes_or_none(&mut self, count: usize) -> Result<Option<Vec<u8>>> {
        absent_on_exhaustion(self.peek_last_bytes(count))
    }

    fn pop_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        self.load(Side::Start, count, true)?;
        Ok(self.get_all())
    }

    fn pop_bytes_or_none(&mut self, count: usize) -> Result<Option<Vec<u8>>> {
        absent_on_exhaustion(self.pop_bytes(count))
    }

    fn pop_last_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        self.load(Side::End, count, true)?;
        Ok(self.get_all())
    }

    fn pop_last_bytes_or_none(&mut self, count: usize) -> Result<Option<Vec<u8>>> {
        absent_on_exhaustion(self.pop_last_bytes(count))
    }

    fn drop_bytes(&mut self, count: usize) -> Result<bool> {
        forget_at_cursor(self, Side::Start, count as u64)
    }

    fn drop_last_bytes(&mut self, count: usize) -> Result<bool> {
        forget_at_cursor(self, Side::End, count as u64)
    }

    // =========================================================================
    // Strings (fixed byte count)
    // =========================================================================

    fn peek_string(&mut self, count: usize, charset: Charset) -> Result<String> {
        Ok(charset.decode(&self.peek_bytes(count)?))
    }

    fn peek_string_or_none(&mut self, count: usize, charset: Charset) -> Result<Option<String>> {
        absent_on_exhaustion(self.peek_string(count, charset))
    }

    fn peek_last_string(&mut self, count: usize, charset: Charset) -> Result<String> {
        Ok(charset.decode(&self.peek_last_bytes(count)?))
    }

    fn pop_string(&mut self, count: usize, charset: Charset) -> Result<String> {
        Ok(charset.decode(&self.pop_bytes(count)?))
    }

    fn pop_string_or_none(&mut self, count: usize, charset: Charset) -> Result<Option<String>> {
        absent_on_exhaustion(self.pop_string(count, charset))
    }

    fn pop_last_string(&mut self, count: usize, charset: Charset) -> Result<String> {
        Ok(charset.decode(&self.pop_last_bytes(count)?))
    }

    // =========================================================================
    // Index-addressed
    // =========================================================================

    /// The byte at `index`; no cursor moves
    fn peek_at(&mut self, index: u64) -> Result<u8> {
        self.load_at(index, 1)?;
        self.get()
    }

    fn peek_at_or_none(&mut self, index: u64) -> Result<Option<u8>> {
        absent_on_exhaustion(self.peek_at(index))
    }

    /// Decode a `T` starting at `index`
    fn peek_value_at<T: Primitive>(&mut self, index: u64) -> Result<T> {
        self.load_at(index, T::WIDTH)?;
        self.get()
    }

    /// Read and forget the byte at `index`; later bytes shift down by one
    fn pop_at(&mut self, index: u64) -> Result<u8> {
        let byte = self.peek_at(index)?;
        self.forget(index, 1)?;
        Ok(byte)
    }

    fn pop_at_or_none(&mut self, index: u64) -> Result<Option<u8>> {
        absent_on_exhaustion(self.pop_at(index))
    }

    fn drop_at(&mut self, index: u64) -> Result<()> {
        self.ensure_open()?;
        let size = self.size();
        if index > size {
            return Err(ChannelError::IndexOutOfBounds(format!(
                "index: {} > channel size: {}",
                index, size
            )));
        }
        if index == size {
            return Err(ChannelError::Empty(format!("no byte at index {}", index)));
        }
        self.forget(index, 1)
    }

    // =========================================================================
    // Ranges `[start, end)`
    // =========================================================================

    fn peek_range(&mut self, start: u64, end: u64) -> Result<Vec<u8>> {
        self.ensure_open()?;
        check_range(start, end, self.size())?;
        if start == end {
            return Ok(Vec::new());
        }
        self.load_at(start, (end - start) as usize)?;
        Ok(self.get_all())
    }

    fn peek_range_string(&mut self, start: u64, end: u64, charset: Charset) -> Result<String> {
        Ok(charset.decode(&self.peek_range(start, end)?))
    }

    fn pop_range(&mut self, start: u64, end: u64) -> Result<Vec<u8>> {
        let bytes = self.peek_range(start, end)?;
        self.forget(start, end - start)?;
        Ok(bytes)
    }

    fn drop_range(&mut self, start: u64, end: u64) -> Result<()> {
        self.ensure_open()?;
        check_range(start, end, self.size())?;
        self.forget(start, end - start)
    }

    // =========================================================================
    // Whole channel
    // =========================================================================

    /// All visible bytes, terminators included; cursors are untouched
    fn peek_all(&mut self) -> Result<Vec<u8>> {
        self.ensure_open()?;
        let size = self.size();
        if size == 0 {
            return Err(ChannelError::Empty("channel has no bytes".to_string()));
        }
        self.load_at(0, size as usize)?;
        Ok(self.get_all())
    }

    fn peek_all_or_none(&mut self) -> Result<Option<Vec<u8>>> {
        absent_on_exhaustion(self.peek_all())
    }

    fn peek_all_string(&mut self, charset: Charset) -> Result<String> {
        Ok(charset.decode(&self.peek_all()?))
    }

    /// All visible bytes, leaving the channel empty
    fn pop_all(&mut self) -> Result<Vec<u8>> {
        let bytes = self.peek_all()?;
        self.forget(0, bytes.len() as u64)?;
        Ok(bytes)
    }

    fn pop_all_or_none(&mut self) -> Result<Option<Vec<u8>>> {
        absent_on_exhaustion(self.pop_all())
    }

    /// Bytes from the start cursor through the end cursor (inclusive)
    fn peek_between_cursors(&mut self) -> Result<Vec<u8>> {
        self.ensure_open()?;
        let size = self.size() as i64;
        let start = self.cursor(Side::Start).index();
        let end = self.cursor(Side::End).index().saturating_add(1);
        if start < 0 || end > size {
            return Err(ChannelError::IndexOutOfBounds(format!(
                "cursors {}..{} outside channel of size {}",
                start, end, size
            )));
        }
        if start >= end {
            return Ok(Vec::new());
        }
        self.load_at(start as u64, (end - start) as usize)?;
        Ok(self.get_all())
    }

    /// Remove all content and reset both cursors
    fn clear(&mut self) -> Result<()> {
        self.truncate_all()
    }

    // =========================================================================
    // State
    // =========================================================================

    fn first_index(&self) -> i64 {
        0
    }

    fn last_index(&self) -> i64 {
        self.size() as i64 - 1
    }

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    fn is_not_empty(&self) -> bool {
        !self.is_empty()
    }

    /// CRC32 of the visible content
    fn checksum(&mut self) -> Result<u32> {
        self.ensure_open()?;
        let size = self.size();
        let mut hasher = crc32fast::Hasher::new();
        let mut index = 0u64;
        while index < size {
            let n = (size - index).min(CHECKSUM_CHUNK) as usize;
            self.load_at(index, n)?;
            hasher.update(self.loaded());
            index += n as u64;
        }
        Ok(hasher.finalize())
    }
}

impl<A: Access> ReadOps for A {}

/// Forget `count` bytes in front of the `side` cursor without reading them
fn forget_at_cursor<A: Access>(channel: &mut A, side: Side, count: u64) -> Result<bool> {
    channel.ensure_open()?;
    let size = channel.size() as i64;
    let index = channel.cursor(side).index();

    let start = match side {
        Side::Start => {
            if index < 0 || index > size {
                return Err(ChannelError::IndexOutOfBounds(format!(
                    "start cursor: {} outside 0..={}",
                    index, size
                )));
            }
            if ((size - index) as u64) < count {
                return Ok(false);
            }
            index as u64
        }
        Side::End => {
            let end = index.saturating_add(1);
            if end > size {
                return Err(ChannelError::IndexOutOfBounds(format!(
                    "end cursor: {} > last index: {}",
                    index,
                    size - 1
                )));
            }
            let end = end.max(0) as u64;
            if end < count {
                return Ok(false);
            }
            end - count
        }
    };

    channel.forget(start, count)?;
    Ok(true)
}
