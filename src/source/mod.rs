//! Source Module
//!
//! The seekable byte storage a channel reads from and writes to.
//!
//! ## Responsibilities
//! - Absolute positioning (`position`)
//! - Reading until the buffer is full or the data ends
//! - Writing at the current position, extending the storage as needed
//! - Reporting and changing the storage length
//!
//! A source does not know about cursors, drops, or byte order; the channel
//! layers those on top.

mod file;
mod memory;

pub use file::FileSource;
pub use memory::MemorySource;

use crate::error::Result;

/// Seekable, resizable byte storage
pub trait ByteSource {
    /// Move the read/write position to `index`
    fn position(&mut self, index: u64) -> Result<()>;

    /// Read into `buf` until it is full or the data ends; returns bytes read
    fn read(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Write all of `buf` at the current position
    fn write(&mut self, buf: &[u8]) -> Result<()>;

    /// Current length in bytes
    fn size(&mut self) -> Result<u64>;

    /// Shrink or zero-extend to `new_size`
    fn truncate(&mut self, new_size: u64) -> Result<()>;

    /// Push buffered writes down to the destination
    fn flush(&mut self) -> Result<()>;

    /// Release the storage; later calls fail with `Closed`
    fn close(&mut self) -> Result<()>;

    fn is_open(&self) -> bool;
}
