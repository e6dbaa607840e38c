//! Primitive access layer
//!
//! The handful of operations every channel implements. Everything in
//! [`crate::ext`] is written purely in terms of this trait.

use crate::codec::{self, ByteOrder, Primitive};
use crate::cursor::{Cursor, Side};
use crate::error::{absent_on_exhaustion, ChannelError, Result};

/// Primitive operations of a random-access channel
pub trait Access {
    // -------------------------------------------------------------------------
    // State
    // -------------------------------------------------------------------------

    fn is_open(&self) -> bool;

    /// Fail with `Closed` once the channel has been closed
    fn ensure_open(&self) -> Result<()> {
        if self.is_open() {
            Ok(())
        } else {
            Err(ChannelError::Closed)
        }
    }

    /// Number of visible bytes
    fn size(&self) -> u64;

    /// Shrink (truncating from the end) or grow (appending zero bytes)
    fn set_size(&mut self, new_size: u64) -> Result<()>;

    fn order(&self) -> ByteOrder;

    fn set_order(&mut self, order: ByteOrder);

    // -------------------------------------------------------------------------
    // Cursors
    // -------------------------------------------------------------------------

    /// The cursor for `side`, created at its home index on first use
    fn cursor(&mut self, side: Side) -> &mut Cursor;

    /// Discard both cursors; they are re-created lazily
    fn reset_cursors(&mut self);

    // -------------------------------------------------------------------------
    // Reading
    // -------------------------------------------------------------------------

    /// Position the source at the real index behind `index`
    fn seek(&mut self, index: u64) -> Result<()>;

    /// Stage `count` bytes at the `side` cursor.
    ///
    /// Without `consume` the cursor moves past the bytes; with it the bytes
    /// are forgotten instead. Nothing moves when the load fails.
    fn load(&mut self, side: Side, count: usize, consume: bool) -> Result<()>;

    /// Like [`Access::load`], but exhaustion yields `Ok(false)`
    fn load_or_none(&mut self, side: Side, count: usize, consume: bool) -> Result<bool> {
        Ok(absent_on_exhaustion(self.load(side, count, consume))?.is_some())
    }

    /// Stage `count` bytes at `index` without touching any cursor
    fn load_at(&mut self, index: u64, count: usize) -> Result<()>;

    /// The bytes staged by the last load
    fn loaded(&self) -> &[u8];

    /// Decode the staged bytes as `T`
    fn get<T: Primitive>(&self) -> Result<T>
    where
        Self: Sized,
    {
        codec::decode(self.loaded(), self.order())
    }

    /// Copy out the staged bytes
    fn get_all(&self) -> Vec<u8> {
        self.loaded().to_vec()
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Logically delete `count` bytes at `index`
    fn forget(&mut self, index: u64, count: u64) -> Result<()>;

    /// Insert `bytes` so the first of them lands at `index`
    fn insert(&mut self, index: u64, bytes: &[u8]) -> Result<()>;

    /// Overwrite existing bytes starting at `index`
    fn overwrite(&mut self, index: u64, bytes: &[u8]) -> Result<()>;

    /// Remove all content and reset both cursors
    fn truncate_all(&mut self) -> Result<()>;

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Write pending changes through to the source
    fn flush(&mut self) -> Result<()>;

    /// Flush, then release the source. Closing twice is a no-op.
    fn close(&mut self) -> Result<()>;
}
