//! Write families
//!
//! Inserts land in front of the start cursor (`push`), behind the end
//! cursor (`push_last`) or at an explicit index (`push_to`). Cursors follow
//! the content so that a push followed by the matching pop is a round trip.

use crate::channel::Access;
use crate::codec::{self, Charset, Primitive};
use crate::cursor::Side;
use crate::error::Result;

use super::check_insert_index;

/// Insert and overwrite operations for every [`Access`] type
pub trait WriteOps: Access + Sized {
    // =========================================================================
    // Insert
    // =========================================================================

    /// Insert `bytes` at the start cursor; the cursor ends up on the first of them
    fn push(&mut self, bytes: &[u8]) -> Result<()> {
        self.ensure_open()?;
        let index = self.cursor(Side::Start).index();
        let index = check_insert_index(self, index)?;
        self.insert(index, bytes)
    }

    fn push_value<T: Primitive>(&mut self, value: T) -> Result<()> {
        let bytes = codec::encode(value, self.order())?;
        self.push(&bytes)
    }

    fn push_str(&mut self, text: &str, charset: Charset) -> Result<()> {
        self.push(&charset.encode(text))
    }

    /// Insert `bytes` behind the end cursor; the cursor ends up on the last of them
    fn push_last(&mut self, bytes: &[u8]) -> Result<()> {
        self.ensure_open()?;
        let index = self.cursor(Side::End).index().saturating_add(1);
        let index = check_insert_index(self, index)?;
        self.insert(index, bytes)
    }

    fn push_last_value<T: Primitive>(&mut self, value: T) -> Result<()> {
        let bytes = codec::encode(value, self.order())?;
        self.push_last(&bytes)
    }

    fn push_last_str(&mut self, text: &str, charset: Charset) -> Result<()> {
        self.push_last(&charset.encode(text))
    }

    /// Insert `bytes` so the first of them lands at `index` (`index <= size`)
    fn push_to(&mut self, index: u64, bytes: &[u8]) -> Result<()> {
        self.insert(index, bytes)
    }

    fn push_value_to<T: Primitive>(&mut self, index: u64, value: T) -> Result<()> {
        let bytes = codec::encode(value, self.order())?;
        self.push_to(index, &bytes)
    }

    fn push_str_to(&mut self, index: u64, text: &str, charset: Charset) -> Result<()> {
        self.push_to(index, &charset.encode(text))
    }

    // =========================================================================
    // Overwrite
    // =========================================================================

    /// Overwrite the byte at `index` (`index < size`)
    fn replace(&mut self, index: u64, byte: u8) -> Result<()> {
        self.overwrite(index, &[byte])
    }

    /// Alias of [`WriteOps::replace`]
    fn set(&mut self, index: u64, byte: u8) -> Result<()> {
        self.replace(index, byte)
    }

    /// Overwrite the bytes of a `T` starting at `index`
    fn replace_value<T: Primitive>(&mut self, index: u64, value: T) -> Result<()> {
        let bytes = codec::encode(value, self.order())?;
        self.overwrite(index, &bytes)
    }

    // =========================================================================
    // Size
    // =========================================================================

    /// Shrink from the end or grow with zero bytes
    fn set_len(&mut self, new_size: u64) -> Result<()> {
        self.set_size(new_size)
    }
}

impl<A: Access> WriteOps for A {}
