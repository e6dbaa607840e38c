//! Extension Module
//!
//! Every derived channel operation, written purely against [`Access`].
//!
//! ## Families
//! ```text
//! ┌────────────┬──────────────────────────────────────────────────────┐
//! │ ReadOps    │ peek / pop / drop, *_last, *_at, *_range, *_all      │
//! │ WriteOps   │ push / push_last / push_to, replace, set_len         │
//! │ LineOps    │ line scanning in both directions                     │
//! │ CursorOps  │ cursor handles with line-relative movement           │
//! └────────────┴──────────────────────────────────────────────────────┘
//! ```
//!
//! Each trait is blanket-implemented for every [`Access`] type, so bringing
//! [`crate::prelude`] into scope is enough to use them.

mod cursor;
mod line;
mod read;
mod write;

pub use cursor::{CursorMut, CursorOps};
pub use line::LineOps;
pub use read::ReadOps;
pub use write::WriteOps;

use crate::channel::Access;
use crate::error::{ChannelError, Result};

/// Validate a half-open range `[start, end)` against a channel of `size` bytes
pub(crate) fn check_range(start: u64, end: u64, size: u64) -> Result<()> {
    if start > end {
        return Err(ChannelError::IllegalArgument(format!(
            "start: {} > end: {}",
            start, end
        )));
    }
    if end > size {
        return Err(ChannelError::IndexOutOfBounds(format!(
            "end: {} > channel size: {}",
            end, size
        )));
    }
    Ok(())
}

/// Validate an insertion point (`index <= size`)
pub(crate) fn check_insert_index<A: Access + ?Sized>(channel: &A, index: i64) -> Result<u64> {
    let size = channel.size();
    if index < 0 || index as u64 > size {
        return Err(ChannelError::IndexOutOfBounds(format!(
            "insert index: {} outside 0..={}",
            index, size
        )));
    }
    Ok(index as u64)
}
