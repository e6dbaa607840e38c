//! # DataChannel
//!
//! A bidirectional, random-access byte channel with:
//! - Two cursors driving forward and backward reads and writes
//! - Fixed-width decoding of primitives in a configurable byte order
//! - Line scanning that understands `\n`, `\r\n` and `\r` in both directions
//! - Logical deletes through a virtual → real index map, compacted on flush
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │        ReadOps / WriteOps / LineOps / CursorOps (ext)        │
//! │        peek · pop · drop · push · replace · lines            │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  Access (primitive layer)
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      DataChannel<S>                          │
//! │           start cursor · end cursor · byte order             │
//! └──────┬──────────────────────┬──────────────────────┬────────┘
//!        │                      │                      │
//!        ▼                      ▼                      ▼
//!  ┌───────────┐         ┌────────────┐         ┌────────────┐
//!  │ IndexMap  │         │ LoadBuffer │         │   Codec    │
//!  │ (virtual→ │         │ (1 / N     │         │ (order,    │
//!  │   real)   │         │  bytes)    │         │  charset)  │
//!  └─────┬─────┘         └─────┬──────┘         └────────────┘
//!        └──────────┬──────────┘
//!                   ▼
//!           ┌──────────────┐
//!           │  ByteSource  │
//!           │ (file / mem) │
//!           └──────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use datachannel::prelude::*;
//!
//! # fn main() -> datachannel::Result<()> {
//! let mut channel = DataChannel::open_path("notes.txt")?;
//! while let Some(line) = channel.pop_line_or_none()? {
//!     println!("{}", line);
//! }
//! channel.close()?;
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod codec;
pub mod index;
pub mod source;
pub mod buffer;
pub mod cursor;
pub mod channel;
pub mod ext;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ChannelError, Result};
pub use config::ChannelConfig;
pub use channel::{Access, DataChannel};
pub use codec::{ByteOrder, Charset, Primitive};
pub use cursor::{Cursor, Side};
pub use source::{ByteSource, FileSource, MemorySource};

/// Everything needed to work with a channel
pub mod prelude {
    pub use crate::channel::{Access, DataChannel};
    pub use crate::codec::{ByteOrder, Charset};
    pub use crate::config::ChannelConfig;
    pub use crate::cursor::Side;
    pub use crate::ext::{CursorOps, LineOps, ReadOps, WriteOps};
    pub use crate::source::{ByteSource, FileSource, MemorySource};
}

// =============================================================================
// Version Info
// =============================================================================

/// Current version of DataChannel
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
