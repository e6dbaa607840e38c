//! Codec Module
//!
//! Fixed-width encoding of primitive values and string conversion.
//!
//! ## Widths
//! ```text
//! ┌──────────────────────┬───────┐
//! │ u8 / i8 / bool       │ 1     │
//! │ u16 / i16 / char     │ 2     │
//! │ u32 / i32 / f32      │ 4     │
//! │ u64 / i64 / f64      │ 8     │
//! └──────────────────────┴───────┘
//! ```
//!
//! `char` travels as a single UTF-16 code unit, so only BMP characters can
//! be written.

mod charset;
mod order;
mod primitive;

pub use charset::Charset;
pub use order::ByteOrder;
pub use primitive::{decode, encode, Primitive};

/// `\n`
pub(crate) const LINE_FEED: u8 = b'\n';

/// `\r`
pub(crate) const CARRIAGE_RETURN: u8 = b'\r';
