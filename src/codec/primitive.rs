//! Primitive codec
//!
//! Encode/decode fixed-width values to and from raw bytes.

use crate::error::{ChannelError, Result};

use super::ByteOrder;

/// A value with a fixed byte width that a channel can read and write.
///
/// `decode_from` and `encode_into` expect slices of at least `WIDTH` bytes;
/// use [`decode`] / [`encode`] for the checked variants.
pub trait Primitive: Sized + Copy {
    /// Number of bytes this value occupies
    const WIDTH: usize;

    /// Decode from the first `WIDTH` bytes of `src`
    fn decode_from(src: &[u8], order: ByteOrder) -> Self;

    /// Encode into the first `WIDTH` bytes of `dst`
    fn encode_into(self, order: ByteOrder, dst: &mut [u8]) -> Result<()>;
}

/// Decode a value, failing with underflow when `src` is too short
pub fn decode<T: Primitive>(src: &[u8], order: ByteOrder) -> Result<T> {
    if src.len() < T::WIDTH {
        return Err(ChannelError::Underflow {
            needed: T::WIDTH as u64,
            remaining: src.len() as u64,
        });
    }
    Ok(T::decode_from(src, order))
}

/// Encode a value into a freshly allocated byte vector
pub fn encode<T: Primitive>(value: T, order: ByteOrder) -> Result<Vec<u8>> {
    let mut out = vec![0u8; T::WIDTH];
    value.encode_into(order, &mut out)?;
    Ok(out)
}

macro_rules! impl_primitive {
    ($($ty:ty),* $(,)?) => {$(
        impl Primitive for $ty {
            const WIDTH: usize = std::mem::size_of::<$ty>();

            fn decode_from(src: &[u8], order: ByteOrder) -> Self {
                let mut raw = [0u8; std::mem::size_of::<$ty>()];
                raw.copy_from_slice(&src[..Self::WIDTH]);
                if order.is_big_endian() {
                    <$ty>::from_be_bytes(raw)
                } else {
                    <$ty>::from_le_bytes(raw)
                }
            }

            fn encode_into(self, order: ByteOrder, dst: &mut [u8]) -> Result<()> {
                let raw = if order.is_big_endian() {
                    self.to_be_bytes()
                } else {
                    self.to_le_bytes()
                };
                dst[..Self::WIDTH].copy_from_slice(&raw);
                Ok(())
            }
        }
    )*};
}

impl_primitive!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);

// Booleans are one byte: 1 is true, anything else is false.
impl Primitive for bool {
    const WIDTH: usize = 1;

    fn decode_from(src: &[u8], _order: ByteOrder) -> Self {
        src[0] == 1
    }

    fn encode_into(self, _order: ByteOrder, dst: &mut [u8]) -> Result<()> {
        dst[0] = u8::from(self);
        Ok(())
    }
}

impl Primitive for char {
    const WIDTH: usize = 2;

    fn decode_from(src: &[u8], order: ByteOrder) -> Self {
        let unit = u16::decode_from(src, order);
        char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    fn encode_into(self, order: ByteOrder, dst: &mut [u8]) -> Result<()> {
        let unit = u16::try_from(u32::from(self)).map_err(|_| {
            ChannelError::IllegalArgument(format!(
                "char {:?} does not fit in one UTF-16 code unit",
                self
            ))
        })?;
        unit.encode_into(order, dst)
    }
}
