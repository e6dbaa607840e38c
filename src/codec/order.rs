//! Byte order
//!
//! Endianness selection for multi-byte values.

/// Byte order of a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    /// Most significant byte first
    BigEndian,

    /// Least significant byte first
    LittleEndian,

    /// Whatever the host CPU uses
    #[default]
    Native,
}

impl ByteOrder {
    /// Resolve `Native` to the concrete order of the host
    pub fn resolve(self) -> ByteOrder {
        match self {
            ByteOrder::Native if cfg!(target_endian = "big") => ByteOrder::BigEndian,
            ByteOrder::Native => ByteOrder::LittleEndian,
            order => order,
        }
    }

    pub fn is_big_endian(self) -> bool {
        self.resolve() == ByteOrder::BigEndian
    }
}
