//! Load buffer
//!
//! Per-channel staging area for bytes moving between the source and the
//! decoder. One-byte loads use a fixed slot; larger loads share a growable
//! buffer that keeps the capacity of the largest request seen.

use bytes::BytesMut;

/// Which staging slot holds the current load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Loaded {
    Nothing,
    Single,
    Multi,
}

/// Reusable staging buffer owned by a single channel
#[derive(Debug)]
pub struct LoadBuffer {
    single: [u8; 1],
    bytes: BytesMut,
    loaded: Loaded,
}

impl LoadBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            single: [0],
            bytes: BytesMut::with_capacity(capacity),
            loaded: Loaded::Nothing,
        }
    }

    /// Prepare `count` bytes of staging space and mark it as the current load
    pub fn stage(&mut self, count: usize) -> &mut [u8] {
        if count == 1 {
            self.loaded = Loaded::Single;
            return &mut self.single;
        }
        self.loaded = Loaded::Multi;
        self.bytes.clear();
        self.bytes.resize(count, 0);
        &mut self.bytes[..]
    }

    /// The most recently staged bytes
    pub fn loaded(&self) -> &[u8] {
        match self.loaded {
            Loaded::Nothing => &[],
            Loaded::Single => &self.single,
            Loaded::Multi => &self.bytes,
        }
    }

    /// Forget the current load (kept capacity is reused)
    pub fn reset(&mut self) {
        self.loaded = Loaded::Nothing;
    }

    /// Capacity of the multi-byte slot
    pub fn capacity(&self) -> usize {
        self.bytes.capacity()
    }
}
