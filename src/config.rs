//! Configuration for DataChannel
//!
//! Centralized configuration with sensible defaults.

use crate::codec::ByteOrder;
use crate::error::{ChannelError, Result};

/// Default capacity of the multi-byte load buffer (and shift/compaction chunk size)
pub const DEFAULT_BUFFER_SIZE: usize = 8 * 1024;

/// Default expected number of forgotten indices
pub const DEFAULT_INDEX_CAPACITY: usize = 16;

/// Main configuration for a DataChannel instance
#[derive(Debug, Clone)]
pub struct ChannelConfig {
    // -------------------------------------------------------------------------
    // Decoding Configuration
    // -------------------------------------------------------------------------
    /// Byte order used by every multi-byte read and write
    pub byte_order: ByteOrder,

    // -------------------------------------------------------------------------
    // Buffer Configuration
    // -------------------------------------------------------------------------
    /// Initial capacity of the N-byte load buffer.
    /// Also the chunk size used when shifting or compacting the source.
    pub buffer_size: usize,

    /// Expected number of dropped runs; sets the minimum index table size
    pub index_capacity: usize,

    /// Maximum extent of the channel in bytes (writes past it overflow)
    pub max_size: u64,

    // -------------------------------------------------------------------------
    // File Configuration
    // -------------------------------------------------------------------------
    /// Create the file if it does not exist
    pub create: bool,

    /// Truncate the file to zero length on open
    pub truncate: bool,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            byte_order: ByteOrder::Native,
            buffer_size: DEFAULT_BUFFER_SIZE,
            index_capacity: DEFAULT_INDEX_CAPACITY,
            max_size: i64::MAX as u64,
            create: true,
            truncate: false,
        }
    }
}

impl ChannelConfig {
    /// Create a new config builder
    pub fn builder() -> ChannelConfigBuilder {
        ChannelConfigBuilder::default()
    }
}

/// Builder for ChannelConfig
#[derive(Debug, Default)]
pub struct ChannelConfigBuilder {
    config: ChannelConfig,
}

impl ChannelConfigBuilder {
    /// Set the byte order
    pub fn byte_order(mut self, order: ByteOrder) -> Self {
        self.config.byte_order = order;
        self
    }

    /// Set the load buffer size (in bytes)
    pub fn buffer_size(mut self, size: usize) -> Self {
        self.config.buffer_size = size;
        self
    }

    /// Set the expected number of dropped runs
    pub fn index_capacity(mut self, capacity: usize) -> Self {
        self.config.index_capacity = capacity;
        self
    }

    /// Set the maximum channel size (in bytes)
    pub fn max_size(mut self, size: u64) -> Self {
        self.config.max_size = size;
        self
    }

    /// Create the file when missing
    pub fn create(mut self, create: bool) -> Self {
        self.config.create = create;
        self
    }

    /// Truncate the file on open
    pub fn truncate(mut self, truncate: bool) -> Self {
        self.config.truncate = truncate;
        self
    }

    pub fn build(self) -> Result<ChannelConfig> {
        if self.config.buffer_size == 0 {
            return Err(ChannelError::Config("buffer_size must be positive".to_string()));
        }
        if self.config.max_size > i64::MAX as u64 {
            return Err(ChannelError::Config(format!(
                "max_size {} exceeds the signed index range",
                self.config.max_size
            )));
        }
        Ok(self.config)
    }
}
