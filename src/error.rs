//! Error types for DataChannel
//!
//! Provides a unified error type for all channel operations.

use thiserror::Error;

/// Result type alias using ChannelError
pub type Result<T> = std::result::Result<T, ChannelError>;

/// Unified error type for DataChannel operations
#[derive(Debug, Error)]
pub enum ChannelError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Channel is closed")]
    Closed,

    // -------------------------------------------------------------------------
    // Data Availability Errors
    // -------------------------------------------------------------------------
    #[error("Channel is empty: {0}")]
    Empty(String),

    #[error("Channel underflow: needed {needed} bytes, {remaining} remaining")]
    Underflow { needed: u64, remaining: u64 },

    #[error("Channel overflow: {requested} bytes requested, limit is {limit}")]
    Overflow { requested: u64, limit: u64 },

    // -------------------------------------------------------------------------
    // Argument Errors
    // -------------------------------------------------------------------------
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(String),

    #[error("Illegal argument: {0}")]
    IllegalArgument(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ChannelError {
    /// Whether this error only means "not enough data in that direction".
    ///
    /// The `*_or_none` operations fold these into `Ok(None)`; everything
    /// else propagates.
    pub fn is_exhaustion(&self) -> bool {
        matches!(self, ChannelError::Empty(_) | ChannelError::Underflow { .. })
    }
}

/// Convert an exhaustion error into an absent value, keep every other error.
pub(crate) fn absent_on_exhaustion<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_exhaustion() => Ok(None),
        Err(e) => Err(e),
    }
}
