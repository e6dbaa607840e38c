//! Tests for channel lifecycle
//!
//! These tests verify:
//! - Opening file-backed channels
//! - Drops staying logical until flush, then being compacted to disk
//! - Close semantics (idempotent, later operations fail with Closed)
//! - Best-effort close on drop
//! - Config validation

use std::path::PathBuf;

use datachannel::prelude::*;
use datachannel::ChannelError;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_file(content: &[u8]) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("channel.txt");
    std::fs::write(&path, content).unwrap();
    (temp_dir, path)
}

// =============================================================================
// Open
// =============================================================================

#[test]
fn test_open_existing_file() {
    let (_temp, path) = setup_temp_file(b"ONE_LINE\nTWO_LINE");

    let mut ch = DataChannel::open_path(&path).unwrap();

    assert_eq!(ch.size(), 17);
    assert!(ch.is_open());
    assert_eq!(ch.peek_line().unwrap(), "ONE_LINE");
    ch.close().unwrap();
}

#[test]
fn test_open_creates_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("new.bin");

    let mut ch = DataChannel::open_path(&path).unwrap();
    assert!(ch.is_empty());
    ch.push_last(b"fresh").unwrap();
    ch.close().unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), b"fresh");
}

#[test]
fn test_open_with_truncate() {
    let (_temp, path) = setup_temp_file(b"stale");
    let config = ChannelConfig::builder().truncate(true).build().unwrap();

    let ch = DataChannel::open(&path, config).unwrap();

    assert_eq!(ch.size(), 0);
}

#[test]
fn test_open_closed_source_fails() {
    let mut source = MemorySource::from_bytes(b"x");
    source.close().unwrap();

    assert!(matches!(DataChannel::new(source), Err(ChannelError::Closed)));
}

#[test]
fn test_source_larger_than_max_size() {
    let config = ChannelConfig::builder().max_size(2).build().unwrap();
    let result = DataChannel::with_config(MemorySource::from_bytes(b"abc"), config);

    assert!(matches!(result, Err(ChannelError::Overflow { .. })));
}

// =============================================================================
// Flush / Compaction
// =============================================================================

#[test]
fn test_drops_are_logical_until_flush() {
    let (_temp, path) = setup_temp_file(b"keep-drop-keep");
    let mut ch = DataChannel::open_path(&path).unwrap();

    ch.drop_range(4, 9).unwrap();
    assert_eq!(ch.peek_all().unwrap(), b"keep-keep");
    assert_eq!(std::fs::read(&path).unwrap(), b"keep-drop-keep");

    ch.flush().unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), b"keep-keep");
    assert_eq!(ch.forgotten_count(), 0);
    assert_eq!(ch.real_len(), 9);
    ch.close().unwrap();
}

#[test]
fn test_compact_with_small_chunks() {
    let data: Vec<u8> = (0..200u8).collect();
    let (_temp, path) = setup_temp_file(&data);
    let config = ChannelConfig::builder().buffer_size(7).build().unwrap();
    let mut ch = DataChannel::open(&path, config).unwrap();

    for index in (0..100u64).rev().step_by(3) {
        ch.drop_at(index).unwrap();
    }
    let visible = ch.peek_all().unwrap();
    ch.compact().unwrap();

    assert_eq!(ch.peek_all().unwrap(), visible);
    assert_eq!(std::fs::read(&path).unwrap(), visible);
    ch.close().unwrap();
}

#[test]
fn test_cursors_survive_flush() {
    let mut ch = DataChannel::from_bytes(b"0123456789").unwrap();
    ch.start_cursor().move_to(6);
    ch.drop_range(0, 3).unwrap();

    ch.flush().unwrap();

    assert_eq!(ch.start_cursor().index(), 3);
    assert_eq!(ch.peek::<u8>().unwrap(), b'6');
}

// =============================================================================
// Close
// =============================================================================

#[test]
fn test_operations_after_close_fail() {
    let mut ch = DataChannel::from_bytes(b"abc").unwrap();

    ch.close().unwrap();

    assert!(!ch.is_open());
    assert!(matches!(ch.peek::<u8>(), Err(ChannelError::Closed)));
    assert!(matches!(ch.peek_or_none::<u8>(), Err(ChannelError::Closed)));
    assert!(matches!(ch.peek_at(0), Err(ChannelError::Closed)));
    assert!(matches!(ch.push(b"x"), Err(ChannelError::Closed)));
    assert!(matches!(ch.drop_range(0, 1), Err(ChannelError::Closed)));
    assert!(matches!(ch.peek_line_or_none(), Err(ChannelError::Closed)));
    assert!(matches!(ch.flush(), Err(ChannelError::Closed)));
    assert!(matches!(ch.clear(), Err(ChannelError::Closed)));
}

#[test]
fn test_set_order_after_close_is_accepted() {
    let mut ch = DataChannel::from_bytes(&[0, 1]).unwrap();
    ch.close().unwrap();

    ch.set_order(ByteOrder::BigEndian);

    assert_eq!(ch.order(), ByteOrder::BigEndian);
    assert!(matches!(ch.peek::<u16>(), Err(ChannelError::Closed)));
    assert!(matches!(ch.push_value(1u16), Err(ChannelError::Closed)));
}

#[test]
fn test_close_twice_is_noop() {
    let mut ch = DataChannel::from_bytes(b"abc").unwrap();

    ch.close().unwrap();
    ch.close().unwrap();
}

#[test]
fn test_close_flushes_drops() {
    let mut ch = DataChannel::from_bytes(b"abc").unwrap();
    ch.pop::<u8>().unwrap();

    ch.close().unwrap();

    assert_eq!(ch.source().data(), b"bc");
}

#[test]
fn test_drop_closes_and_persists() {
    let (_temp, path) = setup_temp_file(b"line one\nline two\n");

    {
        let mut ch = DataChannel::open_path(&path).unwrap();
        ch.drop_line().unwrap();
    }

    assert_eq!(std::fs::read(&path).unwrap(), b"line two\n");
}

// =============================================================================
// Config
// =============================================================================

#[test]
fn test_config_defaults() {
    let config = ChannelConfig::default();

    assert_eq!(config.byte_order, ByteOrder::Native);
    assert_eq!(config.buffer_size, datachannel::config::DEFAULT_BUFFER_SIZE);
    assert_eq!(config.max_size, i64::MAX as u64);
    assert!(config.create);
    assert!(!config.truncate);
}

#[test]
fn test_config_validation() {
    assert!(matches!(
        ChannelConfig::builder().buffer_size(0).build(),
        Err(ChannelError::Config(_))
    ));
    assert!(matches!(
        ChannelConfig::builder().max_size(u64::MAX).build(),
        Err(ChannelError::Config(_))
    ));
}

#[test]
fn test_buffer_capacity_from_config() {
    let config = ChannelConfig::builder().buffer_size(64).build().unwrap();
    let ch = DataChannel::with_config(MemorySource::new(), config).unwrap();

    assert!(ch.buffer_capacity() >= 64);
    assert_eq!(ch.config().buffer_size, 64);
}
