//! Tests for peek operations
//!
//! These tests verify:
//! - Forward and backward fixed-width reads in both byte orders
//! - Exhaustion: errors for plain reads, `None` for `*_or_none`
//! - Failed multi-byte reads leaving the cursor untouched
//! - Index-addressed, range and whole-channel reads

use datachannel::prelude::*;
use datachannel::ChannelError;

// =============================================================================
// Helper Functions
// =============================================================================

fn channel(content: &[u8]) -> DataChannel<MemorySource> {
    DataChannel::from_bytes(content).unwrap()
}

fn channel_with_order(content: &[u8], order: ByteOrder) -> DataChannel<MemorySource> {
    let config = ChannelConfig::builder().byte_order(order).build().unwrap();
    DataChannel::with_config(MemorySource::from_bytes(content), config).unwrap()
}

// =============================================================================
// Empty Channel
// =============================================================================

#[test]
fn test_empty_channel() {
    let mut ch = channel(b"");

    assert!(ch.is_empty());
    assert!(!ch.is_not_empty());
    assert_eq!(ch.first_index(), 0);
    assert_eq!(ch.last_index(), -1);
    assert!(matches!(ch.peek::<u8>(), Err(ChannelError::Empty(_))));
    assert_eq!(ch.peek_or_none::<u8>().unwrap(), None);
    assert_eq!(ch.peek_last_or_none::<u8>().unwrap(), None);
    assert!(matches!(ch.peek_all(), Err(ChannelError::Empty(_))));
    assert_eq!(ch.peek_all_or_none().unwrap(), None);
}

// =============================================================================
// Fixed-Width Values
// =============================================================================

#[test]
fn test_peek_advances_by_width() {
    let mut ch = channel_with_order(&[0, 1, 0, 0, 0, 2, 7], ByteOrder::BigEndian);

    assert_eq!(ch.peek::<u16>().unwrap(), 1);
    assert_eq!(ch.peek::<i32>().unwrap(), 2);
    assert_eq!(ch.peek::<u8>().unwrap(), 7);
    assert_eq!(ch.start_cursor().index(), 7);
    assert_eq!(ch.size(), 7);
}

#[test]
fn test_peek_respects_byte_order() {
    let bytes = [1, 0, 0, 0];

    let mut little = channel_with_order(&bytes, ByteOrder::LittleEndian);
    let mut big = channel_with_order(&bytes, ByteOrder::BigEndian);

    assert_eq!(little.peek::<u32>().unwrap(), 1);
    assert_eq!(big.peek::<u32>().unwrap(), 1 << 24);
}

#[test]
fn test_set_order_changes_decoding() {
    let mut ch = channel_with_order(&[0, 1, 0, 1], ByteOrder::BigEndian);

    assert_eq!(ch.peek::<u16>().unwrap(), 1);
    ch.set_order(ByteOrder::LittleEndian);
    assert_eq!(ch.order(), ByteOrder::LittleEndian);
    assert_eq!(ch.peek::<u16>().unwrap(), 256);
}

#[test]
fn test_peek_every_type() {
    let mut ch = channel(b"");
    ch.set_order(ByteOrder::BigEndian);
    ch.push_last_value(-3i8).unwrap();
    ch.push_last_value(true).unwrap();
    ch.push_last_value(-300i16).unwrap();
    ch.push_last_value('Z').unwrap();
    ch.push_last_value(70_000i32).unwrap();
    ch.push_last_value(1.25f32).unwrap();
    ch.push_last_value(-5_000_000_000i64).unwrap();
    ch.push_last_value(2.5f64).unwrap();

    assert_eq!(ch.peek::<i8>().unwrap(), -3);
    assert!(ch.peek::<bool>().unwrap());
    assert_eq!(ch.peek::<i16>().unwrap(), -300);
    assert_eq!(ch.peek::<char>().unwrap(), 'Z');
    assert_eq!(ch.peek::<i32>().unwrap(), 70_000);
    assert_eq!(ch.peek::<f32>().unwrap(), 1.25);
    assert_eq!(ch.peek::<i64>().unwrap(), -5_000_000_000);
    assert_eq!(ch.peek::<f64>().unwrap(), 2.5);
    assert_eq!(ch.peek_or_none::<u8>().unwrap(), None);
}

#[test]
fn test_peek_last_reads_value_ending_at_cursor() {
    let mut ch = channel_with_order(&[9, 0, 0, 0, 5], ByteOrder::BigEndian);

    assert_eq!(ch.peek_last::<u32>().unwrap(), 5);
    assert_eq!(ch.end_cursor().index(), 0);
    assert_eq!(ch.peek_last::<u8>().unwrap(), 9);
    assert_eq!(ch.peek_last_or_none::<u8>().unwrap(), None);
}

#[test]
fn test_forward_and_backward_are_symmetric() {
    let mut ch = channel_with_order(&[1, 2, 3, 4, 5, 6, 7, 8], ByteOrder::BigEndian);

    let forward = ch.peek::<u64>().unwrap();
    let backward = ch.peek_last::<u64>().unwrap();

    assert_eq!(forward, backward);
}

// =============================================================================
// Underflow
// =============================================================================

#[test]
fn test_underflow_does_not_move_cursor() {
    let mut ch = channel(&[1, 2, 3]);

    let err = ch.peek::<u32>().unwrap_err();
    assert!(matches!(err, ChannelError::Underflow { needed: 4, remaining: 3 }));
    assert_eq!(ch.start_cursor().index(), 0);

    assert_eq!(ch.peek_or_none::<u64>().unwrap(), None);
    assert_eq!(ch.start_cursor().index(), 0);
    assert_eq!(ch.peek_bytes(3).unwrap(), vec![1, 2, 3]);
}

#[test]
fn test_backward_underflow_does_not_move_cursor() {
    let mut ch = channel(&[1, 2]);

    assert!(matches!(ch.peek_last::<i32>(), Err(ChannelError::Underflow { .. })));
    assert_eq!(ch.end_cursor().index(), 1);
}

#[test]
fn test_or_none_keeps_other_errors() {
    let mut ch = channel(b"abc");
    ch.start_cursor().move_to(-1);

    assert!(matches!(
        ch.peek_or_none::<u8>(),
        Err(ChannelError::IndexOutOfBounds(_))
    ));
}

// =============================================================================
// Bytes and Strings
// =============================================================================

#[test]
fn test_peek_bytes_and_strings() {
    let mut ch = channel("héllo world".as_bytes());

    assert_eq!(ch.peek_string(6, Charset::Utf8).unwrap(), "héllo");
    assert_eq!(ch.peek_bytes(1).unwrap(), b" ");
    assert_eq!(ch.peek_last_string(5, Charset::Utf8).unwrap(), "world");
    assert_eq!(ch.peek_bytes_or_none(10).unwrap(), None);
    assert_eq!(ch.peek_bytes(0).unwrap(), Vec::<u8>::new());
}

// =============================================================================
// Index-Addressed
// =============================================================================

#[test]
fn test_peek_at_does_not_move_cursors() {
    let mut ch = channel(b"abc");

    assert_eq!(ch.peek_at(1).unwrap(), b'b');
    assert_eq!(ch.start_cursor().index(), 0);
    assert_eq!(ch.end_cursor().index(), 2);
}

#[test]
fn test_peek_at_bounds() {
    let mut ch = channel(b"abc");

    assert!(matches!(ch.peek_at(3), Err(ChannelError::Empty(_))));
    assert!(matches!(ch.peek_at(4), Err(ChannelError::IndexOutOfBounds(_))));
    assert_eq!(ch.peek_at_or_none(3).unwrap(), None);
    assert!(ch.peek_at_or_none(4).is_err());
}

#[test]
fn test_peek_value_at() {
    let mut ch = channel_with_order(&[0xff, 0x00, 0x10], ByteOrder::BigEndian);

    assert_eq!(ch.peek_value_at::<u16>(1).unwrap(), 0x10);
    assert!(matches!(
        ch.peek_value_at::<u16>(2),
        Err(ChannelError::Underflow { .. })
    ));
}

// =============================================================================
// Ranges and Whole Channel
// =============================================================================

#[test]
fn test_peek_range() {
    let mut ch = channel(b"0123456789");

    assert_eq!(ch.peek_range(2, 5).unwrap(), b"234");
    assert_eq!(ch.peek_range(4, 4).unwrap(), b"");
    assert_eq!(ch.peek_range_string(8, 10, Charset::Ascii).unwrap(), "89");
}

#[test]
fn test_peek_range_errors() {
    let mut ch = channel(b"0123");

    assert!(matches!(ch.peek_range(3, 1), Err(ChannelError::IllegalArgument(_))));
    assert!(matches!(ch.peek_range(0, 5), Err(ChannelError::IndexOutOfBounds(_))));
}

#[test]
fn test_peek_all_keeps_terminators() {
    let content = "ONE_LINE\nTWO_LINE\r\n";
    let mut ch = channel(content.as_bytes());

    assert_eq!(ch.peek_all_string(Charset::Utf8).unwrap(), content);
    assert_eq!(ch.start_cursor().index(), 0);
}

#[test]
fn test_checksum_matches_crc32() {
    let data: Vec<u8> = (0..20_000u32).map(|i| (i % 251) as u8).collect();
    let mut ch = channel(&data);

    assert_eq!(ch.checksum().unwrap(), crc32fast::hash(&data));
}
