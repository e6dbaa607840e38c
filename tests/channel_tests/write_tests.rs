//! Tests for write operations
//!
//! These tests verify:
//! - push / push_last / push_to insertion points and cursor placement
//! - push followed by pop as a round trip without cursor drift
//! - Inserts after drops (compaction first)
//! - Overflow against the configured maximum size
//! - replace / set and resizing

use datachannel::prelude::*;
use datachannel::ChannelError;

// =============================================================================
// Helper Functions
// =============================================================================

fn channel(content: &[u8]) -> DataChannel<MemorySource> {
    DataChannel::from_bytes(content).unwrap()
}

fn small_buffer_channel(content: &[u8]) -> DataChannel<MemorySource> {
    let config = ChannelConfig::builder().buffer_size(3).build().unwrap();
    DataChannel::with_config(MemorySource::from_bytes(content), config).unwrap()
}

// =============================================================================
// Push
// =============================================================================

#[test]
fn test_push_at_start_cursor() {
    let mut ch = channel(b"world");

    ch.push(b"hello ").unwrap();

    assert_eq!(ch.peek_all().unwrap(), b"hello world");
    assert_eq!(ch.start_cursor().index(), 0);
    assert_eq!(ch.source().data(), b"hello world");
}

#[test]
fn test_push_then_pop_round_trip() {
    let mut ch = channel(b"tail");
    ch.start_cursor().move_to(2);

    for payload in [&b"x"[..], b"payload", b"\r\n\0\xff"] {
        ch.push(payload).unwrap();
        assert_eq!(ch.pop_bytes(payload.len()).unwrap(), payload);
        assert_eq!(ch.start_cursor().index(), 2);
    }
    assert_eq!(ch.peek_all().unwrap(), b"tail");
}

#[test]
fn test_push_last_after_end_cursor() {
    let mut ch = channel(b"head");

    ch.push_last(b"er").unwrap();

    assert_eq!(ch.peek_all().unwrap(), b"header");
    assert_eq!(ch.end_cursor().index(), 5);
    assert_eq!(ch.pop_last_bytes(2).unwrap(), b"er");
    assert_eq!(ch.end_cursor().index(), 3);
}

#[test]
fn test_push_last_into_empty_channel() {
    let mut ch = channel(b"");

    ch.push_last(b"abc").unwrap();
    ch.push_last(b"def").unwrap();

    assert_eq!(ch.peek_all().unwrap(), b"abcdef");
    assert_eq!(ch.start_cursor().index(), 0);
}

#[test]
fn test_push_values_in_order() {
    let config = ChannelConfig::builder()
        .byte_order(ByteOrder::BigEndian)
        .build()
        .unwrap();
    let mut ch = DataChannel::with_config(MemorySource::new(), config).unwrap();

    ch.push_last_value(0x0102u16).unwrap();
    ch.push_last_value(0x03040506u32).unwrap();

    assert_eq!(ch.peek_all().unwrap(), vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(ch.pop::<u16>().unwrap(), 0x0102);
    assert_eq!(ch.pop_last::<u32>().unwrap(), 0x03040506);
}

#[test]
fn test_push_value_then_pop_value() {
    let mut ch = channel(b"");

    ch.push_value(-42i64).unwrap();
    ch.push_value(3.5f32).unwrap();

    assert_eq!(ch.pop::<f32>().unwrap(), 3.5);
    assert_eq!(ch.pop::<i64>().unwrap(), -42);
}

#[test]
fn test_push_to_index() {
    let mut ch = channel(b"ac");

    ch.push_to(1, b"b").unwrap();
    ch.push_to(3, b"d").unwrap();
    ch.push_value_to(0, b'>').unwrap();
    ch.push_str_to(5, "\u{e9}", Charset::Utf8).unwrap();

    assert_eq!(ch.peek_all_string(Charset::Utf8).unwrap(), ">abcd\u{e9}");
    assert!(matches!(
        ch.push_to(100, b"x"),
        Err(ChannelError::IndexOutOfBounds(_))
    ));
}

#[test]
fn test_push_str_variants() {
    let mut ch = channel(b"-");

    ch.push_str("ab", Charset::Ascii).unwrap();
    ch.push_last_str("yz", Charset::Ascii).unwrap();

    assert_eq!(ch.peek_all().unwrap(), b"ab-yz");
}

#[test]
fn test_push_after_peek_inserts_at_cursor() {
    let mut ch = channel(b"abef");
    ch.peek_bytes(2).unwrap();

    ch.push(b"cd").unwrap();

    assert_eq!(ch.peek_all().unwrap(), b"abcdef");
    assert_eq!(ch.peek_bytes(2).unwrap(), b"cd");
}

#[test]
fn test_push_with_invalid_cursor() {
    let mut ch = channel(b"abc");
    ch.start_cursor().move_to(10);

    assert!(matches!(ch.push(b"x"), Err(ChannelError::IndexOutOfBounds(_))));
}

// =============================================================================
// Inserts After Drops
// =============================================================================

#[test]
fn test_insert_compacts_pending_drops() {
    let mut ch = channel(b"0123456789");
    ch.drop_range(2, 4).unwrap();
    ch.drop_at(0).unwrap();

    ch.push_to(3, b"--").unwrap();

    assert_eq!(ch.forgotten_count(), 0);
    assert_eq!(ch.peek_all().unwrap(), b"145--6789");
    assert_eq!(ch.source().data(), b"145--6789");
}

#[test]
fn test_large_insert_with_small_chunks() {
    let original: Vec<u8> = (0..50u8).collect();
    let mut ch = small_buffer_channel(&original);
    ch.drop_range(10, 20).unwrap();

    let inserted = vec![0xaa; 7];
    ch.push_to(5, &inserted).unwrap();

    let mut expected: Vec<u8> = (0..10u8).chain(20..50u8).collect();
    expected.splice(5..5, inserted);
    assert_eq!(ch.peek_all().unwrap(), expected);
}

// =============================================================================
// Overflow
// =============================================================================

#[test]
fn test_push_past_max_size_overflows() {
    let config = ChannelConfig::builder().max_size(4).build().unwrap();
    let mut ch = DataChannel::with_config(MemorySource::from_bytes(b"abc"), config).unwrap();

    ch.push_last(b"d").unwrap();
    let err = ch.push_last(b"e").unwrap_err();

    assert!(matches!(err, ChannelError::Overflow { requested: 5, limit: 4 }));
    assert_eq!(ch.size(), 4);
    assert!(matches!(ch.set_len(5), Err(ChannelError::Overflow { .. })));
}

// =============================================================================
// Replace / Resize
// =============================================================================

#[test]
fn test_replace_and_set() {
    let mut ch = channel(b"cat");

    ch.replace(0, b'b').unwrap();
    ch.set(2, b'r').unwrap();

    assert_eq!(ch.peek_all().unwrap(), b"bar");
    assert!(matches!(ch.replace(3, b'x'), Err(ChannelError::IndexOutOfBounds(_))));
}

#[test]
fn test_replace_at_max_index_is_out_of_bounds() {
    let mut ch = channel(b"abc");

    assert!(matches!(ch.replace(u64::MAX, 0), Err(ChannelError::IndexOutOfBounds(_))));
    assert!(matches!(
        ch.replace_value(u64::MAX - 2, 7u32),
        Err(ChannelError::IndexOutOfBounds(_))
    ));
    assert!(matches!(ch.push_to(u64::MAX, b"x"), Err(ChannelError::IndexOutOfBounds(_))));
    assert_eq!(ch.peek_all().unwrap(), b"abc");
}

#[test]
fn test_replace_skips_dropped_bytes() {
    let mut ch = channel(b"a_b_c");
    ch.drop_at(1).unwrap();
    ch.drop_at(2).unwrap();

    ch.replace(1, b'B').unwrap();

    assert_eq!(ch.peek_all().unwrap(), b"aBc");
    ch.flush().unwrap();
    assert_eq!(ch.source().data(), b"aBc");
}

#[test]
fn test_replace_across_forgotten_run() {
    let mut ch = channel(b"ab__cd");
    ch.drop_range(2, 4).unwrap();

    ch.set_order(ByteOrder::BigEndian);
    ch.replace_value(1, 0x5859u16).unwrap();

    assert_eq!(ch.peek_all().unwrap(), b"aXYd");
}

#[test]
fn test_set_len_shrinks_and_grows() {
    let mut ch = channel(b"abcdef");
    ch.peek_last::<u8>().unwrap();

    ch.set_len(3).unwrap();
    assert_eq!(ch.peek_all().unwrap(), b"abc");
    assert_eq!(ch.end_cursor().index(), 2);

    ch.set_len(5).unwrap();
    assert_eq!(ch.peek_all().unwrap(), b"abc\0\0");
    assert_eq!(ch.source().data(), b"abc\0\0");
}

#[test]
fn test_set_len_after_drops() {
    let mut ch = channel(b"abcdef");
    ch.drop_at(0).unwrap();

    ch.set_len(2).unwrap();

    assert_eq!(ch.peek_all().unwrap(), b"bc");
    assert_eq!(ch.real_len(), 2);
}
