//! Sector Store Tests
//!
//! Tests verify:
//! - Round-trip of sector writes and reads
//! - Bound checks on every request shape
//! - Multi-segment transfers
//! - Counter granularity (once per request)
//! - Fill, zero and checksum helpers

use memdev::{Config, DeviceError, SectorStore};

// =============================================================================
// Helper Functions
// =============================================================================

fn small_store() -> SectorStore {
    SectorStore::new(512, 1024).unwrap()
}

// =============================================================================
// Basic Operations Tests
// =============================================================================

#[test]
fn test_new_store_is_zeroed() {
    let store = SectorStore::new(64, 8).unwrap();
    let bytes = store.read_sectors(0, 8).unwrap();
    assert_eq!(bytes.len(), 8 * 64);
    assert!(bytes.iter().all(|&b| b == 0));
}

#[test]
fn test_geometry_accessors() {
    let store = small_store();
    assert_eq!(store.capacity_units(), 1024);
    assert_eq!(store.unit_size(), 512);
    assert_eq!(store.capacity_bytes(), 512 * 1024);
}

#[test]
fn test_write_then_read_round_trip() {
    let store = small_store();
    let data: Vec<u8> = (0..512 * 3).map(|i| (i % 256) as u8).collect();

    store.write_sectors(10, &data).unwrap();
    let back = store.read_sectors(10, 3).unwrap();

    assert_eq!(&back[..], &data[..]);
}

#[test]
fn test_write_does_not_touch_neighbours() {
    let store = small_store();
    store.write_sectors(5, &[0xFF; 512]).unwrap();

    assert!(store.read_sectors(4, 1).unwrap().iter().all(|&b| b == 0));
    assert!(store.read_sectors(6, 1).unwrap().iter().all(|&b| b == 0));
}

#[test]
fn test_last_sector_write_succeeds() {
    let store = small_store();
    store.write_sectors(1023, &[0xAA; 512]).unwrap();
    let back = store.read_sectors(1023, 1).unwrap();
    assert!(back.iter().all(|&b| b == 0xAA));
}

// =============================================================================
// Bound Check Tests
// =============================================================================

#[test]
fn test_write_past_end_is_out_of_range() {
    let store = small_store();
    let err = store.write_sectors(1023, &[0xAA; 1024]).unwrap_err();
    assert!(matches!(
        err,
        DeviceError::OutOfRange { start: 1023, count: 2, capacity: 1024 }
    ));
}

#[test]
fn test_rejected_write_leaves_data_unchanged() {
    let store = small_store();
    store.write_sectors(1023, &[0x11; 512]).unwrap();
    let _ = store.write_sectors(1023, &[0x22; 1024]);
    assert!(store.read_sectors(1023, 1).unwrap().iter().all(|&b| b == 0x11));
}

#[test]
fn test_read_past_end_is_out_of_range() {
    for capacity in [1u64, 7, 64, 1024] {
        let store = SectorStore::new(16, capacity).unwrap();
        assert!(matches!(
            store.read_sectors(capacity, 1),
            Err(DeviceError::OutOfRange { .. })
        ));
        assert!(matches!(
            store.read_sectors(0, capacity + 1),
            Err(DeviceError::OutOfRange { .. })
        ));
    }
}

#[test]
fn test_overflowing_range_is_out_of_range() {
    let store = small_store();
    assert!(matches!(
        store.read_sectors(u64::MAX, 2),
        Err(DeviceError::OutOfRange { .. })
    ));
}

#[test]
fn test_partial_sector_write_is_invalid() {
    let store = small_store();
    let err = store.write_sectors(0, &[1u8; 100]).unwrap_err();
    assert!(matches!(err, DeviceError::InvalidArgument(_)));
    assert_eq!(store.stats().write_count, 0);
}

// =============================================================================
// Zero-Length Requests
// =============================================================================

#[test]
fn test_zero_count_requests_succeed_and_count() {
    let store = small_store();

    let bytes = store.read_sectors(0, 0).unwrap();
    assert!(bytes.is_empty());
    store.write_sectors(1024, &[]).unwrap();

    let stats = store.stats();
    assert_eq!(stats.read_count, 1);
    assert_eq!(stats.write_count, 1);
}

// =============================================================================
// Scatter/Gather Tests
// =============================================================================

#[test]
fn test_multi_segment_write_is_contiguous() {
    let store = SectorStore::new(4, 8).unwrap();

    store
        .write_segments(2, &[&[1, 2], &[3, 4, 5, 6, 7, 8], &[]])
        .unwrap();

    assert_eq!(&store.read_sectors(2, 2).unwrap()[..], &[1, 2, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn test_multi_segment_read_fills_in_order() {
    let store = SectorStore::new(4, 8).unwrap();
    store.write_sectors(0, &[9, 9, 9, 9, 1, 2, 3, 4]).unwrap();

    let mut head = [0u8; 3];
    let mut tail = [0u8; 5];
    store.read_segments(0, &mut [&mut head[..], &mut tail[..]]).unwrap();

    assert_eq!(head, [9, 9, 9]);
    assert_eq!(tail, [9, 1, 2, 3, 4]);
}

#[test]
fn test_multi_segment_counts_once() {
    let store = SectorStore::new(4, 8).unwrap();
    store.write_segments(0, &[&[0; 4], &[0; 4], &[0; 4]]).unwrap();

    let mut a = [0u8; 4];
    let mut b = [0u8; 4];
    store.read_segments(0, &mut [&mut a[..], &mut b[..]]).unwrap();

    let stats = store.stats();
    assert_eq!(stats.write_count, 1);
    assert_eq!(stats.read_count, 1);
}

#[test]
fn test_multi_segment_out_of_range_copies_nothing() {
    let store = SectorStore::new(4, 2).unwrap();
    let err = store.write_segments(1, &[&[7; 4], &[7; 4]]).unwrap_err();
    assert!(matches!(err, DeviceError::OutOfRange { .. }));
    assert!(store.read_sectors(0, 2).unwrap().iter().all(|&b| b == 0));
}

// =============================================================================
// Fill / Checksum Tests
// =============================================================================

#[test]
fn test_fill_and_zero_sectors() {
    let store = small_store();
    store.fill_sectors(100, 4, b'#').unwrap();
    assert!(store.read_sectors(100, 4).unwrap().iter().all(|&b| b == b'#'));

    store.zero_sectors(101, 2).unwrap();
    assert!(store.read_sectors(101, 2).unwrap().iter().all(|&b| b == 0));
    assert!(store.read_sectors(103, 1).unwrap().iter().all(|&b| b == b'#'));
}

#[test]
fn test_fill_past_end_is_out_of_range() {
    let store = small_store();
    assert!(matches!(
        store.fill_sectors(1020, 5, 1),
        Err(DeviceError::OutOfRange { .. })
    ));
}

#[test]
fn test_checksum_matches_written_data() {
    let store = small_store();
    let data = vec![0x3Cu8; 512 * 2];
    store.write_sectors(7, &data).unwrap();

    assert_eq!(store.checksum(7, 2).unwrap(), crc32fast::hash(&data));
}

#[test]
fn test_checksum_counts_as_read() {
    let store = small_store();
    store.checksum(0, 1).unwrap();
    assert_eq!(store.stats().read_count, 1);
}

// =============================================================================
// Configuration Tests
// =============================================================================

#[test]
fn test_banner_written_to_first_sector() {
    let config = Config::builder()
        .sector_count(16)
        .sector_banner(true)
        .build()
        .unwrap();
    let store = SectorStore::from_config(&config).unwrap();

    let first = store.read_sectors(0, 1).unwrap();
    let text = String::from_utf8_lossy(&first);
    assert!(text.starts_with("=== memdev sector store ==="));
    assert!(text.contains("Total sectors: 16"));
    assert!(store.read_sectors(1, 1).unwrap().iter().all(|&b| b == 0));
}

#[test]
fn test_zero_unit_size_rejected() {
    assert!(matches!(
        SectorStore::new(0, 8),
        Err(DeviceError::InvalidArgument(_))
    ));
}
