//! Concurrency Tests
//!
//! Tests verify:
//! - Disjoint concurrent sector writers never contaminate each other
//! - Multi-segment writes are never observed half-applied
//! - Concurrent stream appends through the shared cursor lose no bytes
//! - Counters stay exact under contention

use memdev::{SectorStore, StreamStore, Whence};

const WRITERS: u64 = 16;

// =============================================================================
// Sector Store
// =============================================================================

#[test]
fn test_concurrent_disjoint_sector_writers() {
    let store = SectorStore::new(512, 1024).unwrap();
    let span = 1024 / WRITERS;

    crossbeam::thread::scope(|s| {
        for i in 0..WRITERS {
            let store = &store;
            s.spawn(move |_| {
                let data = vec![i as u8 + 1; 512 * span as usize];
                store.write_sectors(i * span, &data).unwrap();
            });
        }
    })
    .unwrap();

    for i in 0..WRITERS {
        let back = store.read_sectors(i * span, span).unwrap();
        assert!(
            back.iter().all(|&b| b == i as u8 + 1),
            "range of writer {} was contaminated",
            i
        );
    }
    assert_eq!(store.stats().write_count, WRITERS);
}

#[test]
fn test_multi_segment_write_is_atomic() {
    let store = SectorStore::new(64, 4).unwrap();

    crossbeam::thread::scope(|s| {
        let writer_store = &store;
        s.spawn(move |_| {
            for round in 0..500u32 {
                let byte = (round % 200) as u8 + 1;
                let half = vec![byte; 128];
                writer_store.write_segments(0, &[&half[..], &half[..]]).unwrap();
            }
        });

        let reader_store = &store;
        s.spawn(move |_| {
            for _ in 0..500 {
                let bytes = reader_store.read_sectors(0, 4).unwrap();
                let first = bytes[0];
                assert!(
                    bytes.iter().all(|&b| b == first),
                    "observed a partially applied request"
                );
            }
        });
    })
    .unwrap();
}

#[test]
fn test_sector_counters_exact_under_contention() {
    let store = SectorStore::new(16, 64).unwrap();

    crossbeam::thread::scope(|s| {
        for i in 0..8u64 {
            let store = &store;
            s.spawn(move |_| {
                for _ in 0..100 {
                    store.write_sectors(i, &[1u8; 16]).unwrap();
                    store.read_sectors(i, 1).unwrap();
                }
            });
        }
    })
    .unwrap();

    let stats = store.stats();
    assert_eq!(stats.write_count, 800);
    assert_eq!(stats.read_count, 800);
}

// =============================================================================
// Stream Store
// =============================================================================

#[test]
fn test_concurrent_cursor_appends_lose_nothing() {
    let store = StreamStore::new(16, 65536).unwrap();

    crossbeam::thread::scope(|s| {
        for i in 0..8u8 {
            let store = &store;
            s.spawn(move |_| {
                for _ in 0..50 {
                    store.write_next(&[b'a' + i; 4]).unwrap();
                }
            });
        }
    })
    .unwrap();

    let stats = store.get_stats();
    assert_eq!(stats.used, 8 * 50 * 4);
    assert_eq!(stats.write_count, 400);

    // Each 4-byte record is written whole
    let bytes = store.read(0, stats.used as usize);
    for chunk in bytes.chunks(4) {
        assert!(chunk.iter().all(|&b| b == chunk[0]));
    }
}

#[test]
fn test_concurrent_offset_writes_during_growth() {
    let store = StreamStore::new(8, 65536).unwrap();

    crossbeam::thread::scope(|s| {
        for i in 0..8u64 {
            let store = &store;
            s.spawn(move |_| {
                let data = vec![i as u8 + 1; 100];
                store.write(i * 100, &data).unwrap();
            });
        }
    })
    .unwrap();

    for i in 0..8u64 {
        let back = store.read(i * 100, 100);
        assert!(back.iter().all(|&b| b == i as u8 + 1));
    }
    assert_eq!(store.seek(0, Whence::FromEnd).unwrap(), 800);
}
