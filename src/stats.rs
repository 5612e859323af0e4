//! Stats Recorder
//!
//! Per-store operation counters and usage snapshots.
//!
//! Counters carry no lock of their own: they live inside the store state and
//! are updated under the owning store's guard, alongside the operation they
//! describe.

use serde::{Deserialize, Serialize};

/// Monotonic read/write counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpCounters {
    reads: u64,
    writes: u64,
}

impl OpCounters {
    /// Count one read request
    pub fn record_read(&mut self) {
        self.reads = self.reads.wrapping_add(1);
    }

    /// Count one write request
    pub fn record_write(&mut self) {
        self.writes = self.writes.wrapping_add(1);
    }

    pub fn reads(&self) -> u64 {
        self.reads
    }

    pub fn writes(&self) -> u64 {
        self.writes
    }
}

/// Snapshot returned by `StreamStore::get_stats`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamStats {
    pub read_count: u64,
    pub write_count: u64,
    /// Bytes up to the high-water mark
    pub used: u64,
    /// Allocated buffer length
    pub capacity: u64,
}

impl StreamStats {
    /// Allocated bytes past the high-water mark
    pub fn free(&self) -> u64 {
        self.capacity - self.used
    }
}

/// Snapshot returned by `SectorStore::stats`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorStats {
    pub read_count: u64,
    pub write_count: u64,
    pub unit_size: u32,
    pub capacity_units: u64,
}
