//! Sector Store implementation
//!
//! Zero-initialized `Vec<u8>` region behind a `Guard`.

use bytes::Bytes;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::control::{ControlResponse, SectorControl};
use crate::error::{DeviceError, Result};
use crate::guard::Guard;
use crate::stats::{OpCounters, SectorStats};

use super::segments;

/// State mutated only under the store guard
struct SectorState {
    data: Vec<u8>,
    counters: OpCounters,
}

/// Fixed-capacity sector-addressed store
///
/// ## Concurrency:
/// - One guard per store, held for the whole request
/// - A multi-segment request acquires the guard once, so no concurrent
///   accessor observes it half-applied
/// - Counters advance once per request, never per segment
pub struct SectorStore {
    /// Bytes per sector (immutable)
    unit_size: u32,

    /// Addressable sectors (immutable)
    capacity_units: u64,

    state: Guard<SectorState>,
}

impl SectorStore {
    /// Create a zeroed store of `capacity_units` sectors of `unit_size` bytes
    pub fn new(unit_size: u32, capacity_units: u64) -> Result<Self> {
        if unit_size == 0 {
            return Err(DeviceError::InvalidArgument(
                "sector size must be positive".to_string(),
            ));
        }

        let len = capacity_units
            .checked_mul(unit_size as u64)
            .and_then(|n| usize::try_from(n).ok())
            .ok_or(DeviceError::OutOfMemory { requested: usize::MAX })?;

        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| DeviceError::OutOfMemory { requested: len })?;
        data.resize(len, 0);

        info!(
            "Sector store created: {} sectors x {} bytes ({} KB)",
            capacity_units,
            unit_size,
            len / 1024
        );

        Ok(Self {
            unit_size,
            capacity_units,
            state: Guard::new(SectorState {
                data,
                counters: OpCounters::default(),
            }),
        })
    }

    /// Create a store from the configured geometry
    ///
    /// Writes the geometry banner into sector 0 when `sector_banner` is set.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let store = Self::new(config.sector_size, config.sector_count)?;
        if config.sector_banner {
            store.write_banner();
        }
        Ok(store)
    }

    /// Read `count` sectors starting at `start`
    ///
    /// Returns exactly `count * unit_size` bytes.
    pub fn read_sectors(&self, start: u64, count: u64) -> Result<Bytes> {
        let len = self.byte_len(start, count)?;
        let mut buf = vec![0u8; len];
        self.read_segments(start, &mut [&mut buf[..]])?;
        Ok(Bytes::from(buf))
    }

    /// Overwrite the sectors starting at `start` with `bytes`
    ///
    /// `bytes.len()` must be a multiple of the sector size.
    pub fn write_sectors(&self, start: u64, bytes: &[u8]) -> Result<()> {
        self.write_segments(start, &[bytes])
    }

    /// Read a contiguous sector range into an ordered list of buffers
    ///
    /// The combined length of `segments` determines the sector count and must
    /// be a multiple of the sector size. Either every buffer is filled or
    /// none is touched.
    pub fn read_segments(&self, start: u64, segments: &mut [&mut [u8]]) -> Result<()> {
        let count = self.units_for(segments::total_len(&*segments))?;
        let segment_count = segments.len();

        self.state.with(|state| -> Result<()> {
            let range = self.checked_range(start, count)?;
            segments::scatter(&state.data[range], &mut *segments);
            state.counters.record_read();
            Ok(())
        })?;

        debug!(
            "Read {} sectors from sector {} ({} segments)",
            count,
            start,
            segment_count
        );
        Ok(())
    }

    /// Write an ordered list of buffers to a contiguous sector range
    ///
    /// Same sizing rules as `read_segments`. The whole list is applied under
    /// one guard acquisition.
    pub fn write_segments(&self, start: u64, segments: &[&[u8]]) -> Result<()> {
        let count = self.units_for(segments::total_len(segments))?;
        let segment_count = segments.len();

        self.state.with(|state| -> Result<()> {
            let range = self.checked_range(start, count)?;
            segments::gather(segments, &mut state.data[range]);
            state.counters.record_write();
            Ok(())
        })?;

        debug!(
            "Wrote {} sectors to sector {} ({} segments)",
            count,
            start,
            segment_count
        );
        Ok(())
    }

    /// Fill `count` sectors starting at `start` with `byte`
    pub fn fill_sectors(&self, start: u64, count: u64, byte: u8) -> Result<()> {
        self.state.with(|state| -> Result<()> {
            let range = self.checked_range(start, count)?;
            state.data[range].fill(byte);
            state.counters.record_write();
            Ok(())
        })?;

        debug!("Filled {} sectors from sector {} with 0x{:02x}", count, start, byte);
        Ok(())
    }

    /// Zero `count` sectors starting at `start`
    pub fn zero_sectors(&self, start: u64, count: u64) -> Result<()> {
        self.fill_sectors(start, count, 0)
    }

    /// CRC32 of `count` sectors starting at `start`
    pub fn checksum(&self, start: u64, count: u64) -> Result<u32> {
        self.state.with(|state| -> Result<u32> {
            let range = self.checked_range(start, count)?;
            let crc = crc32fast::hash(&state.data[range]);
            state.counters.record_read();
            Ok(crc)
        })
    }

    /// Snapshot of counters and geometry
    pub fn stats(&self) -> SectorStats {
        let counters = self.state.with(|state| state.counters);
        SectorStats {
            read_count: counters.reads(),
            write_count: counters.writes(),
            unit_size: self.unit_size,
            capacity_units: self.capacity_units,
        }
    }

    /// Number of addressable sectors
    pub fn capacity_units(&self) -> u64 {
        self.capacity_units
    }

    /// Bytes per sector
    pub fn unit_size(&self) -> u32 {
        self.unit_size
    }

    /// Total size in bytes
    pub fn capacity_bytes(&self) -> u64 {
        self.capacity_units * self.unit_size as u64
    }

    /// Execute a control command
    pub fn control(&self, command: SectorControl) -> ControlResponse {
        match command {
            SectorControl::GetSectorCount => ControlResponse::SectorCount(self.capacity_units),
            SectorControl::GetSizeBytes => ControlResponse::SizeBytes(self.capacity_bytes()),
        }
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Sector count covered by `len` bytes; rejects partial sectors
    fn units_for(&self, len: usize) -> Result<u64> {
        let unit = self.unit_size as usize;
        if len % unit != 0 {
            warn!("Rejected transfer of {} bytes: not a multiple of {}", len, unit);
            return Err(DeviceError::InvalidArgument(format!(
                "transfer length {} is not a multiple of sector size {}",
                len, unit
            )));
        }
        Ok((len / unit) as u64)
    }

    /// Byte length of `count` sectors, after the bound check
    fn byte_len(&self, start: u64, count: u64) -> Result<usize> {
        let range = self.checked_range(start, count)?;
        Ok(range.len())
    }

    /// Byte range of `[start, start + count)`, or `OutOfRange`
    fn checked_range(&self, start: u64, count: u64) -> Result<std::ops::Range<usize>> {
        let in_bounds = start
            .checked_add(count)
            .map(|end| end <= self.capacity_units)
            .unwrap_or(false);

        if !in_bounds {
            warn!(
                "Request beyond device limits: sector {} + {} > {}",
                start, count, self.capacity_units
            );
            return Err(DeviceError::OutOfRange {
                start,
                count,
                capacity: self.capacity_units,
            });
        }

        // In bounds, so both products fit the allocated region
        let unit = self.unit_size as usize;
        let begin = start as usize * unit;
        Ok(begin..begin + count as usize * unit)
    }

    fn write_banner(&self) {
        let banner = format!(
            "=== memdev sector store ===\n\
             Total sectors: {}\n\
             Total size: {} KB\n\
             Use this device for block I/O operations\n",
            self.capacity_units,
            self.capacity_bytes() / 1024
        );

        self.state.with(|state| {
            let len = banner.len().min(self.unit_size as usize).min(state.data.len());
            state.data[..len].copy_from_slice(&banner.as_bytes()[..len]);
        });
    }
}
