//! Growable stream buffer
//!
//! Owns the bytes and the high-water mark. Growth and explicit resize both
//! allocate a fresh zeroed buffer, copy the preserved prefix and swap it in,
//! so bytes past the old capacity are always zero before anyone can read them.

use crate::error::{DeviceError, Result};

/// Backing bytes plus the end-of-data marker
///
/// Invariant: `high_water_mark <= data.len()`
pub(super) struct StreamBuffer {
    data: Vec<u8>,
    high_water_mark: usize,
}

impl StreamBuffer {
    /// Allocate a zeroed buffer of `capacity` bytes
    pub(super) fn with_capacity(capacity: usize) -> Result<Self> {
        Ok(Self {
            data: zeroed(capacity)?,
            high_water_mark: 0,
        })
    }

    pub(super) fn capacity(&self) -> usize {
        self.data.len()
    }

    pub(super) fn high_water_mark(&self) -> usize {
        self.high_water_mark
    }

    /// Bytes between `offset` and the high-water mark, at most `max_len`
    ///
    /// Empty at or past the high-water mark.
    pub(super) fn read_at(&self, offset: u64, max_len: usize) -> &[u8] {
        let start = match usize::try_from(offset) {
            Ok(start) if start < self.high_water_mark => start,
            _ => return &[],
        };
        let len = max_len.min(self.high_water_mark - start);
        &self.data[start..start + len]
    }

    /// Copy `bytes` into `[offset, offset + len)`, growing first if needed
    ///
    /// Returns the new capacity when the buffer grew. On error nothing changes.
    pub(super) fn write_at(&mut self, offset: u64, bytes: &[u8]) -> Result<Option<usize>> {
        let start = usize::try_from(offset)
            .map_err(|_| DeviceError::OutOfMemory { requested: usize::MAX })?;
        let end = start
            .checked_add(bytes.len())
            .ok_or(DeviceError::OutOfMemory { requested: usize::MAX })?;

        let grown = if end > self.capacity() {
            let target = self.capacity().saturating_mul(2).max(end);
            self.reallocate(target)?;
            Some(target)
        } else {
            None
        };

        self.data[start..end].copy_from_slice(bytes);
        self.high_water_mark = self.high_water_mark.max(end);
        Ok(grown)
    }

    /// Reallocate to exactly `new_size` bytes, clamping the high-water mark
    pub(super) fn resize(&mut self, new_size: usize) -> Result<()> {
        if new_size != self.capacity() {
            self.reallocate(new_size)?;
        }
        self.high_water_mark = self.high_water_mark.min(new_size);
        Ok(())
    }

    /// Zero all bytes and forget the written extent; capacity is kept
    pub(super) fn reset(&mut self) {
        self.data.fill(0);
        self.high_water_mark = 0;
    }

    /// Replace `data` with a zeroed buffer of `new_size` holding the old prefix
    fn reallocate(&mut self, new_size: usize) -> Result<()> {
        let mut next = zeroed(new_size)?;
        let keep = self.capacity().min(new_size);
        next[..keep].copy_from_slice(&self.data[..keep]);
        self.data = next;
        Ok(())
    }
}

/// Zero-filled vector, reporting allocation failure instead of aborting
fn zeroed(len: usize) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| DeviceError::OutOfMemory { requested: len })?;
    data.resize(len, 0);
    Ok(data)
}
