//! Stream Store implementation
//!
//! `StreamBuffer` plus cursor and counters behind a `Guard`.

use bytes::Bytes;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::control::{ControlCommand, ControlResponse};
use crate::error::{DeviceError, Result};
use crate::guard::Guard;
use crate::stats::{OpCounters, StreamStats};

use super::buffer::StreamBuffer;

/// Seek reference point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Whence {
    /// Relative to offset 0
    FromStart,

    /// Relative to the shared cursor
    FromCurrent,

    /// Relative to the high-water mark (not the capacity)
    FromEnd,
}

/// State mutated only under the store guard
struct StreamState {
    buffer: StreamBuffer,
    position: u64,
    counters: OpCounters,
}

impl StreamState {
    fn read(&mut self, offset: u64, max_len: usize) -> Bytes {
        let bytes = Bytes::copy_from_slice(self.buffer.read_at(offset, max_len));
        self.counters.record_read();
        bytes
    }

    fn write(&mut self, offset: u64, bytes: &[u8]) -> Result<usize> {
        match self.buffer.write_at(offset, bytes) {
            Ok(Some(capacity)) => info!("Stream buffer resized to {} bytes", capacity),
            Ok(None) => {}
            Err(e) => {
                warn!("Stream write of {} bytes at {} failed: {}", bytes.len(), offset, e);
                return Err(e);
            }
        }
        self.counters.record_write();
        Ok(bytes.len())
    }
}

/// Growable byte-oriented store, modelling a character device
///
/// ## Concurrency:
/// - Every public method runs entirely inside the store guard
/// - One cursor is shared by all callers; `seek`, `read_next` and
///   `write_next` move it
/// - Offset-based `read`/`write` never touch the cursor
pub struct StreamStore {
    /// Largest capacity accepted by `set_capacity`
    capacity_limit: usize,

    state: Guard<StreamState>,
}

impl StreamStore {
    /// Smallest capacity accepted by `set_capacity`
    pub const MIN_CAPACITY: usize = 1;

    /// Create an empty store with `capacity` zeroed bytes
    pub fn new(capacity: usize, capacity_limit: usize) -> Result<Self> {
        let buffer = StreamBuffer::with_capacity(capacity)?;

        info!("Stream store created: {} bytes", capacity);

        Ok(Self {
            capacity_limit,
            state: Guard::new(StreamState {
                buffer,
                position: 0,
                counters: OpCounters::default(),
            }),
        })
    }

    /// Create a store from the configured default capacity and resize limit
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Self::new(config.stream_capacity, config.stream_capacity_limit)
    }

    /// Read up to `max_len` bytes starting at `offset`
    ///
    /// At or past the high-water mark this returns an empty result, not an
    /// error. Counts as one read either way.
    pub fn read(&self, offset: u64, max_len: usize) -> Bytes {
        let bytes = self.state.with(|state| state.read(offset, max_len));
        debug!("Read {} bytes at offset {}", bytes.len(), offset);
        bytes
    }

    /// Write `bytes` at `offset`, growing the buffer when the write runs past it
    ///
    /// Returns the number of bytes written, always `bytes.len()` on success.
    pub fn write(&self, offset: u64, bytes: &[u8]) -> Result<usize> {
        let written = self.state.with(|state| state.write(offset, bytes))?;
        debug!("Wrote {} bytes at offset {}", written, offset);
        Ok(written)
    }

    /// Read at the shared cursor and advance it past the returned bytes
    pub fn read_next(&self, max_len: usize) -> Bytes {
        self.state.with(|state| {
            let bytes = state.read(state.position, max_len);
            state.position += bytes.len() as u64;
            bytes
        })
    }

    /// Write at the shared cursor and advance it past the written bytes
    pub fn write_next(&self, bytes: &[u8]) -> Result<usize> {
        self.state.with(|state| -> Result<usize> {
            let written = state.write(state.position, bytes)?;
            state.position += written as u64;
            Ok(written)
        })
    }

    /// Move the shared cursor
    ///
    /// Fails with `InvalidArgument` if the result would be negative; the
    /// cursor is left where it was. Never changes capacity or used bytes.
    pub fn seek(&self, offset: i64, whence: Whence) -> Result<u64> {
        self.state.with(|state| -> Result<u64> {
            let base = match whence {
                Whence::FromStart => 0,
                Whence::FromCurrent => state.position,
                Whence::FromEnd => state.buffer.high_water_mark() as u64,
            };

            let target = base as i128 + offset as i128;
            let position = u64::try_from(target).map_err(|_| {
                DeviceError::InvalidArgument(format!(
                    "seek to {} ({:?} {:+}) is out of range",
                    target, whence, offset
                ))
            })?;

            state.position = position;
            Ok(position)
        })
    }

    /// Current shared cursor
    pub fn position(&self) -> u64 {
        self.state.with(|state| state.position)
    }

    /// Zero the buffer and drop the high-water mark to 0
    ///
    /// Capacity and counters are unchanged.
    pub fn reset(&self) {
        self.state.with(|state| state.buffer.reset());
        info!("Stream buffer reset");
    }

    /// Counters and usage snapshot
    pub fn get_stats(&self) -> StreamStats {
        self.state.with(|state| StreamStats {
            read_count: state.counters.reads(),
            write_count: state.counters.writes(),
            used: state.buffer.high_water_mark() as u64,
            capacity: state.buffer.capacity() as u64,
        })
    }

    /// Allocated buffer length in bytes
    pub fn capacity(&self) -> usize {
        self.state.with(|state| state.buffer.capacity())
    }

    /// Reallocate the buffer to exactly `new_size` bytes
    ///
    /// Keeps the first `min(capacity, new_size)` bytes and clamps the
    /// high-water mark. `new_size` must lie in `MIN_CAPACITY..=capacity_limit`.
    pub fn set_capacity(&self, new_size: usize) -> Result<()> {
        if !(Self::MIN_CAPACITY..=self.capacity_limit).contains(&new_size) {
            warn!("Rejected stream resize to {} bytes", new_size);
            return Err(DeviceError::InvalidArgument(format!(
                "capacity {} outside {}..={}",
                new_size,
                Self::MIN_CAPACITY,
                self.capacity_limit
            )));
        }

        self.state.with(|state| state.buffer.resize(new_size))?;
        info!("Stream buffer size set to {}", new_size);
        Ok(())
    }

    /// Largest capacity accepted by `set_capacity`
    pub fn capacity_limit(&self) -> usize {
        self.capacity_limit
    }

    /// Execute a control command
    pub fn control(&self, command: ControlCommand) -> Result<ControlResponse> {
        match command {
            ControlCommand::GetCapacity => Ok(ControlResponse::Capacity(self.capacity() as u64)),
            ControlCommand::Reset => {
                self.reset();
                Ok(ControlResponse::Done)
            }
            ControlCommand::GetStats => Ok(ControlResponse::Stats(self.get_stats())),
            ControlCommand::SetCapacity(size) => {
                self.set_capacity(size)?;
                Ok(ControlResponse::Done)
            }
        }
    }
}
