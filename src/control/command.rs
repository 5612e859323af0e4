//! Command definitions
//!
//! Typed control commands and their raw request codes.

use crate::error::{DeviceError, Result};

const DIR_NONE: u32 = 0;
const DIR_WRITE: u32 = 1;
const DIR_READ: u32 = 2;

/// Pack a request code the way the host `_IOC` macro does
const fn ioc(dir: u32, ty: u8, nr: u8, size: u32) -> u32 {
    (dir << 30) | (size << 16) | ((ty as u32) << 8) | nr as u32
}

/// Stream store command type byte
pub const STREAM_MAGIC: u8 = b'C';

/// Sector store command type byte
pub const SECTOR_MAGIC: u8 = 0x12;

/// Control commands accepted by the stream store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    /// Report the allocated capacity in bytes
    GetCapacity,

    /// Zero the buffer and the high-water mark
    Reset,

    /// Report counters and usage
    GetStats,

    /// Reallocate to the given size in bytes
    SetCapacity(usize),
}

impl ControlCommand {
    pub const GET_CAPACITY: u32 = ioc(DIR_READ, STREAM_MAGIC, 1, 4);
    pub const RESET: u32 = ioc(DIR_NONE, STREAM_MAGIC, 2, 0);
    pub const GET_STATS: u32 = ioc(DIR_READ, STREAM_MAGIC, 3, 16);
    pub const SET_CAPACITY: u32 = ioc(DIR_WRITE, STREAM_MAGIC, 4, 4);

    /// Decode a raw request code and its argument
    ///
    /// `arg` is only consulted by `SET_CAPACITY`.
    pub fn decode(code: u32, arg: u64) -> Result<Self> {
        match code {
            Self::GET_CAPACITY => Ok(ControlCommand::GetCapacity),
            Self::RESET => Ok(ControlCommand::Reset),
            Self::GET_STATS => Ok(ControlCommand::GetStats),
            Self::SET_CAPACITY => {
                let size = usize::try_from(arg).map_err(|_| {
                    DeviceError::InvalidArgument(format!("capacity {} does not fit", arg))
                })?;
                Ok(ControlCommand::SetCapacity(size))
            }
            _ => Err(DeviceError::UnsupportedCommand(code)),
        }
    }

    /// Raw request code for this command
    pub fn code(&self) -> u32 {
        match self {
            ControlCommand::GetCapacity => Self::GET_CAPACITY,
            ControlCommand::Reset => Self::RESET,
            ControlCommand::GetStats => Self::GET_STATS,
            ControlCommand::SetCapacity(_) => Self::SET_CAPACITY,
        }
    }
}

/// Control commands accepted by the sector store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectorControl {
    /// Report the number of sectors
    GetSectorCount,

    /// Report the total size in bytes
    GetSizeBytes,
}

impl SectorControl {
    pub const GET_SECTOR_COUNT: u32 = ioc(DIR_NONE, SECTOR_MAGIC, 96, 0);
    pub const GET_SIZE_BYTES: u32 = ioc(DIR_READ, SECTOR_MAGIC, 114, 8);

    /// Decode a raw request code
    pub fn decode(code: u32) -> Result<Self> {
        match code {
            Self::GET_SECTOR_COUNT => Ok(SectorControl::GetSectorCount),
            Self::GET_SIZE_BYTES => Ok(SectorControl::GetSizeBytes),
            _ => Err(DeviceError::UnsupportedCommand(code)),
        }
    }

    /// Raw request code for this command
    pub fn code(&self) -> u32 {
        match self {
            SectorControl::GetSectorCount => Self::GET_SECTOR_COUNT,
            SectorControl::GetSizeBytes => Self::GET_SIZE_BYTES,
        }
    }
}
