//! Error types for memdev
//!
//! Provides a unified error type for all store operations.

use thiserror::Error;

/// Result type alias using DeviceError
pub type Result<T> = std::result::Result<T, DeviceError>;

/// Unified error type for memdev operations
#[derive(Debug, Error)]
pub enum DeviceError {
    // -------------------------------------------------------------------------
    // Addressing Errors
    // -------------------------------------------------------------------------
    #[error("Sector range {start}+{count} exceeds capacity of {capacity} sectors")]
    OutOfRange { start: u64, count: u64, capacity: u64 },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // -------------------------------------------------------------------------
    // Allocation Errors
    // -------------------------------------------------------------------------
    #[error("Out of memory: could not allocate {requested} bytes")]
    OutOfMemory { requested: usize },

    // -------------------------------------------------------------------------
    // Control Errors
    // -------------------------------------------------------------------------
    #[error("Unsupported control command: 0x{0:08x}")]
    UnsupportedCommand(u32),

    #[error("Codec error: {0}")]
    Codec(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DeviceError {
    /// Host errno equivalent, for glue code that reports failures as `-errno`
    pub fn errno(&self) -> i32 {
        match self {
            DeviceError::OutOfRange { .. } => 5,          // EIO
            DeviceError::OutOfMemory { .. } => 12,        // ENOMEM
            DeviceError::UnsupportedCommand(_) => 25,     // ENOTTY
            DeviceError::InvalidArgument(_)
            | DeviceError::Codec(_)
            | DeviceError::Config(_) => 22,               // EINVAL
        }
    }
}

impl From<bincode::Error> for DeviceError {
    fn from(err: bincode::Error) -> Self {
        DeviceError::Codec(err.to_string())
    }
}

impl From<DeviceError> for std::io::Error {
    fn from(err: DeviceError) -> Self {
        let kind = match err {
            DeviceError::OutOfMemory { .. } => std::io::ErrorKind::OutOfMemory,
            DeviceError::UnsupportedCommand(_) => std::io::ErrorKind::Unsupported,
            DeviceError::OutOfRange { .. } | DeviceError::InvalidArgument(_) => {
                std::io::ErrorKind::InvalidInput
            }
            DeviceError::Codec(_) | DeviceError::Config(_) => std::io::ErrorKind::Other,
        };
        std::io::Error::new(kind, err)
    }
}
