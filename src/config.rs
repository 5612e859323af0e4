//! Configuration for memdev
//!
//! Centralized device geometry with sensible defaults.

use crate::error::{DeviceError, Result};

/// Main configuration for a memdev instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Sector Store Configuration
    // -------------------------------------------------------------------------
    /// Bytes per sector
    pub sector_size: u32,

    /// Number of addressable sectors
    pub sector_count: u64,

    /// Upper bound accepted for `sector_count`
    pub max_sector_count: u64,

    /// Write a geometry banner into sector 0 at creation
    pub sector_banner: bool,

    // -------------------------------------------------------------------------
    // Stream Store Configuration
    // -------------------------------------------------------------------------
    /// Initial stream buffer capacity (in bytes)
    pub stream_capacity: usize,

    /// Largest capacity accepted by an explicit resize (in bytes)
    pub stream_capacity_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sector_size: 512,
            sector_count: 2048, // 1 MB
            max_sector_count: 65536, // 32 MB
            sector_banner: false,
            stream_capacity: 4096,
            stream_capacity_limit: 65536,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Total sector store size in bytes
    pub fn sector_bytes(&self) -> u64 {
        self.sector_count * self.sector_size as u64
    }

    /// Check the geometry for consistency
    pub fn validate(&self) -> Result<()> {
        if self.sector_size == 0 {
            return Err(DeviceError::Config("sector_size must be positive".to_string()));
        }
        if self.sector_count == 0 {
            return Err(DeviceError::Config("sector_count must be positive".to_string()));
        }
        if self.sector_count > self.max_sector_count {
            return Err(DeviceError::Config(format!(
                "sector_count {} exceeds maximum of {}",
                self.sector_count, self.max_sector_count
            )));
        }
        if self.sector_count.checked_mul(self.sector_size as u64).is_none() {
            return Err(DeviceError::Config("sector store size overflows".to_string()));
        }
        if self.stream_capacity == 0 {
            return Err(DeviceError::Config("stream_capacity must be positive".to_string()));
        }
        if self.stream_capacity > self.stream_capacity_limit {
            return Err(DeviceError::Config(format!(
                "stream_capacity {} exceeds limit of {}",
                self.stream_capacity, self.stream_capacity_limit
            )));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the sector size (in bytes)
    pub fn sector_size(mut self, size: u32) -> Self {
        self.config.sector_size = size;
        self
    }

    /// Set the number of sectors
    pub fn sector_count(mut self, count: u64) -> Self {
        self.config.sector_count = count;
        self
    }

    /// Set the maximum number of sectors accepted
    pub fn max_sector_count(mut self, count: u64) -> Self {
        self.config.max_sector_count = count;
        self
    }

    /// Enable or disable the sector 0 banner
    pub fn sector_banner(mut self, enabled: bool) -> Self {
        self.config.sector_banner = enabled;
        self
    }

    /// Set the initial stream capacity (in bytes)
    pub fn stream_capacity(mut self, size: usize) -> Self {
        self.config.stream_capacity = size;
        self
    }

    /// Set the stream resize limit (in bytes)
    pub fn stream_capacity_limit(mut self, size: usize) -> Self {
        self.config.stream_capacity_limit = size;
        self
    }

    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}
