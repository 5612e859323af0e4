//! Devices Module
//!
//! Owns one sector store and one stream store built from a single `Config`.
//!
//! ## Responsibilities
//! - Create both stores at startup with the configured geometry
//! - Route raw control requests to the right store and encode the reply
//! - Log lifetime totals at shutdown
//!
//! The two stores are independent: each has its own guard, and an operation
//! on one never waits on the other.

use tracing::info;

use crate::config::Config;
use crate::control::{encode_response, ControlCommand, SectorControl};
use crate::error::Result;
use crate::sector::SectorStore;
use crate::stream::StreamStore;

/// Which store a raw control request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    Sector,
    Stream,
}

/// The emulated device pair
pub struct Devices {
    config: Config,
    sectors: SectorStore,
    stream: StreamStore,
}

impl Devices {
    /// Validate `config` and create both stores
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;

        let sectors = SectorStore::from_config(&config)?;
        let stream = StreamStore::from_config(&config)?;

        info!(
            "Devices ready: {} sectors ({} KB), stream buffer {} bytes",
            config.sector_count,
            config.sector_bytes() / 1024,
            config.stream_capacity
        );

        Ok(Self {
            config,
            sectors,
            stream,
        })
    }

    /// The sector store
    pub fn sectors(&self) -> &SectorStore {
        &self.sectors
    }

    /// The stream store
    pub fn stream(&self) -> &StreamStore {
        &self.stream
    }

    /// Decode a raw control request, run it, and return the encoded reply
    pub fn control(&self, kind: DeviceKind, code: u32, arg: u64) -> Result<Vec<u8>> {
        let response = match kind {
            DeviceKind::Sector => self.sectors.control(SectorControl::decode(code)?),
            DeviceKind::Stream => self.stream.control(ControlCommand::decode(code, arg)?)?,
        };
        encode_response(&response)
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Release both stores, logging lifetime totals
    pub fn shutdown(self) {
        let sector = self.sectors.stats();
        let stream = self.stream.get_stats();

        info!(
            "Sector store removed. Total reads: {}, writes: {}",
            sector.read_count, sector.write_count
        );
        info!(
            "Stream store removed. Total reads: {}, writes: {}, used {}/{} bytes",
            stream.read_count, stream.write_count, stream.used, stream.capacity
        );
    }
}
