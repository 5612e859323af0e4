//! Response definitions
//!
//! Results of control commands.

use serde::{Deserialize, Serialize};

use crate::stats::StreamStats;

/// Result of a control command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlResponse {
    /// Command applied, nothing to report
    Done,

    /// Stream capacity in bytes
    Capacity(u64),

    /// Stream counters and usage
    Stats(StreamStats),

    /// Sector store size in sectors
    SectorCount(u64),

    /// Sector store size in bytes
    SizeBytes(u64),
}
