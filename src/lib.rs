//! # memdev
//!
//! In-memory emulation of two device models:
//! - A **sector store**: fixed capacity, addressed in fixed-size sectors (block device)
//! - A **stream store**: growable, positional, byte oriented (character device)
//!
//! Both are safe to share across threads; every operation runs as one
//! critical section under the store's own guard.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Host glue (read/write/seek/control)          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       Devices                                │
//! │              (config, control routing)                       │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ SectorStore │          │ StreamStore │
//!   │   (Guard)   │          │   (Guard)   │
//!   └──────┬──────┘          └──────┬──────┘
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │    Stats    │          │    Stats    │
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod guard;
pub mod stats;
pub mod sector;
pub mod stream;
pub mod control;
pub mod devices;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{DeviceError, Result};
pub use config::Config;
pub use devices::{DeviceKind, Devices};
pub use sector::SectorStore;
pub use stream::{StreamStore, Whence};
pub use stats::{SectorStats, StreamStats};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of memdev
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
