//! Sector Store Module
//!
//! Fixed-capacity byte region addressed in fixed-size sectors, modelling a
//! block device.
//!
//! ## Responsibilities
//! - Bounds-checked sector reads and writes
//! - Scatter/gather transfers executed as one critical section
//! - Per-request read/write counters
//!
//! ## Layout
//! ```text
//! ┌──────────┬──────────┬──────────┬─────┬──────────────┐
//! │ Sector 0 │ Sector 1 │ Sector 2 │ ... │ Sector N - 1 │
//! └──────────┴──────────┴──────────┴─────┴──────────────┘
//!  byte offset of sector s = s * unit_size
//! ```

mod segments;
mod store;

pub use store::SectorStore;
