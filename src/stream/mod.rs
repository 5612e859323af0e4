//! Stream Store Module
//!
//! Growable, positional byte store modelling a character device.
//!
//! ## Responsibilities
//! - Offset-based reads bounded by the high-water mark
//! - Writes that grow the buffer instead of dropping bytes
//! - Shared cursor for seek and cursor-relative transfers
//! - Explicit resize, reset and stats
//!
//! ## Buffer Model
//! ```text
//! 0                 high_water_mark            capacity
//! ├──────────────────────┼─────────────────────────┤
//! │     written data     │   zeroed, allocated     │
//! └──────────────────────┴─────────────────────────┘
//! ```
//!
//! A write ending past `capacity` first grows the buffer to
//! `max(capacity * 2, end)`.

mod buffer;
mod io;
mod store;

pub use store::{StreamStore, Whence};
