//! Control Module
//!
//! The small command surface that sits beside read/write/seek.
//!
//! ## Request Codes
//! Codes follow the host `_IO`/`_IOR`/`_IOW` packing:
//! ```text
//! ┌──────────┬───────────────┬──────────┬──────────┐
//! │ Dir (2)  │ Arg size (14) │ Type (8) │  Nr (8)  │
//! └──────────┴───────────────┴──────────┴──────────┘
//! ```
//!
//! ### Stream store (type 'C')
//! - nr 1: GET_CAPACITY  (read, 4-byte arg)
//! - nr 2: RESET         (no arg)
//! - nr 3: GET_STATS     (read, 16-byte arg)
//! - nr 4: SET_CAPACITY  (write, 4-byte arg)
//!
//! ### Sector store (type 0x12)
//! - 0x1260:     GET_SECTOR_COUNT
//! - 0x80081272: GET_SIZE_BYTES
//!
//! Results travel back as a bincode-encoded `ControlResponse`.

mod codec;
mod command;
mod response;

pub use codec::{decode_response, encode_response};
pub use command::{ControlCommand, SectorControl};
pub use response::ControlResponse;
