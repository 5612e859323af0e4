//! Control payload codec
//!
//! Responses are copied back to the caller as bincode bytes.

use crate::error::Result;

use super::ControlResponse;

/// Encode a response payload
pub fn encode_response(response: &ControlResponse) -> Result<Vec<u8>> {
    Ok(bincode::serialize(response)?)
}

/// Decode a response payload
pub fn decode_response(bytes: &[u8]) -> Result<ControlResponse> {
    Ok(bincode::deserialize(bytes)?)
}
