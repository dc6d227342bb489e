use serde::{Deserialize, Serialize};

use super::error::PacketError;
use super::layout;
use super::reader::{PacketReader, is_printable};

/// Result of a successful decode: what the header claimed versus what was
/// actually validated.
///
/// # Examples
/// ```
/// use framelint_core::decode_packet;
///
/// let buffer = [0x00, 0x00, 0x00, 0x05, b'a', b'b'];
/// let summary = decode_packet(&buffer).unwrap();
/// assert_eq!(summary.declared_len, 5);
/// assert_eq!(summary.effective_len, 2);
/// assert!(summary.truncated);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacketSummary {
    /// Length claimed by the 4-byte big-endian header. Untrusted.
    pub declared_len: u32,
    /// Bytes actually copied and validated: `min(declared_len, available)`.
    pub effective_len: usize,
    /// Whether the header claimed more bytes than the buffer carried.
    pub truncated: bool,
}

/// Decode and validate a single length-prefixed packet.
///
/// The payload buffer is sized from the clamped length, never from the wire
/// value, so the allocation request is always bounded by the bytes the caller
/// actually supplied. The payload lives only for the duration of the call.
///
/// Returns `Ok` when every payload byte is printable ASCII (0x20–0x7E).
///
/// # Examples
/// ```
/// use framelint_core::{PacketError, decode_packet};
///
/// let summary = decode_packet(&[0x00, 0x00, 0x00, 0x02, b'h', b'i']).unwrap();
/// assert_eq!(summary.effective_len, 2);
///
/// let err = decode_packet(&[0x00, 0x00]).unwrap_err();
/// assert!(matches!(err, PacketError::TooShort { .. }));
/// ```
pub fn decode_packet(buffer: &[u8]) -> Result<PacketSummary, PacketError> {
    let reader = PacketReader::new(buffer);
    reader.require_len(layout::HEADER_LEN)?;

    let declared_len = reader.read_u32_be(layout::LENGTH_RANGE.clone())?;
    let available = reader.payload_bytes()?;

    // Clamp before any allocation: the wire length never sizes a buffer.
    let effective_len = (declared_len as usize).min(available.len());

    let mut payload = Vec::new();
    payload
        .try_reserve_exact(effective_len)
        .map_err(|_| PacketError::AllocationFailed {
            requested: effective_len,
        })?;
    payload.extend_from_slice(&available[..effective_len]);

    for (offset, value) in payload.iter().copied().enumerate() {
        if !is_printable(value) {
            return Err(PacketError::InvalidContent { offset, value });
        }
    }

    Ok(PacketSummary {
        declared_len,
        effective_len,
        truncated: (declared_len as usize) > available.len(),
    })
}
