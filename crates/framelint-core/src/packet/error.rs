use thiserror::Error;

/// Errors returned by packet decoding.
///
/// Note: this error type is re-exported at the crate root; every variant is
/// a reported condition, never a panic or abort.
///
/// # Examples
/// ```
/// use framelint_core::PacketError;
///
/// let err = PacketError::TooShort { needed: 4, actual: 2 };
/// assert!(err.to_string().contains("packet too short"));
/// ```
#[derive(Debug, Error)]
pub enum PacketError {
    #[error("packet too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("payload allocation of {requested} bytes failed")]
    AllocationFailed { requested: usize },
    #[error("non-printable byte 0x{value:02x} at payload offset {offset}")]
    InvalidContent { offset: usize, value: u8 },
}
