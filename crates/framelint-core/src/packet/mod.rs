//! Length-prefixed packet decoding.
//!
//! The decoder follows a layered structure:
//! - `layout`: byte offsets and ranges (source of truth)
//! - `reader`: safe byte access and content conventions
//! - `parser`: domain-level decoding (no direct byte indexing)
//! - `error`: explicit, actionable errors
//!
//! The parser is pure and contains no I/O. The wire length field is untrusted:
//! it is clamped against the bytes actually present before any allocation call
//! is reachable, so a hostile length value never drives the allocation size.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use error::PacketError;
pub use parser::{PacketSummary, decode_packet};
