//! Framelint core library for length-prefixed packet validation.
//!
//! This crate implements the decoding pipeline used by the CLI: a byte buffer
//! feeds the packet decoder (layout/reader/parser), whose outcome is folded
//! into a deterministic JSON report. Parsing is byte-oriented and side-effect
//! free; all I/O stays in the harness. The wire-supplied length field is
//! untrusted and is clamped against the bytes actually present before any
//! payload allocation exists in the code path.
//!
//! Invariants:
//! - The payload allocation request never exceeds the bytes after the header.
//! - The payload buffer is scoped to the decode call and released on every
//!   exit path.
//! - Decode calls are stateless and independent; equal inputs yield equal
//!   outcomes.
//!
//! Version française (résumé):
//! Cette crate fournit le cœur de validation : tampon d'octets -> décodeur
//! (layout/reader/parser) -> rapport déterministe. La longueur annoncée par
//! le paquet n'est jamais utilisée telle quelle pour allouer ; elle est
//! bornée par les octets réellement disponibles.
//!
//! # Examples
//! ```
//! use framelint_core::decode_packet;
//!
//! let summary = decode_packet(&[0x00, 0x00, 0x00, 0x02, b'h', b'i'])?;
//! assert_eq!(summary.effective_len, 2);
//! # Ok::<(), framelint_core::PacketError>(())
//! ```

use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

mod packet;

pub use packet::{PacketError, PacketSummary, decode_packet};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;
/// Default timestamp used when the clock cannot be formatted.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";

/// Decode report for a single packet check.
///
/// # Examples
/// ```
/// use framelint_core::{decode_packet, report_for};
///
/// let buffer = [0x00, 0x00, 0x00, 0x02, b'h', b'i'];
/// let result = decode_packet(&buffer);
/// let report = report_for("capture.bin", buffer.len() as u64, &result);
/// assert_eq!(report.report_version, framelint_core::REPORT_VERSION);
/// assert_eq!(report.outcome, "ok");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeReport {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// RFC3339 timestamp representing the report generation time.
    pub generated_at: String,

    /// Input metadata.
    pub input: InputInfo,

    /// Outcome label: `ok`, `too-short`, `invalid-content`, or
    /// `allocation-failed`.
    pub outcome: String,
    /// Packet summary, present on successful decodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packet: Option<PacketSummary>,
    /// Error message, present on failed decodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Tool metadata embedded in reports.
///
/// # Examples
/// ```
/// use framelint_core::ToolInfo;
///
/// let tool = ToolInfo {
///     name: "framelint".to_string(),
///     version: "0.1.0".to_string(),
/// };
/// assert_eq!(tool.name, "framelint");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name (e.g., "framelint").
    pub name: String,
    /// Tool version (semver).
    pub version: String,
}

/// Input metadata embedded in reports.
///
/// # Examples
/// ```
/// use framelint_core::InputInfo;
///
/// let input = InputInfo {
///     path: "<stdin>".to_string(),
///     bytes: 6,
/// };
/// assert_eq!(input.bytes, 6);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the harness, or `<stdin>`.
    pub path: String,
    /// Number of bytes handed to the decoder.
    pub bytes: u64,
}

/// Fold a decode result into a versioned report.
///
/// # Examples
/// ```
/// use framelint_core::{decode_packet, report_for};
///
/// let result = decode_packet(&[0x00, 0x00]);
/// let report = report_for("capture.bin", 2, &result);
/// assert_eq!(report.outcome, "too-short");
/// assert!(report.packet.is_none());
/// ```
pub fn report_for(
    input_path: &str,
    input_bytes: u64,
    result: &Result<PacketSummary, PacketError>,
) -> DecodeReport {
    let (outcome, packet, error) = match result {
        Ok(summary) => ("ok", Some(*summary), None),
        Err(err) => (outcome_label(err), None, Some(err.to_string())),
    };
    DecodeReport {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "framelint".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        generated_at: now_rfc3339(),
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        outcome: outcome.to_string(),
        packet,
        error,
    }
}

fn outcome_label(err: &PacketError) -> &'static str {
    match err {
        PacketError::TooShort { .. } => "too-short",
        PacketError::AllocationFailed { .. } => "allocation-failed",
        PacketError::InvalidContent { .. } => "invalid-content",
    }
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| DEFAULT_GENERATED_AT.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_omits_optional_fields_when_none() {
        let result = decode_packet(&[0x00, 0x00, 0x00]);
        let report = report_for("capture.bin", 3, &result);
        assert_eq!(report.outcome, "too-short");

        let value = serde_json::to_value(&report).expect("report json");
        assert!(value.get("packet").is_none());
        assert!(value.get("error").is_some());
    }

    #[test]
    fn report_carries_packet_summary_on_success() {
        let buffer = [0x00, 0x00, 0x00, 0x05, b'a', b'b'];
        let result = decode_packet(&buffer);
        let report = report_for("capture.bin", buffer.len() as u64, &result);
        assert_eq!(report.outcome, "ok");
        assert!(report.error.is_none());

        let value = serde_json::to_value(&report).expect("report json");
        assert_eq!(value["packet"]["declared_len"], 5);
        assert_eq!(value["packet"]["effective_len"], 2);
        assert_eq!(value["packet"]["truncated"], true);
        assert!(value.get("error").is_none());
    }

    #[test]
    fn outcome_labels_are_stable() {
        assert_eq!(
            outcome_label(&PacketError::TooShort {
                needed: 4,
                actual: 0
            }),
            "too-short"
        );
        assert_eq!(
            outcome_label(&PacketError::AllocationFailed { requested: 1 }),
            "allocation-failed"
        );
        assert_eq!(
            outcome_label(&PacketError::InvalidContent {
                offset: 0,
                value: 0
            }),
            "invalid-content"
        );
    }
}
