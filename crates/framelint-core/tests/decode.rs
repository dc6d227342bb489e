use framelint_core::{PacketError, decode_packet, report_for};

fn packet(declared: u32, payload: &[u8]) -> Vec<u8> {
    let mut buffer = declared.to_be_bytes().to_vec();
    buffer.extend_from_slice(payload);
    buffer
}

#[test]
fn round_trip_printable_payloads() {
    for k in [0usize, 1, 2, 16, 255, 4096] {
        let payload = vec![b'x'; k];
        let buffer = packet(k as u32, &payload);
        let summary = decode_packet(&buffer).unwrap();
        assert_eq!(summary.declared_len, k as u32);
        assert_eq!(summary.effective_len, k);
        assert!(!summary.truncated, "k = {k}");
    }
}

#[test]
fn short_inputs_report_too_short() {
    for buffer in [&[][..], &[0x00][..], &[0x00, 0x00][..], &[0xFF, 0xFF, 0xFF][..]] {
        let err = decode_packet(buffer).unwrap_err();
        assert!(matches!(err, PacketError::TooShort { needed: 4, .. }));
    }
}

#[test]
fn header_only_zero_length_is_ok() {
    let summary = decode_packet(&[0x00, 0x00, 0x00, 0x00]).unwrap();
    assert_eq!(summary.effective_len, 0);
    assert!(!summary.truncated);
}

#[test]
fn declared_length_beyond_available_truncates() {
    let buffer = packet(5, b"ab");
    let summary = decode_packet(&buffer).unwrap();
    assert_eq!(summary.effective_len, 2);
    assert!(summary.truncated);
}

#[test]
fn maximal_declared_length_is_bounded_by_available_bytes() {
    let buffer = packet(u32::MAX, b"0123456789");
    let summary = decode_packet(&buffer).unwrap();
    // The effective length is what sized the payload allocation; it must be
    // the ten bytes present, not the ~4 GiB the header claimed.
    assert_eq!(summary.effective_len, 10);
    assert!(summary.truncated);
}

#[test]
fn effective_length_never_exceeds_available() {
    for declared in [0u32, 1, 2, 8, 1024, u32::MAX] {
        for available in [0usize, 1, 7, 64] {
            let buffer = packet(declared, &vec![b'a'; available]);
            let summary = decode_packet(&buffer).unwrap();
            assert!(summary.effective_len <= available);
            assert!(summary.effective_len <= declared as usize);
        }
    }
}

#[test]
fn non_printable_byte_is_rejected_with_offset() {
    let buffer = packet(3, &[0x41, 0x00, 0x42]);
    let err = decode_packet(&buffer).unwrap_err();
    assert!(matches!(
        err,
        PacketError::InvalidContent {
            offset: 1,
            value: 0x00
        }
    ));
}

#[test]
fn same_buffer_decodes_identically() {
    let ok = packet(4, b"abcd");
    assert_eq!(decode_packet(&ok).unwrap(), decode_packet(&ok).unwrap());

    let bad = packet(1, &[0x07]);
    let first = decode_packet(&bad).unwrap_err();
    let second = decode_packet(&bad).unwrap_err();
    assert_eq!(first.to_string(), second.to_string());
}

#[test]
fn report_json_is_versioned_and_stable() {
    let buffer = packet(2, b"hi");
    let result = decode_packet(&buffer);
    let report = report_for("fixtures/ok.bin", buffer.len() as u64, &result);

    let value = serde_json::to_value(&report).expect("serialize report");
    assert_eq!(value["report_version"], framelint_core::REPORT_VERSION);
    assert_eq!(value["tool"]["name"], "framelint");
    assert_eq!(value["input"]["path"], "fixtures/ok.bin");
    assert_eq!(value["input"]["bytes"], 6);
    assert_eq!(value["outcome"], "ok");
    assert_eq!(value["packet"]["effective_len"], 2);
}

#[test]
fn report_for_failure_names_the_outcome() {
    let buffer = packet(1, &[0x1F]);
    let result = decode_packet(&buffer);
    let report = report_for("fixtures/bad.bin", buffer.len() as u64, &result);
    assert_eq!(report.outcome, "invalid-content");
    let message = report.error.expect("error message");
    assert!(message.contains("0x1f"));
}
