// crates/jira-bridge-broker/tests/codec_tests.rs
// ============================================================================
// Module: Attachment Codec Tests
// Description: Tests for payload routing, the file sink, and inline encoding.
// ============================================================================
//! ## Overview
//! Validates that both payload origins resolve through the codec and that
//! retrieved bytes round-trip through the sink and the inline encoder.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::fs;

use jira_bridge_broker::AttachmentCodec;
use jira_bridge_broker::AttachmentPayload;
use jira_bridge_broker::CodecError;
use jira_bridge_broker::InlineEncoding;
use tempfile::TempDir;

#[test]
fn codec_routes_path_payloads_to_file_source() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("trace.txt");
    fs::write(&path, b"trace").unwrap();

    let resolved = AttachmentCodec::default().resolve(&AttachmentPayload::path(&path)).unwrap();
    assert_eq!(resolved.filename, "trace.txt");
    assert_eq!(resolved.bytes, b"trace");
}

#[test]
fn codec_routes_inline_payloads_to_inline_source() {
    let payload = AttachmentPayload::inline("hello.txt", "aGVsbG8=", InlineEncoding::Base64);
    let resolved = AttachmentCodec::default().resolve(&payload).unwrap();
    assert_eq!(resolved.bytes, b"hello");
}

#[test]
fn inline_encoding_round_trips_resolved_bytes() {
    let original = vec![0_u8, 159, 146, 150, 255, 10];
    let encoded = AttachmentCodec::encode_inline(&original);
    let payload = AttachmentPayload::inline("blob.bin", encoded, InlineEncoding::Base64);
    let resolved = AttachmentCodec::default().resolve(&payload).unwrap();
    assert_eq!(resolved.bytes, original);
}

#[test]
fn sink_writes_bytes_and_reports_size() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.bin");
    let written = AttachmentCodec::default().write_to_path(&path, b"payload").unwrap();
    assert_eq!(written, 7);
    assert_eq!(fs::read(&path).unwrap(), b"payload");
}

#[test]
fn sink_reports_write_errors() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing-dir").join("out.bin");
    let error = AttachmentCodec::default().write_to_path(&path, b"x").unwrap_err();
    assert!(matches!(error, CodecError::Write(_)));
}

#[test]
fn rooted_codec_confines_sink_writes() {
    let root = TempDir::new().unwrap();
    let other = TempDir::new().unwrap();
    let codec = AttachmentCodec::new(Some(root.path().to_path_buf()));

    let inside = root.path().join("ok.bin");
    assert_eq!(codec.write_to_path(&inside, b"ok").unwrap(), 2);

    let outside = other.path().join("nope.bin");
    let error = codec.write_to_path(&outside, b"no").unwrap_err();
    assert!(matches!(error, CodecError::Write(_)));
    assert!(!outside.exists());
}
