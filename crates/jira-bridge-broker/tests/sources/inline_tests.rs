// crates/jira-bridge-broker/tests/sources/inline_tests.rs
// ============================================================================
// Module: InlineSource Unit Tests
// Description: Tests for decoding inline-origin attachments.
// ============================================================================

//! Inline source tests.

use jira_bridge_broker::CodecError;
use jira_bridge_broker::InlineEncoding;
use jira_bridge_broker::InlineSource;
use jira_bridge_broker::MAX_ATTACHMENT_BYTES;

// ============================================================================
// SECTION: Encoding Labels
// ============================================================================

#[test]
fn encoding_labels_parse_case_insensitively() {
    assert_eq!(InlineEncoding::parse("utf8").unwrap(), InlineEncoding::Utf8);
    assert_eq!(InlineEncoding::parse("UTF-8").unwrap(), InlineEncoding::Utf8);
    assert_eq!(InlineEncoding::parse("Base64").unwrap(), InlineEncoding::Base64);
    assert!(matches!(InlineEncoding::parse("rot13"), Err(CodecError::Encoding(_))));
}

// ============================================================================
// SECTION: Decoding
// ============================================================================

#[test]
fn utf8_content_is_taken_verbatim() {
    let resolved = InlineSource::new().decode("notes.md", "# héllo", InlineEncoding::Utf8).unwrap();
    assert_eq!(resolved.filename, "notes.md");
    assert_eq!(resolved.bytes, "# héllo".as_bytes());
}

#[test]
fn base64_content_is_decoded() {
    let resolved = InlineSource::new().decode("a.bin", "AAEC/w==", InlineEncoding::Base64).unwrap();
    assert_eq!(resolved.bytes, vec![0x00, 0x01, 0x02, 0xff]);
}

#[test]
fn base64_tolerates_line_breaks() {
    let resolved = InlineSource::new().decode("a.txt", "aGVs\nbG8=\n", InlineEncoding::Base64).unwrap();
    assert_eq!(resolved.bytes, b"hello");
}

#[test]
fn malformed_base64_is_invalid_encoding() {
    let error = InlineSource::new().decode("a.bin", "not*base64!", InlineEncoding::Base64).unwrap_err();
    assert!(matches!(error, CodecError::Encoding(_)));
}

#[test]
fn empty_filename_is_rejected() {
    let error = InlineSource::new().decode(" ", "x", InlineEncoding::Utf8).unwrap_err();
    assert!(matches!(error, CodecError::Encoding(_)));
}

#[test]
fn oversize_inline_content_is_rejected_before_decoding() {
    let encoded = "A".repeat((MAX_ATTACHMENT_BYTES / 3 + 1) * 4);
    let error = InlineSource::new().decode("big.bin", &encoded, InlineEncoding::Base64).unwrap_err();
    assert!(matches!(error, CodecError::TooLarge { .. }));
}
