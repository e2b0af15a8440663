// crates/jira-bridge-broker/tests/sources/file_tests.rs
// ============================================================================
// Module: FileSource Unit Tests
// Description: Tests for reading path-origin attachments.
// ============================================================================

//! File source tests.

use std::fs;

use jira_bridge_broker::CodecError;
use jira_bridge_broker::FileSource;
use jira_bridge_broker::MAX_ATTACHMENT_BYTES;
use jira_bridge_broker::sha256_hex;
use tempfile::TempDir;

// ============================================================================
// SECTION: Success Path Tests
// ============================================================================

#[test]
fn file_source_reads_bytes_and_names_by_final_component() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("report.log");
    fs::write(&path, b"line one\nline two\n").unwrap();

    let resolved = FileSource::unrestricted().read(&path).unwrap();
    assert_eq!(resolved.filename, "report.log");
    assert_eq!(resolved.bytes, b"line one\nline two\n");
    assert_eq!(resolved.sha256, sha256_hex(b"line one\nline two\n"));
    assert_eq!(resolved.size(), 18);
}

#[test]
fn file_source_reads_empty_files() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.bin");
    fs::write(&path, b"").unwrap();

    let resolved = FileSource::unrestricted().read(&path).unwrap();
    assert!(resolved.bytes.is_empty());
}

#[test]
fn file_source_allows_paths_inside_root() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("inside.txt");
    fs::write(&path, b"ok").unwrap();

    let resolved = FileSource::new(dir.path()).read(&path).unwrap();
    assert_eq!(resolved.bytes, b"ok");
}

// ============================================================================
// SECTION: Failure Tests
// ============================================================================

#[test]
fn file_source_missing_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.txt");
    let error = FileSource::unrestricted().read(&path).unwrap_err();
    assert!(matches!(error, CodecError::NotFound(_)));
}

#[test]
fn file_source_directory_is_read_error() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("nested");
    fs::create_dir(&nested).unwrap();
    let error = FileSource::unrestricted().read(&nested).unwrap_err();
    assert!(matches!(error, CodecError::Read(_)));
}

#[test]
fn file_source_rejects_paths_outside_root() {
    let root = TempDir::new().unwrap();
    let other = TempDir::new().unwrap();
    let path = other.path().join("secret.txt");
    fs::write(&path, b"secret").unwrap();

    let error = FileSource::new(root.path()).read(&path).unwrap_err();
    match error {
        CodecError::Read(message) => assert!(message.contains("escapes")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn file_source_rejects_oversize_files() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("big.bin");
    fs::write(&path, vec![0_u8; MAX_ATTACHMENT_BYTES + 1]).unwrap();

    let error = FileSource::unrestricted().read(&path).unwrap_err();
    assert_eq!(
        error,
        CodecError::TooLarge {
            max_bytes: MAX_ATTACHMENT_BYTES,
            actual_bytes: MAX_ATTACHMENT_BYTES + 1,
        }
    );
}
