// crates/jira-bridge-broker/src/digest.rs
// ============================================================================
// Module: Attachment Digest
// Description: SHA-256 content addressing for attachment bytes.
// Purpose: Report a stable content address for uploaded attachments.
// Dependencies: sha2
// ============================================================================

//! ## Overview
//! Attachment bytes are addressed by their lowercase hex SHA-256 digest, the
//! same form reported in upload results.

use sha2::Digest;
use sha2::Sha256;

/// Returns the lowercase hex SHA-256 digest of the bytes.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    hex_encode(&digest)
}

/// Encodes bytes as a lowercase hex string.
fn hex_encode(bytes: &[u8]) -> String {
    /// Lowercase hex alphabet.
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(char::from(HEX[usize::from(byte >> 4)]));
        out.push(char::from(HEX[usize::from(byte & 0x0f)]));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::sha256_hex;

    #[test]
    fn digest_matches_known_vectors() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
