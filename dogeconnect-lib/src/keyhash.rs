//! Gateway public key hashes.
//!
//! A Connect URI carries the first 15 bytes of the SHA-256 of the gateway's
//! 32-byte X-only public key. 15 bytes is the longest digest prefix divisible
//! by 3, so its base64 form has no padding (20 characters).
//!
//! The hash is delivered over the trusted channel (QR code); the envelope
//! fetched from the gateway must carry a public key that hashes to the same
//! value before its signature means anything.

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Length in bytes of a gateway public key (BIP-340 X-only).
pub const PUB_KEY_LEN: usize = 32;

/// Length in bytes of a truncated public key hash.
pub const PUB_KEY_HASH_LEN: usize = 15;

/// Hash a gateway public key down to the 15-byte trust anchor.
///
/// # Panics
///
/// Panics if `pub_key` is not exactly 32 bytes. Passing anything else is a
/// programming error, not a recoverable condition.
pub fn pub_key_hash(pub_key: &[u8]) -> [u8; PUB_KEY_HASH_LEN] {
    assert_eq!(
        pub_key.len(),
        PUB_KEY_LEN,
        "invalid public key: expected {PUB_KEY_LEN} bytes"
    );
    truncated_sha256(pub_key)
}

/// Check that `pub_key` hashes to `hash` (constant-time comparison).
///
/// Any length mismatch on `hash` is simply a non-match.
pub fn pub_key_hash_matches(hash: &[u8], pub_key: &[u8]) -> bool {
    if hash.len() != PUB_KEY_HASH_LEN {
        return false;
    }
    let expected = truncated_sha256(pub_key);
    expected[..].ct_eq(hash).into()
}

/// Encode a public key's hash as URL-safe base64 (20 characters, no padding).
///
/// # Panics
///
/// Panics if `pub_key` is not exactly 32 bytes.
pub fn encode_pub_key_hash(pub_key: &[u8]) -> String {
    URL_SAFE.encode(pub_key_hash(pub_key))
}

fn truncated_sha256(data: &[u8]) -> [u8; PUB_KEY_HASH_LEN] {
    let digest = Sha256::digest(data);
    let mut out = [0u8; PUB_KEY_HASH_LEN];
    out.copy_from_slice(&digest[..PUB_KEY_HASH_LEN]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUB_KEY_HEX: &str = "6c52b17752f469c5411b977ba64725d40174d16e780b709b2aff68e0f5abfc50";

    #[test]
    fn test_hash_is_digest_prefix() {
        let pub_key = hex::decode(PUB_KEY_HEX).unwrap();
        let full = Sha256::digest(&pub_key);
        assert_eq!(pub_key_hash(&pub_key)[..], full[..PUB_KEY_HASH_LEN]);
    }

    #[test]
    fn test_encoded_hash_has_no_padding() {
        let pub_key = hex::decode(PUB_KEY_HEX).unwrap();
        let encoded = encode_pub_key_hash(&pub_key);
        assert_eq!(encoded, "72b-LVh5K_mm7zyN9PXO");
        assert_eq!(encoded.len(), 20);
        assert!(!encoded.contains('='));
    }

    #[test]
    fn test_matches() {
        let pub_key = hex::decode(PUB_KEY_HEX).unwrap();
        let hash = pub_key_hash(&pub_key);
        assert!(pub_key_hash_matches(&hash, &pub_key));

        let mut other = pub_key.clone();
        other[0] ^= 1;
        assert!(!pub_key_hash_matches(&hash, &other));
    }

    #[test]
    fn test_matches_rejects_wrong_hash_length() {
        let pub_key = hex::decode(PUB_KEY_HEX).unwrap();
        let hash = pub_key_hash(&pub_key);
        assert!(!pub_key_hash_matches(&hash[..14], &pub_key));
        assert!(!pub_key_hash_matches(&[], &pub_key));
    }

    #[test]
    #[should_panic(expected = "invalid public key")]
    fn test_hash_panics_on_wrong_length() {
        pub_key_hash(&[0u8; 33]);
    }
}
