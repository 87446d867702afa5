//! Signature schemes for payment envelopes.
//!
//! Envelope signing and verification are written against the
//! [`SignatureScheme`] trait so the protocol can be exercised with a
//! deterministic fake (see `test_utils`) as well as the real BIP-340 Schnorr
//! scheme ([`Bip340`]).
//!
//! ## Key handling
//!
//! Secret key bytes live in a [`SigningKey`], which zeroizes its memory on
//! drop. Any curve keypair derived from it is erased when it goes out of
//! scope, including on early error returns.

use crate::keyhash::PUB_KEY_LEN;
use crate::{ConnectError, Result};
use rand::RngCore;
use secp256k1::{schnorr, All, Keypair, Message, Secp256k1, SecretKey, XOnlyPublicKey, SECP256K1};
use std::fmt;
use zeroize::Zeroizing;

/// Length in bytes of a secret key.
pub const SECRET_KEY_LEN: usize = 32;

/// Length in bytes of a signature.
pub const SIGNATURE_LEN: usize = 64;

/// Double-SHA256 digest of a payload.
pub type PayloadDigest = [u8; 32];

/// A gateway secret key.
///
/// The bytes are zeroized when the key is dropped. `Debug` never prints them.
pub struct SigningKey(Zeroizing<[u8; SECRET_KEY_LEN]>);

impl SigningKey {
    /// Create from raw secret key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectError::InvalidSigningKey`] unless `bytes` is 32 bytes long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SECRET_KEY_LEN {
            return Err(ConnectError::InvalidSigningKey);
        }
        let mut secret = Zeroizing::new([0u8; SECRET_KEY_LEN]);
        secret.copy_from_slice(bytes);
        Ok(Self(secret))
    }

    /// Create from a hex-encoded secret key.
    pub fn from_hex(hex_key: &str) -> Result<Self> {
        let bytes = Zeroizing::new(
            hex::decode(hex_key.trim()).map_err(|_| ConnectError::InvalidSigningKey)?,
        );
        Self::from_bytes(&bytes)
    }

    /// Hex-encode the secret (for key export). The returned string is zeroized on drop.
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(&self.0[..]))
    }

    /// Borrow the secret bytes.
    pub fn secret_bytes(&self) -> &[u8; SECRET_KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(<redacted>)")
    }
}

/// A signer/verifier capability used by the envelope protocol.
pub trait SignatureScheme {
    /// Parsed public key form used for verification.
    type PublicKey;
    /// Parsed signature form used for verification.
    type Signature;

    /// Derive the 32-byte public key of a signing key.
    fn public_key(&self, key: &SigningKey) -> Result<[u8; PUB_KEY_LEN]>;

    /// Sign a payload digest.
    fn sign(&self, key: &SigningKey, digest: &PayloadDigest) -> Result<[u8; SIGNATURE_LEN]>;

    /// Parse public key bytes, `None` if they are not a valid key.
    fn parse_public_key(&self, bytes: &[u8]) -> Option<Self::PublicKey>;

    /// Parse signature bytes, `None` if they are not a valid signature encoding.
    fn parse_signature(&self, bytes: &[u8]) -> Option<Self::Signature>;

    /// Check a signature over a digest.
    fn verify(
        &self,
        digest: &PayloadDigest,
        pub_key: &Self::PublicKey,
        signature: &Self::Signature,
    ) -> bool;
}

/// BIP-340 Schnorr signatures over secp256k1 with X-only public keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bip340;

impl Bip340 {
    /// Generate a random signing key accepted by the curve.
    pub fn generate_signing_key() -> SigningKey {
        let mut rng = rand::thread_rng();
        loop {
            let mut secret = Zeroizing::new([0u8; SECRET_KEY_LEN]);
            rng.fill_bytes(&mut secret[..]);
            if let Ok(mut check) = SecretKey::from_slice(&secret[..]) {
                check.non_secure_erase();
                return SigningKey(secret);
            }
        }
    }
}

/// Keypair that is erased when dropped.
struct ScopedKeypair(Keypair);

impl ScopedKeypair {
    fn new(key: &SigningKey) -> Result<Self> {
        Keypair::from_seckey_slice(secp(), key.secret_bytes())
            .map(Self)
            .map_err(|_| ConnectError::InvalidSigningKey)
    }
}

impl Drop for ScopedKeypair {
    fn drop(&mut self) {
        self.0.non_secure_erase();
    }
}

fn secp() -> &'static Secp256k1<All> {
    SECP256K1
}

impl SignatureScheme for Bip340 {
    type PublicKey = XOnlyPublicKey;
    type Signature = schnorr::Signature;

    fn public_key(&self, key: &SigningKey) -> Result<[u8; PUB_KEY_LEN]> {
        let keypair = ScopedKeypair::new(key)?;
        let (x_only, _parity) = keypair.0.x_only_public_key();
        Ok(x_only.serialize())
    }

    fn sign(&self, key: &SigningKey, digest: &PayloadDigest) -> Result<[u8; SIGNATURE_LEN]> {
        let keypair = ScopedKeypair::new(key)?;
        let message = Message::from_digest(*digest);
        let signature = secp().sign_schnorr_no_aux_rand(&message, &keypair.0);
        Ok(signature.serialize())
    }

    fn parse_public_key(&self, bytes: &[u8]) -> Option<XOnlyPublicKey> {
        XOnlyPublicKey::from_slice(bytes).ok()
    }

    fn parse_signature(&self, bytes: &[u8]) -> Option<schnorr::Signature> {
        schnorr::Signature::from_slice(bytes).ok()
    }

    fn verify(
        &self,
        digest: &PayloadDigest,
        pub_key: &XOnlyPublicKey,
        signature: &schnorr::Signature,
    ) -> bool {
        let message = Message::from_digest(*digest);
        secp()
            .verify_schnorr(signature, &message, pub_key)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // BIP-340 test vector 0
    const SECRET_HEX: &str = "0000000000000000000000000000000000000000000000000000000000000003";
    const PUBLIC_HEX: &str = "f9308a019258c31049344f85f89d5229b531c845836f99b08601f113bce036f9";

    #[test]
    fn test_public_key_derivation_matches_bip340_vector() {
        let key = SigningKey::from_hex(SECRET_HEX).unwrap();
        let pub_key = Bip340.public_key(&key).unwrap();
        assert_eq!(hex::encode(pub_key), PUBLIC_HEX);
    }

    #[test]
    fn test_sign_and_verify() {
        let key = Bip340::generate_signing_key();
        let pub_key = Bip340.public_key(&key).unwrap();
        let digest = [9u8; 32];

        let sig = Bip340.sign(&key, &digest).unwrap();
        let parsed_key = Bip340.parse_public_key(&pub_key).unwrap();
        let parsed_sig = Bip340.parse_signature(&sig).unwrap();
        assert!(Bip340.verify(&digest, &parsed_key, &parsed_sig));

        let other_digest = [8u8; 32];
        assert!(!Bip340.verify(&other_digest, &parsed_key, &parsed_sig));
    }

    #[test]
    fn test_signing_is_deterministic() {
        let key = SigningKey::from_hex(SECRET_HEX).unwrap();
        let digest = [1u8; 32];
        assert_eq!(
            Bip340.sign(&key, &digest).unwrap(),
            Bip340.sign(&key, &digest).unwrap()
        );
    }

    #[test]
    fn test_invalid_secret_keys() {
        assert_eq!(
            SigningKey::from_bytes(&[1u8; 31]).unwrap_err(),
            ConnectError::InvalidSigningKey
        );
        assert_eq!(
            SigningKey::from_hex("zz").unwrap_err(),
            ConnectError::InvalidSigningKey
        );

        // zero is not a valid secp256k1 secret
        let zero = SigningKey::from_bytes(&[0u8; 32]).unwrap();
        assert_eq!(
            Bip340.public_key(&zero).unwrap_err(),
            ConnectError::InvalidSigningKey
        );
        assert_eq!(
            Bip340.sign(&zero, &[0u8; 32]).unwrap_err(),
            ConnectError::InvalidSigningKey
        );
    }

    #[test]
    fn test_parse_rejects_bad_encodings() {
        assert!(Bip340.parse_public_key(&[0u8; 31]).is_none());
        // x = p is not a field element
        let not_on_curve =
            hex::decode("fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f")
                .unwrap();
        assert!(Bip340.parse_public_key(&not_on_curve).is_none());
        assert!(Bip340.parse_signature(&[0u8; 63]).is_none());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let key = SigningKey::from_hex(SECRET_HEX).unwrap();
        let debug = format!("{key:?}");
        assert!(!debug.contains("03"));
        assert_eq!(key.to_hex().as_str(), SECRET_HEX);
    }
}
