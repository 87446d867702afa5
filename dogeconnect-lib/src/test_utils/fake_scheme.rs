//! Deterministic fake signature scheme.

use crate::keyhash::PUB_KEY_LEN;
use crate::signer::{PayloadDigest, SignatureScheme, SigningKey, SIGNATURE_LEN};
use crate::Result;
use sha2::{Digest, Sha256};

/// A signature scheme built from SHA-256 that behaves like a real one for
/// protocol tests.
///
/// The public key is a hash of the secret and a signature is two hashes of
/// the public key and the digest. Anyone can forge these signatures; never use
/// it outside tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct FakeScheme;

impl FakeScheme {
    fn expected_signature(pub_key: &[u8; PUB_KEY_LEN], digest: &PayloadDigest) -> [u8; SIGNATURE_LEN] {
        let mut sig = [0u8; SIGNATURE_LEN];
        let left = Sha256::new().chain_update(pub_key).chain_update(digest).finalize();
        let right = Sha256::new().chain_update(digest).chain_update(pub_key).finalize();
        sig[..32].copy_from_slice(&left);
        sig[32..].copy_from_slice(&right);
        sig
    }
}

impl SignatureScheme for FakeScheme {
    type PublicKey = [u8; PUB_KEY_LEN];
    type Signature = [u8; SIGNATURE_LEN];

    fn public_key(&self, key: &SigningKey) -> Result<[u8; PUB_KEY_LEN]> {
        Ok(Sha256::new()
            .chain_update(b"fake-pubkey")
            .chain_update(key.secret_bytes())
            .finalize()
            .into())
    }

    fn sign(&self, key: &SigningKey, digest: &PayloadDigest) -> Result<[u8; SIGNATURE_LEN]> {
        let pub_key = self.public_key(key)?;
        Ok(Self::expected_signature(&pub_key, digest))
    }

    fn parse_public_key(&self, bytes: &[u8]) -> Option<[u8; PUB_KEY_LEN]> {
        bytes.try_into().ok()
    }

    fn parse_signature(&self, bytes: &[u8]) -> Option<[u8; SIGNATURE_LEN]> {
        bytes.try_into().ok()
    }

    fn verify(
        &self,
        digest: &PayloadDigest,
        pub_key: &[u8; PUB_KEY_LEN],
        signature: &[u8; SIGNATURE_LEN],
    ) -> bool {
        Self::expected_signature(pub_key, digest) == *signature
    }
}
