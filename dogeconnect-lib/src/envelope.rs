//! Signing and verifying payment envelopes.
//!
//! ## Security Model
//!
//! The gateway serializes a [`ConnectPayment`] to JSON, double-SHA256s the
//! exact bytes and signs the digest with BIP-340 Schnorr. The wallet trusts a
//! fetched envelope only if:
//!
//! 1. its version is supported,
//! 2. its public key hashes to the `h` value from the scanned URI,
//! 3. the signature verifies against that key, and
//! 4. the payload is a payment request.
//!
//! A valid signature on its own only shows that *some* key signed the
//! payload. The key hash check is what ties the envelope to the QR code, so
//! it runs before the signature is even parsed.
//!
//! Every failure is terminal for that verification attempt.

use crate::keyhash::pub_key_hash_matches;
use crate::protocol::{ConnectEnvelope, ConnectPayment, ProtocolVersion};
use crate::signer::{Bip340, PayloadDigest, SignatureScheme, SigningKey};
use crate::uri::ConnectUri;
use crate::{ConnectError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

/// Double-SHA256 of the serialized payload bytes.
///
/// The digest is `SHA256(SHA256(payload))`; it is never collapsed to a
/// single hash.
pub fn payload_digest(payload: &[u8]) -> PayloadDigest {
    let first = Sha256::digest(payload);
    Sha256::digest(first).into()
}

/// Sign a payment request with BIP-340 Schnorr.
///
/// # Examples
///
/// ```rust
/// use dogeconnect_lib::envelope::{sign_payment_request, verify_payment_request};
/// use dogeconnect_lib::keyhash::pub_key_hash;
/// use dogeconnect_lib::protocol::{ConnectOutput, ConnectPayment};
/// use dogeconnect_lib::signer::{Bip340, SignatureScheme};
/// use dogeconnect_lib::Koinu;
///
/// let key = Bip340::generate_signing_key();
/// let payment = ConnectPayment::new("101", "2025-02-19T14:07:20+11:00", 30)
///     .with_output(ConnectOutput::new("DPD7uK4B1kRmbfGmytBhG1DZjaMWNfbpwY", Koinu::ONE_DOGE));
///
/// let envelope = sign_payment_request(&payment, &key)?;
/// let hash = pub_key_hash(&Bip340.public_key(&key)?);
/// assert_eq!(verify_payment_request(&envelope, &hash)?, payment);
/// # Ok::<(), dogeconnect_lib::ConnectError>(())
/// ```
pub fn sign_payment_request(payment: &ConnectPayment, key: &SigningKey) -> Result<ConnectEnvelope> {
    sign_payment_request_with(&Bip340, payment, key)
}

/// Sign a payment request with an explicit signature scheme.
///
/// The payment is validated first, so a gateway cannot sign amounts that
/// would lose precision in a wallet.
///
/// # Errors
///
/// - [`ConnectError::InvalidPayment`] / [`ConnectError::Timestamp`] if validation fails.
/// - [`ConnectError::InvalidSigningKey`] if the scheme rejects the key.
/// - [`ConnectError::Serialization`] if the payment cannot be encoded.
#[tracing::instrument(skip_all, fields(payment_id = %payment.id))]
pub fn sign_payment_request_with<S: SignatureScheme>(
    scheme: &S,
    payment: &ConnectPayment,
    key: &SigningKey,
) -> Result<ConnectEnvelope> {
    payment.validate()?;

    // struct fields serialize in declaration order, so this is deterministic
    let payload = serde_json::to_vec(payment)?;
    let digest = payload_digest(&payload);

    let pub_key = scheme.public_key(key)?;
    let signature = scheme.sign(key, &digest)?;

    debug!(payload_len = payload.len(), "signed payment request");

    Ok(ConnectEnvelope {
        version: ProtocolVersion::CURRENT.as_str().to_string(),
        payload: STANDARD.encode(&payload),
        pub_key: hex::encode(pub_key),
        signature: hex::encode(signature),
    })
}

/// Verify an envelope with BIP-340 Schnorr against the `h` hash from a Connect URI.
pub fn verify_payment_request(
    envelope: &ConnectEnvelope,
    pub_key_hash: &[u8],
) -> Result<ConnectPayment> {
    verify_payment_request_with(&Bip340, envelope, pub_key_hash)
}

/// Verify an envelope against the key hash carried by a parsed Connect URI.
///
/// A URI without a well-formed hash can never match, so it fails with
/// [`ConnectError::KeyMismatch`].
pub fn verify_payment_request_for_uri(
    envelope: &ConnectEnvelope,
    uri: &ConnectUri,
) -> Result<ConnectPayment> {
    verify_payment_request(envelope, &uri.pub_key_hash)
}

/// Verify an envelope with an explicit signature scheme.
///
/// Checks run in a fixed order and stop at the first failure:
///
/// 1. version ([`ConnectError::UnsupportedVersion`])
/// 2. hex/base64 field decoding ([`ConnectError::MalformedEnvelope`])
/// 3. public key hash ([`ConnectError::KeyMismatch`])
/// 4. key and signature encodings ([`ConnectError::InvalidKeyOrSignature`])
/// 5. signature over the double-SHA256 digest ([`ConnectError::SignatureInvalid`])
/// 6. payload type and shape ([`ConnectError::WrongPayloadType`],
///    [`ConnectError::MalformedEnvelope`])
#[tracing::instrument(skip_all, fields(version = %envelope.version))]
pub fn verify_payment_request_with<S: SignatureScheme>(
    scheme: &S,
    envelope: &ConnectEnvelope,
    pub_key_hash: &[u8],
) -> Result<ConnectPayment> {
    match verify_envelope(scheme, envelope, pub_key_hash) {
        Ok(payment) => {
            debug!(payment_id = %payment.id, "verified payment request");
            Ok(payment)
        }
        Err(err) => {
            warn!(code = ?err.code(), "rejected envelope: {err}");
            Err(err)
        }
    }
}

fn verify_envelope<S: SignatureScheme>(
    scheme: &S,
    envelope: &ConnectEnvelope,
    pub_key_hash: &[u8],
) -> Result<ConnectPayment> {
    let version = ProtocolVersion::parse(&envelope.version)?;

    let pub_key = hex::decode(&envelope.pub_key).map_err(|_| ConnectError::MalformedEnvelope {
        field: "pubkey hex",
    })?;
    let signature =
        hex::decode(&envelope.signature).map_err(|_| ConnectError::MalformedEnvelope {
            field: "signature hex",
        })?;
    let payload = STANDARD
        .decode(&envelope.payload)
        .map_err(|_| ConnectError::MalformedEnvelope {
            field: "base64 payload",
        })?;

    if !pub_key_hash_matches(pub_key_hash, &pub_key) {
        return Err(ConnectError::KeyMismatch);
    }

    let digest = payload_digest(&payload);

    let key = scheme
        .parse_public_key(&pub_key)
        .ok_or(ConnectError::InvalidKeyOrSignature("pubkey"))?;
    let signature = scheme
        .parse_signature(&signature)
        .ok_or(ConnectError::InvalidKeyOrSignature("signature"))?;

    if !scheme.verify(&digest, &key, &signature) {
        return Err(ConnectError::SignatureInvalid);
    }

    version.decode_payment(&payload)
}
