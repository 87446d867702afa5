//! Error types for DogeConnect operations.
//!
//! Every failure is reported synchronously as a distinct variant the caller
//! can branch on. Nothing in this crate retries; the caller decides whether to
//! re-fetch an envelope and run verification again.

/// Error codes for FFI and mobile integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ConnectErrorCode {
    /// Unexpected character in a decimal amount
    InvalidNumber = 1000,
    /// Amount outside the MaxMoney bound
    MaxMoneyExceeded = 1001,
    /// URI does not use the `dogecoin:` scheme
    NotAConnectUri = 2000,
    /// Envelope version is not supported
    UnsupportedVersion = 3000,
    /// Envelope field failed to decode
    MalformedEnvelope = 3001,
    /// Envelope public key does not match the trusted hash
    KeyMismatch = 3002,
    /// Public key or signature rejected by the signature scheme
    InvalidKeyOrSignature = 3003,
    /// Signature does not verify
    SignatureInvalid = 3004,
    /// Payload is not a payment request
    WrongPayloadType = 3005,
    /// Signing key rejected by the curve
    InvalidSigningKey = 3100,
    /// Payment request failed gateway-side validation
    InvalidPayment = 4000,
    /// Payment issue time is not RFC 3339
    Timestamp = 4001,
    /// Canonical serialization failed
    Serialization = 9000,
}

/// What a caller should do about a failed verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remedy {
    /// The envelope cannot be trusted as delivered; fetch it again from the gateway.
    Refetch,
    /// The input is malformed; give up on this payment.
    Abort,
    /// The envelope uses a protocol version this wallet does not speak.
    Upgrade,
}

/// Comprehensive error type for DogeConnect operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectError {
    /// Unexpected character in a decimal amount.
    #[error("invalid number (unexpected character)")]
    InvalidNumber,

    /// Amount magnitude is greater than MaxMoney.
    #[error("greater than max-money (10,000,000,000 DOGE)")]
    MaxMoneyExceeded,

    /// The URI is not a `dogecoin:` URI.
    #[error("invalid uri: not a 'dogecoin' uri")]
    NotAConnectUri,

    /// Envelope version does not match a supported protocol version.
    #[error("invalid envelope: unsupported version '{0}'")]
    UnsupportedVersion(String),

    /// An envelope field could not be decoded from its wire encoding.
    #[error("invalid envelope: malformed {field}")]
    MalformedEnvelope {
        /// Which envelope field failed (e.g. "pubkey hex", "base64 payload")
        field: &'static str,
    },

    /// The envelope was signed by a key other than the one the URI vouches for.
    #[error("invalid envelope: wrong public key")]
    KeyMismatch,

    /// Public key or signature bytes are not valid for the signature scheme.
    #[error("invalid envelope: not a valid {0}")]
    InvalidKeyOrSignature(&'static str),

    /// Signature verification failed.
    #[error("invalid envelope: incorrect signature")]
    SignatureInvalid,

    /// The signed payload is not a payment request.
    #[error("bad envelope: not a payment request (type '{0}')")]
    WrongPayloadType(String),

    /// Secret key bytes were rejected when deriving a keypair.
    #[error("invalid signing key")]
    InvalidSigningKey,

    /// A payment request failed validation before signing.
    #[error("invalid payment {field}: {reason}")]
    InvalidPayment {
        /// Field or item path (e.g. "total", "items[0].cost")
        field: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Payment issue time could not be parsed.
    #[error("invalid issued timestamp: {0}")]
    Timestamp(String),

    /// Canonical serialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl ConnectError {
    /// Get the error code for FFI/mobile integration.
    pub fn code(&self) -> ConnectErrorCode {
        match self {
            Self::InvalidNumber => ConnectErrorCode::InvalidNumber,
            Self::MaxMoneyExceeded => ConnectErrorCode::MaxMoneyExceeded,
            Self::NotAConnectUri => ConnectErrorCode::NotAConnectUri,
            Self::UnsupportedVersion(_) => ConnectErrorCode::UnsupportedVersion,
            Self::MalformedEnvelope { .. } => ConnectErrorCode::MalformedEnvelope,
            Self::KeyMismatch => ConnectErrorCode::KeyMismatch,
            Self::InvalidKeyOrSignature(_) => ConnectErrorCode::InvalidKeyOrSignature,
            Self::SignatureInvalid => ConnectErrorCode::SignatureInvalid,
            Self::WrongPayloadType(_) => ConnectErrorCode::WrongPayloadType,
            Self::InvalidSigningKey => ConnectErrorCode::InvalidSigningKey,
            Self::InvalidPayment { .. } => ConnectErrorCode::InvalidPayment,
            Self::Timestamp(_) => ConnectErrorCode::Timestamp,
            Self::Serialization(_) => ConnectErrorCode::Serialization,
        }
    }

    /// Get the error message as an owned String (useful for FFI).
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Returns true for the error kinds produced by envelope verification.
    pub fn is_verification_failure(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedVersion(_)
                | Self::MalformedEnvelope { .. }
                | Self::KeyMismatch
                | Self::InvalidKeyOrSignature(_)
                | Self::SignatureInvalid
                | Self::WrongPayloadType(_)
        )
    }

    /// Suggested remediation for a verification failure.
    ///
    /// Returns `None` for errors that are not produced by verification.
    pub fn remedy(&self) -> Option<Remedy> {
        match self {
            Self::UnsupportedVersion(_) => Some(Remedy::Upgrade),
            Self::KeyMismatch | Self::SignatureInvalid => Some(Remedy::Refetch),
            Self::MalformedEnvelope { .. }
            | Self::InvalidKeyOrSignature(_)
            | Self::WrongPayloadType(_) => Some(Remedy::Abort),
            _ => None,
        }
    }

    /// Create an invalid payment error.
    pub fn invalid_payment(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPayment {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for ConnectError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
