//! DogeConnect library.
//!
//! Point-of-sale payment requests for Dogecoin. A vendor shows a QR code with
//! a `dogecoin:` URI; a DogeConnect-aware wallet follows the Connect URL in it,
//! fetches a signed payment envelope from the gateway and checks it against
//! the public key hash that came with the QR code before showing anything.
//!
//! # Features
//!
//! - **Koinu amounts**: exact decimal parsing and formatting of DOGE amounts
//! - **Connect URIs**: encode and parse `dogecoin:` URIs with `dc` and `h` parameters
//! - **Envelopes**: sign and verify payment requests with BIP-340 Schnorr
//! - **Pluggable signatures**: the envelope protocol is written against [`SignatureScheme`]
//!
//! # Example
//!
//! ```
//! use dogeconnect_lib::{dogecoin_uri, parse_dogecoin_uri, Koinu};
//!
//! let amount: Koinu = "12.25".parse()?;
//! let uri = dogecoin_uri(
//!     "DPD7uK4B1kRmbfGmytBhG1DZjaMWNfbpwY",
//!     &amount.to_string(),
//!     "https://example.com/dc/1",
//!     &[7u8; 32],
//! );
//! let parsed = parse_dogecoin_uri(&uri)?;
//! assert_eq!(parsed.amount_koinu()?, Some(amount));
//! # Ok::<(), dogeconnect_lib::ConnectError>(())
//! ```

pub mod envelope;
pub mod errors;
pub mod keyhash;
pub mod koinu;
pub mod prelude;
pub mod protocol;
pub mod signer;
pub mod uri;

/// Test utilities for envelope testing.
///
/// This module is only available with the `test-utils` feature or in test builds.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use envelope::{
    payload_digest, sign_payment_request, sign_payment_request_with, verify_payment_request,
    verify_payment_request_for_uri, verify_payment_request_with,
};
pub use errors::{ConnectError, ConnectErrorCode, Remedy};
pub use keyhash::{encode_pub_key_hash, pub_key_hash};
pub use koinu::{parse_koinu, Koinu};
pub use protocol::{
    ConnectEnvelope, ConnectItem, ConnectOutput, ConnectPayment, ItemType, ProtocolVersion,
};
pub use signer::{Bip340, SignatureScheme, SigningKey};
pub use uri::{dogecoin_uri, parse_dogecoin_uri, ConnectUri};

/// Common result alias for DogeConnect operations.
pub type Result<T> = std::result::Result<T, ConnectError>;
