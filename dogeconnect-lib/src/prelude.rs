//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use dogeconnect_lib::prelude::*;
//! ```

// Amounts
pub use crate::koinu::{parse_koinu, Koinu, MAX_MONEY, ONE_DOGE};

// Error handling
pub use crate::errors::{ConnectError, ConnectErrorCode, Remedy};
pub use crate::Result;

// URIs
pub use crate::uri::{dogecoin_uri, parse_dogecoin_uri, ConnectUri};

// Protocol records
pub use crate::protocol::{
    ConnectEnvelope, ConnectItem, ConnectOutput, ConnectPayment, ItemType, ProtocolVersion,
};

// Signing
pub use crate::envelope::{sign_payment_request, verify_payment_request};
pub use crate::signer::{Bip340, SignatureScheme, SigningKey};
