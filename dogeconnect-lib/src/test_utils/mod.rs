//! Test utilities for DogeConnect.
//!
//! This module provides:
//! - A deterministic fake [`SignatureScheme`](crate::signer::SignatureScheme)
//!   for exercising the envelope protocol without curve arithmetic
//! - Fixtures taken from a real gateway payment request
//! - Assertion helpers for verification results
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dogeconnect_lib::envelope::{sign_payment_request_with, verify_payment_request_with};
//! use dogeconnect_lib::test_utils::{sample_payment, test_signing_key, FakeScheme};
//!
//! let key = test_signing_key("gateway");
//! let envelope = sign_payment_request_with(&FakeScheme, &sample_payment(), &key)?;
//! ```

mod assertions;
mod fake_scheme;
mod fixtures;

pub use assertions::{assert_rejected_with, assert_verified};
pub use fake_scheme::FakeScheme;
pub use fixtures::{sample_payment, test_signing_key, TestFixtures};
