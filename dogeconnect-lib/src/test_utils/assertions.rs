//! Assertion helpers for verification results.

use crate::errors::ConnectErrorCode;
use crate::protocol::ConnectPayment;
use crate::Result;

/// Assert that verification succeeded and produced `expected`.
///
/// # Panics
/// Panics if verification failed or returned a different payment.
pub fn assert_verified(result: &Result<ConnectPayment>, expected: &ConnectPayment) {
    match result {
        Ok(payment) => assert_eq!(payment, expected, "verified payment differs from expected"),
        Err(e) => panic!("Verification failed with error: {}", e),
    }
}

/// Assert that verification failed with the given error code.
///
/// # Panics
/// Panics if verification succeeded or failed with another code.
pub fn assert_rejected_with(result: &Result<ConnectPayment>, code: ConnectErrorCode) {
    match result {
        Ok(payment) => panic!(
            "Expected rejection with {:?}, but payment {} verified",
            code, payment.id
        ),
        Err(e) => assert_eq!(e.code(), code, "unexpected error: {}", e),
    }
}
