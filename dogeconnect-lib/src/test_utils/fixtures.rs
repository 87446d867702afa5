//! Test fixtures and data generators.

use crate::protocol::{ConnectItem, ConnectOutput, ConnectPayment, ItemType, PAYMENT_REQUEST_TYPE};
use crate::signer::SigningKey;
use sha2::{Digest, Sha256};

/// Collection of commonly used test fixtures.
pub struct TestFixtures;

impl TestFixtures {
    /// Dogecoin mainnet addresses used as pay-to outputs.
    pub const PAY_TO_ADDRESSES: &'static [&'static str] = &[
        "DPD7uK4B1kRmbfGmytBhG1DZjaMWNfbpwY",
        "DTG6vtXMfmjsitw4JkjJKb5SXH1hcNxn3n",
    ];

    /// Gateway public key whose URL-safe hash is [`Self::GATEWAY_PUB_KEY_HASH`].
    pub const GATEWAY_PUB_KEY_HEX: &'static str =
        "6c52b17752f469c5411b977ba64725d40174d16e780b709b2aff68e0f5abfc50";

    /// URL-safe base64 hash of [`Self::GATEWAY_PUB_KEY_HEX`].
    pub const GATEWAY_PUB_KEY_HASH: &'static str = "72b-LVh5K_mm7zyN9PXO";

    /// Connect URL of the sample payment request.
    pub const CONNECT_URL: &'static str = "https://example.com/dc/1QAB-POvTh2R88nybE8Wwg";
}

/// Create a deterministic signing key from a seed string.
///
/// The key is the SHA-256 of the seed, which is a valid secp256k1 secret for
/// any seed a test would realistically use.
pub fn test_signing_key(seed: &str) -> SigningKey {
    let secret: [u8; 32] = Sha256::digest(seed.as_bytes()).into();
    match SigningKey::from_bytes(&secret) {
        Ok(key) => key,
        Err(_) => unreachable!("sha256 output is always 32 bytes"),
    }
}

/// The payment request a gateway issued for "Example Co".
///
/// One item, a fee, and two outputs that add up to the total.
pub fn sample_payment() -> ConnectPayment {
    ConnectPayment {
        kind: PAYMENT_REQUEST_TYPE.to_string(),
        id: "101".to_string(),
        issued: "2025-02-19T14:07:20+11:00".to_string(),
        timeout: 30,
        gateway: TestFixtures::CONNECT_URL.to_string(),
        vendor_icon: "https://static.example.com/vnd/1234/icon.png".to_string(),
        vendor_name: "Example Co".to_string(),
        vendor_address: "123 Example St".to_string(),
        total: "420.69".to_string(),
        fees: "6.31035".to_string(),
        taxes: "0".to_string(),
        items: vec![ConnectItem {
            item_type: ItemType::Item,
            id: "123".to_string(),
            icon: "https://static.example.com/vnd/1234/item/123.png".to_string(),
            name: "Good Item".to_string(),
            description: "Best item in the store".to_string(),
            unit_count: 1,
            unit_cost: "414.37965".to_string(),
            total: "414.37965".to_string(),
        }],
        outputs: vec![
            ConnectOutput {
                address: TestFixtures::PAY_TO_ADDRESSES[0].to_string(),
                amount: "414.37965".to_string(),
            },
            ConnectOutput {
                address: TestFixtures::PAY_TO_ADDRESSES[1].to_string(),
                amount: "6.31035".to_string(),
            },
        ],
    }
}
