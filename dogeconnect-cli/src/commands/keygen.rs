//! Keygen command - create a gateway signing key

use anyhow::Result;
use dogeconnect_lib::keyhash::encode_pub_key_hash;
use dogeconnect_lib::{Bip340, SignatureScheme};

use crate::ui;

pub fn run(json: bool) -> Result<()> {
    let key = Bip340::generate_signing_key();
    let pub_key = Bip340.public_key(&key)?;
    let secret = key.to_hex();

    if json {
        ui::json(&serde_json::json!({
            "secret_key": secret.as_str(),
            "public_key": hex::encode(pub_key),
            "pub_key_hash": encode_pub_key_hash(&pub_key),
        }));
        return Ok(());
    }

    ui::header("Gateway Signing Key");
    ui::key_value("Secret Key", &secret);
    ui::key_value("Public Key", &hex::encode(pub_key));
    ui::key_value("Key Hash (h)", &encode_pub_key_hash(&pub_key));
    println!();
    ui::warning("Keep the secret key private; export it as DOGECONNECT_SECRET_KEY to sign");

    Ok(())
}
