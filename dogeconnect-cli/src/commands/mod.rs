//! CLI command implementations

pub mod amount;
pub mod keygen;
pub mod sign;
pub mod uri;
pub mod verify;

use anyhow::{Context, Result};
use dogeconnect_lib::SigningKey;
use std::io::Read;
use zeroize::Zeroizing;

/// Move a secret key argument into storage that is wiped on drop.
pub fn secret_key(key: Option<String>) -> Option<Zeroizing<String>> {
    key.map(Zeroizing::new)
}

/// Parse the secret key given via `--key` or `DOGECONNECT_SECRET_KEY`.
pub fn load_signing_key(key: Option<&Zeroizing<String>>) -> Result<SigningKey> {
    let key = key.context("no secret key: pass --key or set DOGECONNECT_SECRET_KEY")?;
    SigningKey::from_hex(key).context("secret key must be 64 hex characters")
}

/// Read a file, or stdin when the path is "-".
pub fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))
    }
}
