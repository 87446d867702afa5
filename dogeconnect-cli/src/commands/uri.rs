//! URI commands - build and inspect dogecoin: URIs

use anyhow::{Context, Result};
use dogeconnect_lib::keyhash::PUB_KEY_LEN;
use dogeconnect_lib::{dogecoin_uri, parse_dogecoin_uri, parse_koinu, Bip340, SignatureScheme};
use zeroize::Zeroizing;

use crate::ui;

pub fn encode(
    address: &str,
    amount: &str,
    connect_url: &str,
    pubkey: Option<&str>,
    key: Option<Zeroizing<String>>,
) -> Result<()> {
    // the amount goes into the URI as typed, but it must be a valid one
    parse_koinu(amount).with_context(|| format!("Invalid amount '{amount}'"))?;

    let pub_key = match pubkey {
        Some(hex_key) => {
            let bytes = hex::decode(hex_key.trim()).context("public key is not hex")?;
            anyhow::ensure!(
                bytes.len() == PUB_KEY_LEN,
                "public key must be {PUB_KEY_LEN} bytes, got {}",
                bytes.len()
            );
            bytes
        }
        None => {
            let signing_key = super::load_signing_key(key.as_ref())
                .context("need --pubkey, or a secret key to derive it from")?;
            Bip340.public_key(&signing_key)?.to_vec()
        }
    };

    let uri = dogecoin_uri(address, amount, connect_url, &pub_key);
    tracing::debug!(%uri, "encoded connect uri");
    println!("{uri}");
    Ok(())
}

pub fn decode(uri: &str, verbose: bool) -> Result<()> {
    let parsed = parse_dogecoin_uri(uri).context("Not a dogecoin: URI")?;

    ui::header("Dogecoin URI");
    ui::key_value("Address", &parsed.address);
    if !parsed.amount.is_empty() {
        match parsed.amount_koinu() {
            Ok(Some(amount)) => ui::key_value("Amount", &format!("{amount} DOGE")),
            Ok(None) => {}
            Err(e) => ui::key_value("Amount", &format!("{} ({e})", parsed.amount)),
        }
    }

    if parsed.is_connect_uri() {
        ui::key_value("Connect URL", &format!("https://{}", parsed.connect_url));
        ui::key_value("Key Hash", &hex::encode(&parsed.pub_key_hash));
        println!();
        ui::success("DogeConnect payment URI");
    } else {
        if verbose && !parsed.connect_url.is_empty() {
            ui::key_value("Connect URL", &parsed.connect_url);
        }
        println!();
        ui::info("Plain payment URI (no DogeConnect gateway)");
    }

    Ok(())
}
