//! Sign command - wrap a payment request in a signed envelope

use anyhow::{Context, Result};
use dogeconnect_lib::{sign_payment_request, ConnectPayment};
use std::path::Path;
use zeroize::Zeroizing;

use crate::ui;

pub fn run(payment_path: &str, output: Option<&Path>, key: Option<Zeroizing<String>>) -> Result<()> {
    let signing_key = super::load_signing_key(key.as_ref())?;
    drop(key);

    let text = super::read_input(payment_path)?;
    let payment: ConnectPayment =
        serde_json::from_str(&text).context("Payment request is not valid JSON")?;

    let envelope = sign_payment_request(&payment, &signing_key)
        .with_context(|| format!("Failed to sign payment request '{}'", payment.id))?;
    let json = serde_json::to_string_pretty(&envelope)?;

    match output {
        Some(path) => {
            std::fs::write(path, json + "\n")
                .with_context(|| format!("Failed to write {}", path.display()))?;
            ui::success(&format!("Signed envelope written to {}", path.display()));
        }
        None => println!("{json}"),
    }

    tracing::info!(payment_id = %payment.id, "signed payment request");
    Ok(())
}
