//! Verify command - check an envelope against a trusted key hash

use anyhow::{Context, Result};
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use chrono::Utc;
use dogeconnect_lib::{
    parse_dogecoin_uri, verify_payment_request, ConnectEnvelope, ConnectError, ConnectPayment,
    Remedy,
};

use crate::ui;

/// Where the trusted public key hash comes from.
pub enum TrustAnchor {
    /// URL-safe base64 hash, as in the `h` parameter.
    Hash(String),
    /// A full scanned URI.
    Uri(String),
}

impl TrustAnchor {
    fn pub_key_hash(&self) -> Result<Vec<u8>> {
        match self {
            Self::Hash(hash) => URL_SAFE
                .decode(hash.trim())
                .context("key hash is not URL-safe base64"),
            Self::Uri(uri) => {
                let parsed = parse_dogecoin_uri(uri).context("Not a dogecoin: URI")?;
                anyhow::ensure!(parsed.is_connect_uri(), "URI has no DogeConnect key hash");
                Ok(parsed.pub_key_hash)
            }
        }
    }
}

pub fn run(envelope_path: &str, trust: &TrustAnchor, json: bool) -> Result<()> {
    let hash = trust.pub_key_hash()?;
    let text = super::read_input(envelope_path)?;
    let envelope: ConnectEnvelope =
        serde_json::from_str(&text).context("Envelope is not valid JSON")?;

    let payment = match verify_payment_request(&envelope, &hash) {
        Ok(payment) => payment,
        Err(err) => {
            ui::error(&format!("Envelope rejected: {err}"));
            if let Some(hint) = remedy_hint(&err) {
                ui::info(hint);
            }
            return Err(err.into());
        }
    };

    if json {
        ui::json(&serde_json::to_value(&payment)?);
        return Ok(());
    }

    print_payment(&payment);
    Ok(())
}

fn remedy_hint(err: &ConnectError) -> Option<&'static str> {
    match err.remedy()? {
        Remedy::Refetch => Some("The envelope cannot be trusted; fetch it again from the gateway"),
        Remedy::Abort => Some("The envelope is malformed; do not pay this request"),
        Remedy::Upgrade => Some("This envelope needs a newer DogeConnect version"),
    }
}

fn print_payment(payment: &ConnectPayment) {
    ui::success("Signature verified");
    ui::header(&format!("Payment Request {}", payment.id));
    ui::key_value("Vendor", &payment.vendor_name);
    if !payment.vendor_address.is_empty() {
        ui::key_value("Address", &payment.vendor_address);
    }
    ui::key_value("Issued", &payment.issued);

    ui::separator();
    for item in &payment.items {
        ui::key_value(
            &format!("{} [{}]", item.name, item.item_type),
            &format!("{} x {} = {}", item.unit_count, item.unit_cost, item.total),
        );
    }
    ui::separator();
    ui::key_value("Fees", &payment.fees);
    ui::key_value("Taxes", &payment.taxes);
    ui::key_value("Total", &format!("{} DOGE", payment.total));

    ui::header("Outputs");
    for output in &payment.outputs {
        ui::key_value(&output.address, &output.amount);
    }

    match payment.is_expired_at(Utc::now()) {
        Ok(true) => ui::warning("Payment request has expired; do not submit a transaction"),
        Ok(false) => {}
        Err(e) => ui::warning(&format!("Cannot read issue time: {e}")),
    }
}
