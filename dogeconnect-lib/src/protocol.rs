//! DogeConnect protocol records.
//!
//! A gateway serves a [`ConnectEnvelope`] at its Connect URL. The envelope
//! wraps a base64-encoded JSON [`ConnectPayment`] together with the gateway's
//! BIP-340 public key and a signature over the payload.
//!
//! Monetary fields are decimal strings exactly as the gateway wrote them, so
//! a verified payment is byte-for-byte what was signed. Use the `*_koinu`
//! accessors or [`ConnectPayment::validate`] for typed checks.

use crate::koinu::{parse_koinu, Koinu};
use crate::{ConnectError, Result};
use chrono::{DateTime, Duration, FixedOffset, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Envelope version written by this implementation.
pub const ENVELOPE_VERSION: &str = "1.0";

/// Payload type tag of a payment request.
pub const PAYMENT_REQUEST_TYPE: &str = "payment";

/// Fractional digits significant at the protocol level.
const SIGNIFICANT_DECIMALS: usize = 8;

/// Signed envelope served by a gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectEnvelope {
    /// Protocol version, must be a supported [`ProtocolVersion`].
    pub version: String,
    /// Base64-encoded JSON payload (e.g. a [`ConnectPayment`]).
    pub payload: String,
    /// Hex-encoded gateway public key (BIP-340 X-only, 32 bytes).
    #[serde(rename = "pubkey")]
    pub pub_key: String,
    /// Hex-encoded payload signature (BIP-340 Schnorr, 64 bytes).
    #[serde(rename = "sig")]
    pub signature: String,
}

/// Protocol versions this crate can verify.
///
/// Each version owns the payload shape it decodes, so a verifier dispatches
/// on the envelope's version string instead of growing one record forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtocolVersion {
    /// Version "1.0": JSON [`ConnectPayment`] payloads.
    V1,
}

impl ProtocolVersion {
    /// Version used when signing.
    pub const CURRENT: ProtocolVersion = ProtocolVersion::V1;

    /// Look up an envelope version string.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectError::UnsupportedVersion`] for unknown versions.
    pub fn parse(version: &str) -> Result<Self> {
        match version {
            ENVELOPE_VERSION => Ok(Self::V1),
            other => Err(ConnectError::UnsupportedVersion(other.to_string())),
        }
    }

    /// Wire string of this version.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V1 => ENVELOPE_VERSION,
        }
    }

    /// Decode a verified payload as a payment request.
    ///
    /// # Errors
    ///
    /// - [`ConnectError::WrongPayloadType`] if the payload's `type` is not
    ///   [`PAYMENT_REQUEST_TYPE`].
    /// - [`ConnectError::MalformedEnvelope`] if the payload is not valid JSON
    ///   or does not have the payment request shape.
    pub fn decode_payment(&self, payload: &[u8]) -> Result<ConnectPayment> {
        match self {
            Self::V1 => decode_v1_payment(payload),
        }
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Just the type tag, read before committing to a payload shape.
#[derive(Deserialize)]
struct PayloadTag {
    #[serde(rename = "type", default)]
    kind: String,
}

fn decode_v1_payment(payload: &[u8]) -> Result<ConnectPayment> {
    let tag: PayloadTag = serde_json::from_slice(payload).map_err(|_| {
        ConnectError::MalformedEnvelope {
            field: "json payload",
        }
    })?;
    if tag.kind != PAYMENT_REQUEST_TYPE {
        return Err(ConnectError::WrongPayloadType(tag.kind));
    }
    serde_json::from_slice(payload).map_err(|_| ConnectError::MalformedEnvelope {
        field: "payment payload",
    })
}

/// A payment request payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectPayment {
    /// Payload type, must be [`PAYMENT_REQUEST_TYPE`].
    #[serde(rename = "type")]
    pub kind: String,
    /// Gateway unique payment-request ID.
    pub id: String,
    /// RFC 3339 timestamp (2006-01-02T15:04:05-07:00).
    pub issued: String,
    /// Seconds; do not submit the payment transaction after `issued + timeout`.
    pub timeout: u32,
    /// DogeConnect gateway URL, e.g. `https://example.com/payments`.
    pub gateway: String,
    /// Vendor icon URL, should be an https:// JPG or PNG.
    #[serde(default)]
    pub vendor_icon: String,
    /// Vendor display name.
    pub vendor_name: String,
    /// Vendor business address (may be empty).
    #[serde(default)]
    pub vendor_address: String,
    /// Total amount including fees and taxes, decimal string.
    pub total: String,
    /// Fee subtotal, decimal string.
    #[serde(default)]
    pub fees: String,
    /// Taxes subtotal, decimal string.
    #[serde(default)]
    pub taxes: String,
    /// Line items to display. `null` or absent reads as no items.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub items: Vec<ConnectItem>,
    /// Outputs to pay. `null` or absent reads as no outputs.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub outputs: Vec<ConnectOutput>,
}

/// Gateways may write an empty list as `null`.
fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Kind of a payment line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    /// A purchased good or service.
    Item,
    /// A tax line.
    Tax,
    /// A fee line.
    Fee,
    /// Shipping cost.
    Shipping,
    /// A discount (usually a negative cost).
    Discount,
    /// A donation.
    Donation,
}

impl ItemType {
    /// Wire string of this item type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Item => "item",
            Self::Tax => "tax",
            Self::Fee => "fee",
            Self::Shipping => "shipping",
            Self::Discount => "discount",
            Self::Donation => "donation",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A line item in a payment request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectItem {
    /// Kind of line item.
    #[serde(rename = "type")]
    pub item_type: ItemType,
    /// Unique item ID or SKU.
    pub id: String,
    /// Icon URL, should be an https:// JPG or PNG.
    #[serde(default)]
    pub icon: String,
    /// Name to display.
    pub name: String,
    /// Item description to display.
    #[serde(rename = "desc", default)]
    pub description: String,
    /// Number of units, at least 1.
    #[serde(rename = "count")]
    pub unit_count: u32,
    /// Unit price, decimal string.
    #[serde(rename = "cost")]
    pub unit_cost: String,
    /// `unit_count` x `unit_cost`, decimal string.
    pub total: String,
}

impl ConnectItem {
    /// Create a line item, computing its total from count and unit cost.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectError::MaxMoneyExceeded`] if the total leaves the MaxMoney range.
    pub fn new(
        item_type: ItemType,
        id: impl Into<String>,
        name: impl Into<String>,
        unit_count: u32,
        unit_cost: Koinu,
    ) -> Result<Self> {
        let total = unit_cost
            .checked_mul(unit_count)
            .ok_or(ConnectError::MaxMoneyExceeded)?;
        Ok(Self {
            item_type,
            id: id.into(),
            icon: String::new(),
            name: name.into(),
            description: String::new(),
            unit_count,
            unit_cost: unit_cost.to_string(),
            total: total.to_string(),
        })
    }

    /// Set the icon URL.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Parse the unit cost.
    pub fn unit_cost_koinu(&self) -> Result<Koinu> {
        parse_koinu(&self.unit_cost)
    }

    /// Parse the line total.
    pub fn total_koinu(&self) -> Result<Koinu> {
        parse_koinu(&self.total)
    }
}

/// An output the payer must pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectOutput {
    /// Dogecoin address.
    pub address: String,
    /// Amount, decimal string.
    pub amount: String,
}

impl ConnectOutput {
    /// Create an output paying `amount` to `address`.
    pub fn new(address: impl Into<String>, amount: Koinu) -> Self {
        Self {
            address: address.into(),
            amount: amount.to_string(),
        }
    }

    /// Parse the output amount.
    pub fn amount_koinu(&self) -> Result<Koinu> {
        parse_koinu(&self.amount)
    }
}

impl ConnectPayment {
    /// Create an empty payment request with zero totals.
    pub fn new(id: impl Into<String>, issued: impl Into<String>, timeout: u32) -> Self {
        Self {
            kind: PAYMENT_REQUEST_TYPE.to_string(),
            id: id.into(),
            issued: issued.into(),
            timeout,
            gateway: String::new(),
            vendor_icon: String::new(),
            vendor_name: String::new(),
            vendor_address: String::new(),
            total: Koinu::ZERO.to_string(),
            fees: Koinu::ZERO.to_string(),
            taxes: Koinu::ZERO.to_string(),
            items: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Set the gateway URL.
    pub fn with_gateway(mut self, gateway: impl Into<String>) -> Self {
        self.gateway = gateway.into();
        self
    }

    /// Set the vendor display details.
    pub fn with_vendor(
        mut self,
        name: impl Into<String>,
        icon: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        self.vendor_name = name.into();
        self.vendor_icon = icon.into();
        self.vendor_address = address.into();
        self
    }

    /// Set total, fees and taxes.
    pub fn with_totals(mut self, total: Koinu, fees: Koinu, taxes: Koinu) -> Self {
        self.total = total.to_string();
        self.fees = fees.to_string();
        self.taxes = taxes.to_string();
        self
    }

    /// Append a line item.
    pub fn with_item(mut self, item: ConnectItem) -> Self {
        self.items.push(item);
        self
    }

    /// Append an output.
    pub fn with_output(mut self, output: ConnectOutput) -> Self {
        self.outputs.push(output);
        self
    }

    /// Parse the total amount.
    pub fn total_koinu(&self) -> Result<Koinu> {
        parse_koinu(&self.total)
    }

    /// Sum of all output amounts.
    ///
    /// # Errors
    ///
    /// Returns an amount error if any output fails to parse or the sum leaves
    /// the MaxMoney range.
    pub fn outputs_total(&self) -> Result<Koinu> {
        self.outputs.iter().try_fold(Koinu::ZERO, |sum, output| {
            sum.checked_add(&output.amount_koinu()?)
                .ok_or(ConnectError::MaxMoneyExceeded)
        })
    }

    /// Issue time of the request.
    pub fn issued_at(&self) -> Result<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.issued)
            .map_err(|e| ConnectError::Timestamp(e.to_string()))
    }

    /// Time after which the payment must not be submitted.
    pub fn expires_at(&self) -> Result<DateTime<FixedOffset>> {
        Ok(self.issued_at()? + Duration::seconds(i64::from(self.timeout)))
    }

    /// True if `now` is past the payment deadline.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> Result<bool> {
        Ok(now > self.expires_at()?)
    }

    /// Validate a payment request before it is signed or displayed.
    ///
    /// Checks the type tag, that every decimal field parses with no
    /// significant digits past the 8th, that item counts are at least 1,
    /// and that there is at least one positive output.
    pub fn validate(&self) -> Result<()> {
        if self.kind != PAYMENT_REQUEST_TYPE {
            return Err(ConnectError::invalid_payment(
                "type",
                format!("expected '{PAYMENT_REQUEST_TYPE}', found '{}'", self.kind),
            ));
        }
        self.issued_at()?;

        check_decimal("total", &self.total)?;
        check_decimal("fees", &self.fees)?;
        check_decimal("taxes", &self.taxes)?;

        for (i, item) in self.items.iter().enumerate() {
            if item.unit_count == 0 {
                return Err(ConnectError::invalid_payment(
                    format!("items[{i}].count"),
                    "must be at least 1",
                ));
            }
            check_decimal(&format!("items[{i}].cost"), &item.unit_cost)?;
            check_decimal(&format!("items[{i}].total"), &item.total)?;
        }

        if self.outputs.is_empty() {
            return Err(ConnectError::invalid_payment("outputs", "no outputs to pay"));
        }
        for (i, output) in self.outputs.iter().enumerate() {
            if output.address.is_empty() {
                return Err(ConnectError::invalid_payment(
                    format!("outputs[{i}].address"),
                    "empty address",
                ));
            }
            let amount = check_decimal(&format!("outputs[{i}].amount"), &output.amount)?;
            if amount.is_zero() || amount.is_negative() {
                return Err(ConnectError::invalid_payment(
                    format!("outputs[{i}].amount"),
                    "must be positive",
                ));
            }
        }
        Ok(())
    }
}

/// Parse a decimal field, rejecting digits the codec would silently truncate.
fn check_decimal(field: &str, text: &str) -> Result<Koinu> {
    let value = parse_koinu(text).map_err(|e| ConnectError::invalid_payment(field, e.to_string()))?;
    if let Some((_, fraction)) = text.split_once('.') {
        if fraction
            .bytes()
            .skip(SIGNIFICANT_DECIMALS)
            .any(|b| b != b'0')
        {
            return Err(ConnectError::invalid_payment(
                field,
                "more than 8 significant decimal places",
            ));
        }
    }
    Ok(value)
}
