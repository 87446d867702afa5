//! DogeConnect URI encoding and parsing.
//!
//! A payment QR code carries a `dogecoin:` URI with the fallback payment
//! address and amount, plus the Connect URL (`dc`) of the gateway and the
//! gateway public key hash (`h`):
//!
//! ```text
//! dogecoin:DChs1c2YJZiZqhB13b8au44UCkcNGiiaDB?amount=43.61&dc=example.com%2Fdc%2F1234&h=3qaSfQoAQSj1U4DrZECG
//! ```
//!
//! Wallets that do not speak DogeConnect still see an ordinary payment URI.
//!
//! # Wire format
//!
//! The Connect URL parameter is written as `dc`. Earlier drafts of the
//! protocol used `c`; parsing accepts `c` when `dc` is absent.
//!
//! # Examples
//!
//! ```rust
//! use dogeconnect_lib::uri::{dogecoin_uri, parse_dogecoin_uri};
//!
//! let pub_key = [7u8; 32];
//! let uri = dogecoin_uri("DPD7uK4B1kRmbfGmytBhG1DZjaMWNfbpwY", "12.25", "https://example.com/dc/1", &pub_key);
//! let parsed = parse_dogecoin_uri(&uri).unwrap();
//! assert!(parsed.is_connect_uri());
//! assert_eq!(parsed.connect_url, "example.com/dc/1");
//! ```

use crate::keyhash::{pub_key_hash, PUB_KEY_HASH_LEN};
use crate::koinu::{parse_koinu, Koinu};
use crate::{ConnectError, Result};
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use std::fmt;
use url::Url;

/// URI scheme of a DogeConnect payment URI.
pub const URI_SCHEME: &str = "dogecoin";

/// Query parameter carrying the gateway Connect URL.
pub const CONNECT_URL_PARAM: &str = "dc";

/// Connect URL parameter name used by earlier protocol drafts (parse only).
pub const LEGACY_CONNECT_URL_PARAM: &str = "c";

/// Query parameter carrying the payment amount.
pub const AMOUNT_PARAM: &str = "amount";

/// Query parameter carrying the gateway public key hash.
pub const PUB_KEY_HASH_PARAM: &str = "h";

/// A parsed `dogecoin:` URI.
///
/// All query parameters are optional; a missing parameter is an empty value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConnectUri {
    /// Fallback pay-to address (opaque path of the URI, not percent-decoded).
    pub address: String,
    /// Amount as a decimal string, empty if absent.
    pub amount: String,
    /// Gateway Connect URL without the `https://` scheme, empty if absent.
    pub connect_url: String,
    /// Truncated gateway public key hash: 15 bytes, or empty if absent or malformed.
    pub pub_key_hash: Vec<u8>,
}

impl ConnectUri {
    /// Build a Connect URI value for a gateway public key.
    ///
    /// A leading `https://` is stripped from `connect_url`.
    ///
    /// # Panics
    ///
    /// Panics if `pub_key` is not exactly 32 bytes.
    pub fn new(
        address: impl Into<String>,
        amount: impl Into<String>,
        connect_url: &str,
        pub_key: &[u8],
    ) -> Self {
        Self {
            address: address.into(),
            amount: amount.into(),
            connect_url: strip_https(connect_url).to_string(),
            pub_key_hash: pub_key_hash(pub_key).to_vec(),
        }
    }

    /// True if this URI carries both a Connect URL and a well-formed key hash.
    pub fn is_connect_uri(&self) -> bool {
        !self.connect_url.is_empty() && self.pub_key_hash.len() == PUB_KEY_HASH_LEN
    }

    /// Parse the optional amount.
    ///
    /// Returns `Ok(None)` when the URI has no amount.
    pub fn amount_koinu(&self) -> Result<Option<Koinu>> {
        if self.amount.is_empty() {
            return Ok(None);
        }
        parse_koinu(&self.amount).map(Some)
    }

    /// Encode as a `dogecoin:` URI string.
    ///
    /// `connect_url` is written as held; only [`ConnectUri::new`] strips `https://`.
    pub fn to_uri_string(&self) -> String {
        let escaped_url: String =
            url::form_urlencoded::byte_serialize(self.connect_url.as_bytes()).collect();
        format!(
            "{URI_SCHEME}:{}?{AMOUNT_PARAM}={}&{CONNECT_URL_PARAM}={}&{PUB_KEY_HASH_PARAM}={}",
            self.address,
            self.amount,
            escaped_url,
            URL_SAFE.encode(&self.pub_key_hash)
        )
    }
}

impl fmt::Display for ConnectUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uri_string())
    }
}

/// Encode a DogeConnect payment URI.
///
/// The `https://` prefix is removed from `connect_url` before it is
/// percent-encoded. The public key is reduced to its 15-byte hash and encoded
/// as URL-safe base64.
///
/// # Panics
///
/// Panics if `pub_key` is not exactly 32 bytes.
pub fn dogecoin_uri(address: &str, amount: &str, connect_url: &str, pub_key: &[u8]) -> String {
    ConnectUri::new(address, amount, connect_url, pub_key).to_uri_string()
}

/// Parse a `dogecoin:` URI.
///
/// Query parameters are optional. A malformed `h` value yields an empty
/// `pub_key_hash` instead of an error, so such a URI still works as a plain
/// payment URI but [`ConnectUri::is_connect_uri`] is false.
///
/// # Errors
///
/// Returns [`ConnectError::NotAConnectUri`] if the string is not a URI with
/// the `dogecoin` scheme.
pub fn parse_dogecoin_uri(uri: &str) -> Result<ConnectUri> {
    let url = Url::parse(uri).map_err(|_| ConnectError::NotAConnectUri)?;
    if url.scheme() != URI_SCHEME {
        return Err(ConnectError::NotAConnectUri);
    }

    // address is the opaque path exactly as written; `dogecoin://...` has none
    let address = if url.cannot_be_a_base() {
        raw_address(uri)
    } else {
        String::new()
    };

    let amount = query_param(&url, AMOUNT_PARAM).unwrap_or_default();
    let connect_url = query_param(&url, CONNECT_URL_PARAM)
        .or_else(|| query_param(&url, LEGACY_CONNECT_URL_PARAM))
        .unwrap_or_default();
    let pub_key_hash = query_param(&url, PUB_KEY_HASH_PARAM)
        .and_then(|h| URL_SAFE.decode(h).ok())
        .unwrap_or_default();

    Ok(ConnectUri {
        address,
        amount,
        connect_url,
        pub_key_hash,
    })
}

/// First value of a query parameter, percent-decoded.
fn query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// Text between the scheme colon and the first `?` or `#`, with no
/// percent-encoding applied.
fn raw_address(uri: &str) -> String {
    let trimmed = uri.trim_matches(|c: char| c <= ' ');
    let rest = trimmed.split_once(':').map_or("", |(_, rest)| rest);
    rest.split(['?', '#']).next().unwrap_or_default().to_string()
}

fn strip_https(connect_url: &str) -> &str {
    connect_url.strip_prefix("https://").unwrap_or(connect_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAY_TO: &str = "DPD7uK4B1kRmbfGmytBhG1DZjaMWNfbpwY";
    const PUB_KEY_HEX: &str = "6c52b17752f469c5411b977ba64725d40174d16e780b709b2aff68e0f5abfc50";

    fn test_pub_key() -> Vec<u8> {
        hex::decode(PUB_KEY_HEX).unwrap()
    }

    #[test]
    fn test_encode_matches_wire_format() {
        let uri = dogecoin_uri(
            PAY_TO,
            "12.25",
            "https://example.com/dc/1QAB-POvTh2R88nybE8Wwg",
            &test_pub_key(),
        );
        assert_eq!(
            uri,
            "dogecoin:DPD7uK4B1kRmbfGmytBhG1DZjaMWNfbpwY?amount=12.25&dc=example.com%2Fdc%2F1QAB-POvTh2R88nybE8Wwg&h=72b-LVh5K_mm7zyN9PXO"
        );
    }

    #[test]
    fn test_encode_without_https_prefix() {
        let with = dogecoin_uri(PAY_TO, "1", "https://example.com/x", &test_pub_key());
        let without = dogecoin_uri(PAY_TO, "1", "example.com/x", &test_pub_key());
        assert_eq!(with, without);
    }

    #[test]
    fn test_wrong_scheme() {
        assert_eq!(
            parse_dogecoin_uri("bitcoin:bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq"),
            Err(ConnectError::NotAConnectUri)
        );
        assert_eq!(
            parse_dogecoin_uri(PAY_TO),
            Err(ConnectError::NotAConnectUri)
        );
        assert_eq!(parse_dogecoin_uri(""), Err(ConnectError::NotAConnectUri));
    }

    #[test]
    fn test_plain_payment_uri() {
        let res = parse_dogecoin_uri(&format!("dogecoin:{PAY_TO}?amount=43.61")).unwrap();
        assert_eq!(res.address, PAY_TO);
        assert_eq!(res.amount, "43.61");
        assert!(res.connect_url.is_empty());
        assert!(res.pub_key_hash.is_empty());
        assert!(!res.is_connect_uri());
    }

    #[test]
    fn test_address_only() {
        let res = parse_dogecoin_uri(&format!("dogecoin:{PAY_TO}")).unwrap();
        assert_eq!(res.address, PAY_TO);
        assert_eq!(res.amount_koinu().unwrap(), None);
    }

    #[test]
    fn test_malformed_hash_is_empty() {
        let res = parse_dogecoin_uri(&format!(
            "dogecoin:{PAY_TO}?dc=example.com%2Fdc%2F1&h=not*base64!"
        ))
        .unwrap();
        assert_eq!(res.connect_url, "example.com/dc/1");
        assert!(res.pub_key_hash.is_empty());
        assert!(!res.is_connect_uri());
    }

    #[test]
    fn test_short_hash_is_not_connect() {
        // 12 bytes decodes fine but is not a key hash
        let res = parse_dogecoin_uri(&format!(
            "dogecoin:{PAY_TO}?dc=example.com&h=AAAAAAAAAAAAAAAA"
        ))
        .unwrap();
        assert_eq!(res.pub_key_hash.len(), 12);
        assert!(!res.is_connect_uri());
    }

    #[test]
    fn test_legacy_connect_param() {
        let res = parse_dogecoin_uri(&format!(
            "dogecoin:{PAY_TO}?amount=1&c=example.com%2Fdc%2F1&h=72b-LVh5K_mm7zyN9PXO"
        ))
        .unwrap();
        assert_eq!(res.connect_url, "example.com/dc/1");
        assert!(res.is_connect_uri());
    }

    #[test]
    fn test_dc_preferred_over_legacy() {
        let res =
            parse_dogecoin_uri(&format!("dogecoin:{PAY_TO}?c=old.example.com&dc=new.example.com"))
                .unwrap();
        assert_eq!(res.connect_url, "new.example.com");
    }

    #[test]
    fn test_amount_koinu() {
        let res = parse_dogecoin_uri(&format!("dogecoin:{PAY_TO}?amount=12.25")).unwrap();
        assert_eq!(res.amount_koinu().unwrap().unwrap().as_koinu(), 1_225_000_000);

        let bad = parse_dogecoin_uri(&format!("dogecoin:{PAY_TO}?amount=12.2x")).unwrap();
        assert_eq!(bad.amount_koinu(), Err(ConnectError::InvalidNumber));
    }

    #[test]
    fn test_parsed_https_connect_url_reencodes_unchanged() {
        let text = format!(
            "dogecoin:{PAY_TO}?amount=1&dc=https%3A%2F%2Fexample.com%2Fdc%2F1&h=72b-LVh5K_mm7zyN9PXO"
        );
        let parsed = parse_dogecoin_uri(&text).unwrap();
        assert_eq!(parsed.connect_url, "https://example.com/dc/1");
        assert_eq!(parsed.to_string(), text);
        assert_eq!(parse_dogecoin_uri(&parsed.to_string()).unwrap(), parsed);
    }

    #[test]
    fn test_address_taken_as_written() {
        let res = parse_dogecoin_uri("dogecoin:DPD\u{e9}x?amount=1").unwrap();
        assert_eq!(res.address, "DPD\u{e9}x");

        let res = parse_dogecoin_uri("dogecoin:DPD%41x#frag").unwrap();
        assert_eq!(res.address, "DPD%41x");
        assert!(res.amount.is_empty());
    }

    #[test]
    fn test_display_round_trip() {
        let uri = ConnectUri::new(PAY_TO, "1.5", "https://example.com/dc/9", &test_pub_key());
        let parsed = parse_dogecoin_uri(&uri.to_string()).unwrap();
        assert_eq!(parsed, uri);
    }
}
