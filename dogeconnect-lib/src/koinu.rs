//! Exact fixed-point Dogecoin amounts.
//!
//! Dogecoin amounts are significant to 8 decimal places at the protocol level
//! and are carried in transactions as 64-bit integers of Koinu, the smallest
//! unit. This module converts between decimal strings ("12.6251") and
//! [`Koinu`] (1262510000) without ever going through floating point.
//!
//! # Parsing rules
//!
//! - An optional leading `-` is accepted.
//! - Leading zeroes in the integer part are skipped and do not count towards
//!   the 11-digit limit.
//! - Fractional digits beyond the 8th are consumed but ignored (truncation,
//!   not rounding).
//! - `"1."` and `".5"` are valid.
//! - The MaxMoney bound applies to the magnitude, before the sign is applied.

use crate::{ConnectError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// One Dogecoin represented in Koinu (8 zeroes).
pub const ONE_DOGE: i64 = 100_000_000;

/// Maximum Koinu value that can be used in a transaction (10,000,000,000 DOGE).
pub const MAX_MONEY: i64 = 10_000_000_000 * ONE_DOGE;

/// Number of integer-part digits in MaxMoney.
const MAX_MONEY_DIGITS: usize = 11;

/// Number of fraction-part digits in ONE_DOGE.
const MAX_KOINU_DIGITS: usize = 8;

/// MaxMoney integer part; checked before scaling so the multiply cannot overflow.
const MAX_MONEY_INTEGER: i64 = MAX_MONEY / ONE_DOGE;

/// Scale for a fractional run of `len` digits, indexed by `len`.
/// Length zero yields zero (a bare trailing `.`).
const DECIMAL_SCALE: [i64; MAX_KOINU_DIGITS + 1] = [
    0, 10_000_000, 1_000_000, 100_000, 10_000, 1_000, 100, 10, 1,
];

/// An amount of Dogecoin in Koinu.
///
/// Values always lie within `[-MAX_MONEY, MAX_MONEY]`: a `Koinu` is only
/// produced by [`parse_koinu`], by [`Koinu::from_koinu`], or by checked
/// arithmetic on existing values.
///
/// # Examples
///
/// ```
/// use dogeconnect_lib::koinu::{parse_koinu, Koinu};
///
/// let amt = parse_koinu("12.25").unwrap();
/// assert_eq!(amt.as_koinu(), 1_225_000_000);
/// assert_eq!(amt.to_string(), "12.25");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Koinu(i64);

impl Koinu {
    /// Zero Koinu.
    pub const ZERO: Koinu = Koinu(0);

    /// One Dogecoin.
    pub const ONE_DOGE: Koinu = Koinu(ONE_DOGE);

    /// The largest amount allowed in a transaction.
    pub const MAX_MONEY: Koinu = Koinu(MAX_MONEY);

    /// Create from a raw Koinu count.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectError::MaxMoneyExceeded`] if the magnitude is greater
    /// than MaxMoney.
    pub fn from_koinu(koinu: i64) -> Result<Self> {
        if koinu.unsigned_abs() > MAX_MONEY as u64 {
            return Err(ConnectError::MaxMoneyExceeded);
        }
        Ok(Self(koinu))
    }

    /// Get the value in Koinu.
    pub fn as_koinu(&self) -> i64 {
        self.0
    }

    /// Check if amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if amount is negative.
    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Checked addition (returns None if the sum leaves the MaxMoney range).
    ///
    /// ```
    /// use dogeconnect_lib::Koinu;
    /// let a = Koinu::ONE_DOGE;
    /// assert_eq!(a.checked_add(&a).unwrap().to_string(), "2");
    /// assert!(Koinu::MAX_MONEY.checked_add(&a).is_none());
    /// ```
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        self.0
            .checked_add(other.0)
            .and_then(|v| Self::from_koinu(v).ok())
    }

    /// Checked subtraction (returns None if the difference leaves the MaxMoney range).
    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        self.0
            .checked_sub(other.0)
            .and_then(|v| Self::from_koinu(v).ok())
    }

    /// Multiply by a unit count (returns None if the product leaves the MaxMoney range).
    pub fn checked_mul(&self, count: u32) -> Option<Self> {
        self.0
            .checked_mul(i64::from(count))
            .and_then(|v| Self::from_koinu(v).ok())
    }
}

/// Parse a decimal string like `"12.6251"` into [`Koinu`] (1262510000).
///
/// # Errors
///
/// - [`ConnectError::InvalidNumber`] for any unexpected character.
/// - [`ConnectError::MaxMoneyExceeded`] if the integer part has more than 11
///   significant digits or the value is greater than MaxMoney.
pub fn parse_koinu(amount: &str) -> Result<Koinu> {
    let chars = amount.as_bytes();
    let mut i = 0;

    // optional minus sign
    let negative = chars.first() == Some(&b'-');
    if negative {
        i += 1;
    }

    // skip leading zeroes (because we limit to MAX_MONEY_DIGITS)
    while i < chars.len() && chars[i] == b'0' {
        i += 1;
    }

    // whole number part
    let (whole, end) = parse_digits(chars, i, MAX_MONEY_DIGITS);
    i = end;
    let more_digits = chars.get(i).is_some_and(u8::is_ascii_digit);
    if whole > MAX_MONEY_INTEGER || more_digits {
        return Err(ConnectError::MaxMoneyExceeded);
    }

    let mut value = whole * ONE_DOGE;

    // decimal part, up to 8 significant digits
    if chars.get(i) == Some(&b'.') {
        let start = i + 1;
        let (part, end) = parse_digits(chars, start, MAX_KOINU_DIGITS);
        i = end;

        // scale to 8 digits, e.g. 6 digits found means multiply by 100
        value += part * DECIMAL_SCALE[end - start];

        // decimal part can push us above MaxMoney
        if value > MAX_MONEY {
            return Err(ConnectError::MaxMoneyExceeded);
        }
    }

    // skip extra decimal-part digits; anything else left over is invalid
    i = skip_digits(chars, i);
    if i != chars.len() {
        return Err(ConnectError::InvalidNumber);
    }

    Ok(Koinu(if negative { -value } else { value }))
}

/// Parse up to `max_len` ASCII digits starting at `start`.
/// Returns the value and the index of the first unconsumed byte.
fn parse_digits(chars: &[u8], start: usize, max_len: usize) -> (i64, usize) {
    let limit = chars.len().min(start + max_len);
    let mut value = 0i64;
    let mut i = start;
    while i < limit && chars[i].is_ascii_digit() {
        value = value * 10 + i64::from(chars[i] - b'0');
        i += 1;
    }
    (value, i)
}

fn skip_digits(chars: &[u8], mut i: usize) -> usize {
    while i < chars.len() && chars[i].is_ascii_digit() {
        i += 1;
    }
    i
}

impl fmt::Display for Koinu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        let whole = magnitude / ONE_DOGE as u64;
        let part = magnitude % ONE_DOGE as u64;
        if part == 0 {
            write!(f, "{sign}{whole}")
        } else {
            let fraction = format!("{part:08}");
            write!(f, "{sign}{whole}.{}", fraction.trim_end_matches('0'))
        }
    }
}

impl FromStr for Koinu {
    type Err = ConnectError;

    fn from_str(s: &str) -> Result<Self> {
        parse_koinu(s)
    }
}

impl Serialize for Koinu {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Koinu {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_koinu(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_koinu_string() {
        let val = Koinu(12 * ONE_DOGE + ONE_DOGE / 4);
        assert_eq!(val.to_string(), "12.25");
    }

    #[test]
    fn test_format_pads_fraction() {
        assert_eq!(Koinu(12 * ONE_DOGE + 5_000_000).to_string(), "12.05");
        assert_eq!(Koinu(1).to_string(), "0.00000001");
        assert_eq!(Koinu(ONE_DOGE * 7).to_string(), "7");
        assert_eq!(Koinu::ZERO.to_string(), "0");
        assert_eq!(Koinu::MAX_MONEY.to_string(), "10000000000");
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(Koinu(-ONE_DOGE / 2).to_string(), "-0.5");
        assert_eq!(Koinu(-1_225_000_000).to_string(), "-12.25");
        assert_eq!(Koinu(-MAX_MONEY).to_string(), "-10000000000");
    }

    #[test]
    fn test_parse_edge_cases() {
        assert_eq!(parse_koinu("1.").unwrap(), Koinu(ONE_DOGE));
        assert_eq!(parse_koinu(".5").unwrap(), Koinu(ONE_DOGE / 2));
        assert_eq!(parse_koinu("-1.5").unwrap(), Koinu(-150_000_000));
        assert_eq!(parse_koinu("-10000000000").unwrap(), Koinu(-MAX_MONEY));
    }

    #[test]
    fn test_parse_invalid_characters() {
        for bad in ["abc", "1a", "1.2.3", "1..", "+1", " 1", "1 ", "1,5", "1e5", "--1", "1-"] {
            assert_eq!(
                parse_koinu(bad),
                Err(ConnectError::InvalidNumber),
                "expected InvalidNumber for {bad:?}"
            );
        }
    }

    #[test]
    fn test_from_koinu_bounds() {
        assert!(Koinu::from_koinu(MAX_MONEY).is_ok());
        assert!(Koinu::from_koinu(-MAX_MONEY).is_ok());
        assert_eq!(
            Koinu::from_koinu(MAX_MONEY + 1),
            Err(ConnectError::MaxMoneyExceeded)
        );
        assert_eq!(
            Koinu::from_koinu(i64::MIN),
            Err(ConnectError::MaxMoneyExceeded)
        );
    }

    #[test]
    fn test_checked_arithmetic() {
        let a = parse_koinu("414.37965").unwrap();
        let b = parse_koinu("6.31035").unwrap();
        assert_eq!(a.checked_add(&b).unwrap().to_string(), "420.69");
        assert_eq!(a.checked_sub(&b).unwrap().to_string(), "408.0693");
        assert_eq!(b.checked_mul(3).unwrap().to_string(), "18.93105");
        assert!(Koinu::MAX_MONEY.checked_mul(2).is_none());
        assert!(Koinu(-MAX_MONEY).checked_sub(&Koinu(1)).is_none());
    }

    #[test]
    fn test_serialization() {
        let amt = parse_koinu("12.25").unwrap();
        let json = serde_json::to_string(&amt).unwrap();
        assert_eq!(json, "\"12.25\"");
        let parsed: Koinu = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, amt);
        assert!(serde_json::from_str::<Koinu>("\"12.x\"").is_err());
    }
}
