//! Amount type for non-negative monetary values.
//!
//! This module provides the `Amount` type which wraps `Decimal` and parses
//! values that may include a dollar sign and thousands commas. Expense
//! amounts are never negative, so parsing rejects a leading minus outright.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A non-negative expense amount.
///
/// The stored form is canonical: a plain decimal string with two fractional
/// digits and no separators, so every row written to the ledger reads back
/// byte-identical. Currency symbols belong to the display layer.
///
/// # Examples
///
/// ```
/// # use outlay::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("$1,250.5").unwrap();
/// assert_eq!(amount.to_string(), "1250.50");
/// ```
///
/// ```
/// # use outlay::model::Amount;
/// # use std::str::FromStr;
/// assert!(Amount::from_str("-4.00").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount {
    value: Decimal,
}

impl Amount {
    /// Creates a new Amount from a Decimal value.
    pub const fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.value().is_zero()
    }

    /// Returns the value as an `f64` for chart geometry.
    pub fn to_f64(&self) -> f64 {
        self.value().to_f64().unwrap_or_default()
    }
}

/// An error that can occur when parsing a string into an `Amount`.
#[derive(Debug, Error)]
pub enum AmountError {
    #[error("not a number: {0}")]
    Invalid(#[from] rust_decimal::Error),
    #[error("expense amounts cannot be negative")]
    Negative,
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let without_dollar = trimmed.strip_prefix('$').unwrap_or(trimmed);
        let without_commas = without_dollar.replace(',', "");
        let value = Decimal::from_str(&without_commas)?;
        if value.is_sign_negative() {
            return Err(AmountError::Negative);
        }
        Ok(Amount { value })
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.value())
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        let amount = Amount::from_str("50.00").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("50.00").unwrap());
    }

    #[test]
    fn test_parse_with_dollar_sign() {
        let amount = Amount::from_str("$50.00").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("50.00").unwrap());
    }

    #[test]
    fn test_parse_with_commas() {
        let amount = Amount::from_str("$1,234,567.89").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("1234567.89").unwrap());
    }

    #[test]
    fn test_parse_whitespace() {
        let amount = Amount::from_str("  $50.00  ").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("50.00").unwrap());
    }

    #[test]
    fn test_parse_integer() {
        let amount = Amount::from_str("7").unwrap();
        assert_eq!(amount.to_string(), "7.00");
    }

    #[test]
    fn test_parse_negative_rejected() {
        assert!(matches!(
            Amount::from_str("-50.00"),
            Err(AmountError::Negative)
        ));
        assert!(matches!(
            Amount::from_str("-$50.00"),
            Err(AmountError::Invalid(_))
        ));
    }

    #[test]
    fn test_parse_empty_rejected() {
        assert!(Amount::from_str("").is_err());
    }

    #[test]
    fn test_parse_garbage_rejected() {
        assert!(Amount::from_str("12x.0").is_err());
    }

    #[test]
    fn test_display_canonical() {
        let amount = Amount::from_str("1,000.5").unwrap();
        assert_eq!(amount.to_string(), "1000.50");
    }

    #[test]
    fn test_display_zero() {
        let amount = Amount::new(Decimal::ZERO);
        assert_eq!(amount.to_string(), "0.00");
    }

    #[test]
    fn test_serialize() {
        let amount = Amount::from_str("$1,500").unwrap();
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, "\"1500.00\"");
    }

    #[test]
    fn test_deserialize() {
        let amount: Amount = serde_json::from_str("\"$50.00\"").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("50.00").unwrap());
    }

    #[test]
    fn test_deserialize_negative_rejected() {
        assert!(serde_json::from_str::<Amount>("\"-50.00\"").is_err());
    }

    #[test]
    fn test_ordering() {
        let a1 = Amount::from_str("$30.00").unwrap();
        let a2 = Amount::from_str("$50.00").unwrap();
        assert!(a1 < a2);
    }

    #[test]
    fn test_is_zero() {
        assert!(Amount::from_str("0.00").unwrap().is_zero());
        assert!(!Amount::from_str("50.00").unwrap().is_zero());
    }

    #[test]
    fn test_to_f64() {
        let amount = Amount::from_str("12.25").unwrap();
        assert!((amount.to_f64() - 12.25).abs() < f64::EPSILON);
    }
}
