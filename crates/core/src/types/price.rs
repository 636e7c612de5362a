//! Type-safe price representation using decimal arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product price in USD.
///
/// The amount is a decimal in the currency's standard unit (dollars, not
/// cents) and serializes as a string so that persisted catalogs never lose
/// precision through floating point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::str")] Decimal);

impl Price {
    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is strictly greater than zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Format for display, e.g. `$19.99`.
    #[must_use]
    pub fn display(&self) -> String {
        format!("${:.2}", self.0)
    }
}

impl std::str::FromStr for Price {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<Decimal>().map(Self)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let price: Price = "19.9".parse().unwrap();
        assert_eq!(price.display(), "$19.90");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("not-a-price".parse::<Price>().is_err());
    }

    #[test]
    fn test_is_positive() {
        assert!("0.01".parse::<Price>().unwrap().is_positive());
        assert!(!"0".parse::<Price>().unwrap().is_positive());
        assert!(!"-5".parse::<Price>().unwrap().is_positive());
    }

    #[test]
    fn test_serializes_as_string() {
        let price: Price = "12.50".parse().unwrap();
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "\"12.50\"");
        let back: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(back, price);
    }
}
