//! Price value object with exact decimal arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A price for an order limit or a trade execution.
///
/// Backed by `Decimal` so tolerance comparisons at the fourth decimal
/// place are exact; binary floats cannot distinguish a difference of
/// 0.0001 from one of 0.0000999… reliably.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a new Price from a Decimal.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Get the inner Decimal value.
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }

    /// Absolute difference between two prices.
    #[must_use]
    pub fn abs_diff(self, other: Self) -> Decimal {
        (self.0 - other.0).abs()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Decimal> for Price {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<Price> for Decimal {
    fn from(value: Price) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn price_new_and_display() {
        let p = Price::new(dec!(14.32));
        assert_eq!(p.amount(), dec!(14.32));
        assert_eq!(format!("{p}"), "14.32");
    }

    #[test]
    fn price_ordering() {
        assert!(Price::new(dec!(14.31)) < Price::new(dec!(14.32)));
        assert_eq!(Price::new(dec!(14.32)), Price::new(dec!(14.32)));
    }

    #[test]
    fn price_abs_diff_is_symmetric() {
        let a = Price::new(dec!(14.32));
        let b = Price::new(dec!(14.3201));

        assert_eq!(a.abs_diff(b), dec!(0.0001));
        assert_eq!(b.abs_diff(a), dec!(0.0001));
    }

    #[test]
    fn price_abs_diff_is_exact_at_the_fourth_decimal() {
        let reference = Price::new(dec!(14.32));
        let boundary = Price::new(dec!(14.3201));
        let inside = Price::new(dec!(14.32005));

        // The boundary difference is exactly the tolerance, not a hair under.
        assert!(reference.abs_diff(boundary) >= dec!(0.0001));
        assert!(reference.abs_diff(inside) < dec!(0.0001));
    }

    #[test]
    fn price_serde_roundtrip() {
        let p = Price::new(dec!(14.32));
        let json = serde_json::to_string(&p).unwrap();
        let parsed: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, p);
    }

    #[test]
    fn price_deserializes_from_json_number() {
        let parsed: Price = serde_json::from_str("14.32").unwrap();
        assert_eq!(parsed, Price::new(dec!(14.32)));
    }
}
