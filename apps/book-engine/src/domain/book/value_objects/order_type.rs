//! Order type, derived from limit price presence.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of a resting order.
///
/// Not chosen by the caller: an order constructed without a limit price
/// is `Market`, one with a limit price is `Limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// No limit price; fills at any execution price and is never
    /// invalidated by the price-eligibility rule.
    Market,
    /// Carries a limit price; invalidated by any execution priced
    /// strictly above it.
    Limit,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Market => write!(f, "MARKET"),
            Self::Limit => write!(f, "LIMIT"),
        }
    }
}
