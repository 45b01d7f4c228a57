//! HTTP request DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Request to record a new order.
///
/// A present `price` makes the order a limit order; an absent one a
/// market order. The order id is allocated server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    /// Requested quantity. Must be positive.
    pub quantity: u64,
    /// Instrument the order bids on.
    pub instrument_id: String,
    /// Limit price, absent for market orders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
}

/// Request to record a trade execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExecutionRequest {
    /// Executed quantity. Must be positive.
    pub quantity: u64,
    /// Instrument the execution confirms for.
    pub instrument_id: String,
    /// Execution price. Always required.
    pub price: Decimal,
}
