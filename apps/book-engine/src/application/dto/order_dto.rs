//! Order DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::book::aggregate::Order;
use crate::domain::book::value_objects::OrderType;
use crate::domain::shared::Timestamp;

/// Serializable snapshot of an order, fill state included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDto {
    /// Order ID.
    pub order_id: u64,
    /// Instrument the order rests against.
    pub instrument_id: String,
    /// Market or limit.
    pub order_type: OrderType,
    /// Requested quantity.
    pub quantity: u64,
    /// Cumulative filled quantity.
    pub filled_quantity: u64,
    /// Requested minus filled.
    pub remaining_quantity: u64,
    /// Limit price; absent for market orders.
    pub limit_price: Option<Decimal>,
    /// Price of the most recent fill.
    pub last_fill_price: Option<Decimal>,
    /// Whether the order has been priced out of further fills.
    pub invalid: bool,
    /// Whether fills have reached the requested quantity.
    pub fully_filled: bool,
    /// Entry time.
    pub entered_at: Timestamp,
}

impl OrderDto {
    /// Create from a domain order.
    ///
    /// Reads fill state atomically field by field; a concurrent fill
    /// pass may land between fields, which read-only consumers accept.
    #[must_use]
    pub fn from_order(order: &Order) -> Self {
        Self {
            order_id: order.order_id().value(),
            instrument_id: order.instrument_id().to_string(),
            order_type: order.order_type(),
            quantity: order.quantity().amount(),
            filled_quantity: order.filled_quantity().amount(),
            remaining_quantity: order.remaining_quantity().amount(),
            limit_price: order.limit_price().map(|price| price.amount()),
            last_fill_price: order.last_fill_price().map(|price| price.amount()),
            invalid: order.is_invalid(),
            fully_filled: order.is_fully_filled(),
            entered_at: order.entered_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    use crate::domain::shared::{InstrumentId, OrderId, Price, Quantity};

    #[test]
    fn from_order_snapshots_fill_state() {
        let order = Order::new(
            OrderId::new(1),
            InstrumentId::new("CS"),
            Quantity::new(100),
            Some(Price::new(dec!(14.34))),
        );
        order.record_fill(Quantity::new(40)).unwrap();
        order.record_fill_price(Price::new(dec!(14.32)));

        let dto = OrderDto::from_order(&order);

        assert_eq!(dto.order_id, 1);
        assert_eq!(dto.instrument_id, "CS");
        assert_eq!(dto.order_type, OrderType::Limit);
        assert_eq!(dto.quantity, 100);
        assert_eq!(dto.filled_quantity, 40);
        assert_eq!(dto.remaining_quantity, 60);
        assert_eq!(dto.limit_price, Some(dec!(14.34)));
        assert_eq!(dto.last_fill_price, Some(dec!(14.32)));
        assert!(!dto.invalid);
        assert!(!dto.fully_filled);
    }

    #[test]
    fn market_order_serializes_without_limit_price() {
        let order = Order::new(
            OrderId::new(2),
            InstrumentId::new("CS"),
            Quantity::new(50),
            None,
        );

        let json = serde_json::to_value(OrderDto::from_order(&order)).unwrap();
        assert_eq!(json["order_type"], "MARKET");
        assert!(json["limit_price"].is_null());
    }
}
