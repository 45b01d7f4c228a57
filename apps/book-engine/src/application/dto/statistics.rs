//! Order book statistics projection.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::dto::OrderDto;
use crate::domain::book::aggregate::OrderBook;
use crate::domain::book::value_objects::BookState;
use crate::domain::shared::{Price, Quantity};

/// Read model over one book's aggregate getters.
///
/// Built on demand for reporting; carries no invariants of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookStatistics {
    /// Instrument the book is scoped to.
    pub instrument_id: String,
    /// Lifecycle state at snapshot time.
    pub state: BookState,
    /// Number of orders held.
    pub order_count: u64,
    /// Total requested quantity.
    pub total_demand: u64,
    /// Requested quantity across invalidated orders.
    pub invalid_demand: u64,
    /// Requested quantity across non-invalidated orders.
    pub valid_demand: u64,
    /// Number of invalidated orders.
    pub invalid_order_count: u64,
    /// Number of non-invalidated orders.
    pub valid_order_count: u64,
    /// Reference execution price, once established.
    pub execution_price: Option<Decimal>,
    /// Cumulative filled quantity across all orders.
    pub execution_amount: u64,
    /// Whether the book is fully reconciled.
    pub reconciled: bool,
    /// Extremal orders by quantity and entry time.
    pub order_breakdown: OrderBreakdown,
    /// Resting limit demand per price level, ascending.
    pub limit_breakdown: Vec<LimitLevel>,
}

/// The four extremal orders of a book, absent while the book is empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBreakdown {
    /// Smallest requested quantity.
    pub smallest: Option<OrderDto>,
    /// Largest requested quantity.
    pub largest: Option<OrderDto>,
    /// Earliest entry time.
    pub earliest: Option<OrderDto>,
    /// Latest entry time.
    pub latest: Option<OrderDto>,
}

/// Aggregate requested quantity of limit orders at one price level.
///
/// Market orders carry no limit price and appear in no level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitLevel {
    /// The limit price shared by the level's orders.
    pub limit_price: Decimal,
    /// Summed requested quantity at this level.
    pub demand: u64,
}

impl BookStatistics {
    /// Snapshot one book.
    #[must_use]
    pub fn from_book(book: &OrderBook) -> Self {
        let order_breakdown = OrderBreakdown {
            smallest: book.min_order().map(|order| OrderDto::from_order(&order)),
            largest: book.max_order().map(|order| OrderDto::from_order(&order)),
            earliest: book.earliest_order().map(|order| OrderDto::from_order(&order)),
            latest: book.latest_order().map(|order| OrderDto::from_order(&order)),
        };

        let mut levels: BTreeMap<Price, Quantity> = BTreeMap::new();
        for order in book.orders() {
            if let Some(limit) = order.limit_price() {
                *levels.entry(limit).or_insert(Quantity::ZERO) += order.quantity();
            }
        }
        let limit_breakdown = levels
            .into_iter()
            .map(|(price, demand)| LimitLevel {
                limit_price: price.amount(),
                demand: demand.amount(),
            })
            .collect();

        Self {
            instrument_id: book.instrument_id().to_string(),
            state: book.state(),
            order_count: book.order_count() as u64,
            total_demand: book.total_demand().amount(),
            invalid_demand: book.invalid_demand().amount(),
            valid_demand: book.valid_demand().amount(),
            invalid_order_count: book.invalid_order_count() as u64,
            valid_order_count: book.valid_order_count() as u64,
            execution_price: book.reference_price().map(|price| price.amount()),
            execution_amount: book.execution_amount().amount(),
            reconciled: book.is_reconciled(),
            order_breakdown,
            limit_breakdown,
        }
    }
}
