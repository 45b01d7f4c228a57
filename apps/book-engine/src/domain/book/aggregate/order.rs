//! Order entity with atomic fill state.

use std::hash::{Hash, Hasher};
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::domain::book::errors::BookError;
use crate::domain::book::value_objects::OrderType;
use crate::domain::shared::{InstrumentId, OrderId, Price, Quantity, Timestamp};

/// A resting request to trade a quantity of an instrument.
///
/// Identity, instrument, requested quantity, limit price and entry time
/// are fixed at construction. Fill state (cumulative filled quantity,
/// invalid flag, last fill price) is mutated only by the order book's
/// fill pass, which is serialized at the book level; the fields are
/// individually atomic so concurrent readers always observe a coherent
/// value without taking the book lock.
///
/// Orders are shared by reference (`Arc<Order>`): the copy a repository
/// hands out is the same entity the book fills.
#[derive(Debug)]
pub struct Order {
    order_id: OrderId,
    instrument_id: InstrumentId,
    order_type: OrderType,
    quantity: Quantity,
    limit_price: Option<Price>,
    entered_at: Timestamp,
    filled: AtomicU64,
    invalid: AtomicBool,
    last_fill_price: RwLock<Option<Price>>,
}

impl Order {
    /// Create a new order, stamping its entry time.
    ///
    /// The order type is derived from the limit price: absent means
    /// `Market`, present means `Limit`.
    #[must_use]
    pub fn new(
        order_id: OrderId,
        instrument_id: InstrumentId,
        quantity: Quantity,
        limit_price: Option<Price>,
    ) -> Self {
        let order_type = if limit_price.is_some() {
            OrderType::Limit
        } else {
            OrderType::Market
        };
        Self {
            order_id,
            instrument_id,
            order_type,
            quantity,
            limit_price,
            entered_at: Timestamp::now(),
            filled: AtomicU64::new(0),
            invalid: AtomicBool::new(false),
            last_fill_price: RwLock::new(None),
        }
    }

    /// The order's unique id.
    #[must_use]
    pub const fn order_id(&self) -> OrderId {
        self.order_id
    }

    /// The instrument this order rests against.
    #[must_use]
    pub const fn instrument_id(&self) -> &InstrumentId {
        &self.instrument_id
    }

    /// Market or limit, fixed at construction.
    #[must_use]
    pub const fn order_type(&self) -> OrderType {
        self.order_type
    }

    /// Requested quantity, immutable.
    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Limit price, `None` for market orders.
    #[must_use]
    pub const fn limit_price(&self) -> Option<Price> {
        self.limit_price
    }

    /// When the order entered the system.
    #[must_use]
    pub const fn entered_at(&self) -> Timestamp {
        self.entered_at
    }

    /// Cumulative filled quantity.
    #[must_use]
    pub fn filled_quantity(&self) -> Quantity {
        Quantity::new(self.filled.load(Ordering::Acquire))
    }

    /// Requested quantity minus cumulative filled quantity.
    #[must_use]
    pub fn remaining_quantity(&self) -> Quantity {
        self.quantity.saturating_sub(self.filled_quantity())
    }

    /// Price of the most recent fill applied to this order.
    #[must_use]
    pub fn last_fill_price(&self) -> Option<Price> {
        *self.last_fill_price.read().unwrap()
    }

    /// True once the order has been excluded from further fills.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        self.invalid.load(Ordering::Acquire)
    }

    /// True when cumulative fills have reached the requested quantity.
    #[must_use]
    pub fn is_fully_filled(&self) -> bool {
        self.filled_quantity() == self.quantity
    }

    /// Set the cumulative filled quantity.
    ///
    /// Monotonic non-decrease is the caller's obligation; this only
    /// rejects fills above the requested quantity.
    ///
    /// # Errors
    ///
    /// Returns [`BookError::Overfill`] if `new_cumulative` exceeds the
    /// requested quantity. That path is unreachable through the book's
    /// fill pass, which caps every increment by the remaining quantity.
    pub fn record_fill(&self, new_cumulative: Quantity) -> Result<(), BookError> {
        if new_cumulative > self.quantity {
            return Err(BookError::Overfill {
                order_id: self.order_id,
                requested: self.quantity,
                attempted: new_cumulative,
            });
        }
        self.filled.store(new_cumulative.amount(), Ordering::Release);
        Ok(())
    }

    /// Record the price of the fill most recently applied.
    pub fn record_fill_price(&self, price: Price) {
        *self.last_fill_price.write().unwrap() = Some(price);
    }

    /// Permanently exclude this order from fills. Idempotent.
    pub fn mark_invalid(&self) {
        self.invalid.store(true, Ordering::Release);
    }
}

/// Orders are entities: equality is identity, not field values.
impl PartialEq for Order {
    fn eq(&self, other: &Self) -> bool {
        self.order_id == other.order_id
    }
}

impl Eq for Order {}

impl Hash for Order {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.order_id.hash(state);
    }
}
