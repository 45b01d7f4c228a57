//! The order book aggregate root.

use std::sync::{Arc, Mutex};

use dashmap::DashMap;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::book::aggregate::Order;
use crate::domain::book::errors::BookError;
use crate::domain::book::services::allocation;
use crate::domain::book::value_objects::{BookState, Execution};
use crate::domain::shared::{ExecutionId, InstrumentId, OrderId, Price, Quantity};

/// Absolute tolerance between the reference price and any later
/// execution's price. Comparison is strict: a difference of exactly
/// 0.0001 is rejected.
pub const PRICE_TOLERANCE: Decimal = dec!(0.0001);

/// State guarded by the book's critical section: the lifecycle state and
/// the reference price move together with execution acceptance.
#[derive(Debug)]
struct Head {
    state: BookState,
    reference_price: Option<Price>,
}

/// Aggregates resting orders for one instrument and reconciles them
/// against confirmed trade executions.
///
/// While `Open` the book accepts orders; once `Closed` it accepts
/// executions, and every accepted execution synchronously invalidates
/// newly price-ineligible orders and distributes the confirmed quantity
/// across the remaining eligible ones pro rata.
///
/// # Concurrency
///
/// The book is shared across request tasks. `open`, `close`,
/// `accept_order` and `accept_execution` serialize on an internal lock
/// over the head (state + reference price); the whole
/// check-then-mutate sequence of `accept_execution` is one critical
/// section. Order and execution lookups go straight to concurrent maps
/// without taking that lock, and per-order fill state is atomically
/// readable, so readers never block behind a running fill pass. Books
/// for different instruments share nothing.
#[derive(Debug)]
pub struct OrderBook {
    instrument_id: InstrumentId,
    head: Mutex<Head>,
    orders: DashMap<OrderId, Arc<Order>>,
    executions: DashMap<ExecutionId, Execution>,
}

impl OrderBook {
    /// Create a book for one instrument. Books start `Closed`.
    #[must_use]
    pub fn new(instrument_id: InstrumentId) -> Self {
        Self {
            instrument_id,
            head: Mutex::new(Head {
                state: BookState::Closed,
                reference_price: None,
            }),
            orders: DashMap::new(),
            executions: DashMap::new(),
        }
    }

    /// The instrument this book is scoped to.
    #[must_use]
    pub const fn instrument_id(&self) -> &InstrumentId {
        &self.instrument_id
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> BookState {
        self.head.lock().unwrap().state
    }

    /// Price of the first accepted execution, once set.
    #[must_use]
    pub fn reference_price(&self) -> Option<Price> {
        self.head.lock().unwrap().reference_price
    }

    /// Open the book for order intake. Reopening an open book is a
    /// no-op; rejecting redundant opens is the service layer's job.
    pub fn open(&self) {
        self.head.lock().unwrap().state = BookState::Open;
    }

    /// Close the book for execution intake. Idempotent, like [`open`].
    ///
    /// [`open`]: Self::open
    pub fn close(&self) {
        self.head.lock().unwrap().state = BookState::Closed;
    }

    /// Accept a resting order into the book.
    ///
    /// Re-submitting an existing order id replaces the prior entry.
    ///
    /// # Errors
    ///
    /// [`BookError::BookClosed`] unless the book is open;
    /// [`BookError::InstrumentMismatch`] if the order belongs to another
    /// instrument. A rejected order leaves the book unchanged.
    pub fn accept_order(&self, order: Arc<Order>) -> Result<(), BookError> {
        let head = self.head.lock().unwrap();
        if !head.state.is_open() {
            return Err(BookError::BookClosed {
                instrument_id: self.instrument_id.clone(),
            });
        }
        if *order.instrument_id() != self.instrument_id {
            return Err(BookError::InstrumentMismatch {
                expected: self.instrument_id.clone(),
                actual: order.instrument_id().clone(),
            });
        }
        self.orders.insert(order.order_id(), order);
        Ok(())
    }

    /// Accept a trade execution and reconcile it against the book.
    ///
    /// Preconditions, first failure wins: the book is closed; the
    /// instrument matches; the book is not already fully reconciled; the
    /// price lies within [`PRICE_TOLERANCE`] of the reference price
    /// (when one is established). Only when all pass: the reference
    /// price is set from the first execution, the execution is
    /// recorded, and the fill pass runs.
    ///
    /// # Errors
    ///
    /// [`BookError::BookOpen`], [`BookError::InstrumentMismatch`],
    /// [`BookError::AlreadyReconciled`] or
    /// [`BookError::PriceOutOfTolerance`] per the precondition that
    /// failed. A rejected execution leaves the book unchanged.
    pub fn accept_execution(&self, execution: Execution) -> Result<(), BookError> {
        let mut head = self.head.lock().unwrap();
        if head.state.is_open() {
            return Err(BookError::BookOpen {
                instrument_id: self.instrument_id.clone(),
            });
        }
        if *execution.instrument_id() != self.instrument_id {
            return Err(BookError::InstrumentMismatch {
                expected: self.instrument_id.clone(),
                actual: execution.instrument_id().clone(),
            });
        }
        if self.is_reconciled() {
            return Err(BookError::AlreadyReconciled {
                instrument_id: self.instrument_id.clone(),
            });
        }
        if let Some(reference) = head.reference_price {
            if reference.abs_diff(execution.price()) >= PRICE_TOLERANCE {
                return Err(BookError::PriceOutOfTolerance {
                    reference,
                    offered: execution.price(),
                });
            }
        } else {
            head.reference_price = Some(execution.price());
        }

        let price = execution.price();
        let quantity = execution.quantity();
        self.executions.insert(execution.execution_id(), execution);
        self.apply_fill(quantity, price)
    }

    /// One fill pass: invalidate orders priced out by this execution,
    /// then distribute its quantity across the remaining eligible pool
    /// in proportion to requested quantity.
    ///
    /// Runs under the head lock taken by [`accept_execution`].
    fn apply_fill(&self, quantity: Quantity, price: Price) -> Result<(), BookError> {
        self.invalidate_outpriced(price);

        let pool = self.valid_orders();
        if pool.is_empty() {
            // Nothing eligible: the execution stays recorded but
            // distributes zero. Not an error.
            return Ok(());
        }

        let weights = allocation::weights(&pool);
        for order in &pool {
            let allocated = allocation::allocate(weights[&order.order_id()], quantity);
            let increment = order.remaining_quantity().min(allocated);
            order.record_fill(order.filled_quantity() + increment)?;
            order.record_fill_price(price);
        }
        Ok(())
    }

    /// Mark every order whose limit price is strictly below the
    /// execution price invalid. Market orders carry no limit and are
    /// never invalidated. Permanent; re-running the pass at the same
    /// price changes nothing.
    fn invalidate_outpriced(&self, price: Price) {
        for entry in &self.orders {
            let order = entry.value();
            if order.is_invalid() {
                continue;
            }
            if order.limit_price().is_some_and(|limit| limit < price) {
                order.mark_invalid();
            }
        }
    }

    /// Orders eligible for distribution: not invalid, not fully filled.
    #[must_use]
    pub fn valid_orders(&self) -> Vec<Arc<Order>> {
        self.orders
            .iter()
            .filter(|entry| !entry.value().is_invalid() && !entry.value().is_fully_filled())
            .map(|entry| Arc::clone(entry.value()))
            .collect()
    }

    /// All orders currently held by the book.
    #[must_use]
    pub fn orders(&self) -> Vec<Arc<Order>> {
        self.orders
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect()
    }

    /// Look up one order by id.
    #[must_use]
    pub fn order(&self, order_id: OrderId) -> Option<Arc<Order>> {
        self.orders.get(&order_id).map(|entry| Arc::clone(entry.value()))
    }

    /// Whether the book holds an order with this id.
    #[must_use]
    pub fn contains_order(&self, order_id: OrderId) -> bool {
        self.orders.contains_key(&order_id)
    }

    /// All executions accepted by the book.
    #[must_use]
    pub fn executions(&self) -> Vec<Execution> {
        self.executions
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Look up one execution by id.
    #[must_use]
    pub fn execution(&self, execution_id: ExecutionId) -> Option<Execution> {
        self.executions
            .get(&execution_id)
            .map(|entry| entry.value().clone())
    }

    /// Whether the book holds an execution with this id.
    #[must_use]
    pub fn contains_execution(&self, execution_id: ExecutionId) -> bool {
        self.executions.contains_key(&execution_id)
    }

    /// Number of orders held.
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Total requested quantity across all orders.
    #[must_use]
    pub fn total_demand(&self) -> Quantity {
        self.orders.iter().map(|entry| entry.value().quantity()).sum()
    }

    /// Requested quantity across invalidated orders.
    #[must_use]
    pub fn invalid_demand(&self) -> Quantity {
        self.orders
            .iter()
            .filter(|entry| entry.value().is_invalid())
            .map(|entry| entry.value().quantity())
            .sum()
    }

    /// Requested quantity across orders not invalidated, filled or not.
    #[must_use]
    pub fn valid_demand(&self) -> Quantity {
        self.orders
            .iter()
            .filter(|entry| !entry.value().is_invalid())
            .map(|entry| entry.value().quantity())
            .sum()
    }

    /// Cumulative filled quantity across all orders.
    #[must_use]
    pub fn execution_amount(&self) -> Quantity {
        self.orders
            .iter()
            .map(|entry| entry.value().filled_quantity())
            .sum()
    }

    /// Number of invalidated orders.
    #[must_use]
    pub fn invalid_order_count(&self) -> usize {
        self.orders
            .iter()
            .filter(|entry| entry.value().is_invalid())
            .count()
    }

    /// Number of orders not invalidated.
    #[must_use]
    pub fn valid_order_count(&self) -> usize {
        self.order_count() - self.invalid_order_count()
    }

    /// A book is fully reconciled when cumulative fills across all
    /// orders equal the requested quantity of its non-invalidated
    /// orders. An empty or fully invalidated book satisfies this
    /// vacuously (0 == 0) and therefore accepts no executions.
    #[must_use]
    pub fn is_reconciled(&self) -> bool {
        self.execution_amount() == self.valid_demand()
    }

    /// Order with the smallest requested quantity; ties break toward
    /// the lower order id.
    #[must_use]
    pub fn min_order(&self) -> Option<Arc<Order>> {
        self.orders()
            .into_iter()
            .min_by_key(|order| (order.quantity(), order.order_id()))
    }

    /// Order with the largest requested quantity; ties break toward the
    /// higher order id.
    #[must_use]
    pub fn max_order(&self) -> Option<Arc<Order>> {
        self.orders()
            .into_iter()
            .max_by_key(|order| (order.quantity(), order.order_id()))
    }

    /// Order with the earliest entry timestamp, never derived from map
    /// iteration order; ties break toward the lower order id.
    #[must_use]
    pub fn earliest_order(&self) -> Option<Arc<Order>> {
        self.orders()
            .into_iter()
            .min_by_key(|order| (order.entered_at(), order.order_id()))
    }

    /// Order with the latest entry timestamp; ties break toward the
    /// higher order id.
    #[must_use]
    pub fn latest_order(&self) -> Option<Arc<Order>> {
        self.orders()
            .into_iter()
            .max_by_key(|order| (order.entered_at(), order.order_id()))
    }
}
