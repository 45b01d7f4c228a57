//! Repository traits for orders, executions and books.
//!
//! Domain interfaces (ports) implemented by adapters in the
//! infrastructure layer. Identity allocation lives here too: the core
//! never generates its own ids, it consumes monotonically increasing
//! ones from the repositories.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use super::aggregate::{Order, OrderBook};
use super::value_objects::Execution;
use crate::domain::shared::{ExecutionId, InstrumentId, OrderId};

/// Storage failure surfaced by a repository.
///
/// The in-memory adapters never fail, but the seam stays fallible for
/// the sake of durable implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be reached or refused the operation.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Repository for resting orders.
///
/// Orders are shared mutable entities; the repository stores and hands
/// out `Arc`s so fill state written through a book is visible to every
/// reader.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Allocate the next order id. Monotonically increasing, never reused.
    async fn next_order_id(&self) -> OrderId;

    /// Save an order (insert or update by id).
    ///
    /// # Errors
    ///
    /// Returns error if persistence fails.
    async fn store(&self, order: Arc<Order>) -> Result<(), StoreError>;

    /// Find an order by id.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find(&self, id: OrderId) -> Result<Option<Arc<Order>>, StoreError>;

    /// All orders resting against one instrument.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_instrument(
        &self,
        instrument_id: &InstrumentId,
    ) -> Result<Vec<Arc<Order>>, StoreError>;

    /// Every stored order.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_all(&self) -> Result<Vec<Arc<Order>>, StoreError>;
}

/// Repository for trade executions.
#[async_trait]
pub trait ExecutionRepository: Send + Sync {
    /// Allocate the next execution id. Monotonically increasing, never reused.
    async fn next_execution_id(&self) -> ExecutionId;

    /// Save an execution.
    ///
    /// # Errors
    ///
    /// Returns error if persistence fails.
    async fn store(&self, execution: Execution) -> Result<(), StoreError>;

    /// Find an execution by id.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find(&self, id: ExecutionId) -> Result<Option<Execution>, StoreError>;

    /// All executions confirmed for one instrument.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_instrument(
        &self,
        instrument_id: &InstrumentId,
    ) -> Result<Vec<Execution>, StoreError>;

    /// Every stored execution.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_all(&self) -> Result<Vec<Execution>, StoreError>;
}

/// Repository for order books, keyed by instrument.
///
/// Books are shared aggregates: `find` returns the same `Arc` that was
/// stored, never a copy.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Save a book under its instrument id.
    ///
    /// # Errors
    ///
    /// Returns error if persistence fails.
    async fn store(&self, book: Arc<OrderBook>) -> Result<(), StoreError>;

    /// Find the book for one instrument.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find(&self, instrument_id: &InstrumentId) -> Result<Option<Arc<OrderBook>>, StoreError>;

    /// Every stored book.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_all(&self) -> Result<Vec<Arc<OrderBook>>, StoreError>;
}
