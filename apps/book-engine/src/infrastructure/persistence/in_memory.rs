//! In-memory repository adapters.
//!
//! `DashMap`-backed implementations of the domain repository traits.
//! Ids come from atomic counters so the first allocated id is always 1
//! and ids are never reused. Query results are sorted by id so replay
//! follows creation order.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::book::aggregate::{Order, OrderBook};
use crate::domain::book::repository::{
    BookRepository, ExecutionRepository, OrderRepository, StoreError,
};
use crate::domain::book::value_objects::Execution;
use crate::domain::shared::{ExecutionId, InstrumentId, OrderId};

/// In-memory implementation of `OrderRepository`.
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    orders: DashMap<OrderId, Arc<Order>>,
    sequence: AtomicU64,
}

impl InMemoryOrderRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored orders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Whether the repository holds no orders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn next_order_id(&self) -> OrderId {
        OrderId::new(self.sequence.fetch_add(1, Ordering::Relaxed) + 1)
    }

    async fn store(&self, order: Arc<Order>) -> Result<(), StoreError> {
        self.orders.insert(order.order_id(), order);
        Ok(())
    }

    async fn find(&self, id: OrderId) -> Result<Option<Arc<Order>>, StoreError> {
        Ok(self.orders.get(&id).map(|entry| Arc::clone(entry.value())))
    }

    async fn find_by_instrument(
        &self,
        instrument_id: &InstrumentId,
    ) -> Result<Vec<Arc<Order>>, StoreError> {
        let mut orders: Vec<Arc<Order>> = self
            .orders
            .iter()
            .filter(|entry| entry.value().instrument_id() == instrument_id)
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        orders.sort_by_key(|order| order.order_id());
        Ok(orders)
    }

    async fn find_all(&self) -> Result<Vec<Arc<Order>>, StoreError> {
        let mut orders: Vec<Arc<Order>> = self
            .orders
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        orders.sort_by_key(|order| order.order_id());
        Ok(orders)
    }
}

/// In-memory implementation of `ExecutionRepository`.
#[derive(Debug, Default)]
pub struct InMemoryExecutionRepository {
    executions: DashMap<ExecutionId, Execution>,
    sequence: AtomicU64,
}

impl InMemoryExecutionRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored executions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.executions.len()
    }

    /// Whether the repository holds no executions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.executions.is_empty()
    }
}

#[async_trait]
impl ExecutionRepository for InMemoryExecutionRepository {
    async fn next_execution_id(&self) -> ExecutionId {
        ExecutionId::new(self.sequence.fetch_add(1, Ordering::Relaxed) + 1)
    }

    async fn store(&self, execution: Execution) -> Result<(), StoreError> {
        self.executions.insert(execution.execution_id(), execution);
        Ok(())
    }

    async fn find(&self, id: ExecutionId) -> Result<Option<Execution>, StoreError> {
        Ok(self.executions.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_by_instrument(
        &self,
        instrument_id: &InstrumentId,
    ) -> Result<Vec<Execution>, StoreError> {
        let mut executions: Vec<Execution> = self
            .executions
            .iter()
            .filter(|entry| entry.value().instrument_id() == instrument_id)
            .map(|entry| entry.value().clone())
            .collect();
        executions.sort_by_key(Execution::execution_id);
        Ok(executions)
    }

    async fn find_all(&self) -> Result<Vec<Execution>, StoreError> {
        let mut executions: Vec<Execution> = self
            .executions
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        executions.sort_by_key(Execution::execution_id);
        Ok(executions)
    }
}

/// In-memory implementation of `BookRepository`.
#[derive(Debug, Default)]
pub struct InMemoryBookRepository {
    books: DashMap<InstrumentId, Arc<OrderBook>>,
}

impl InMemoryBookRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored books.
    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Whether the repository holds no books.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn store(&self, book: Arc<OrderBook>) -> Result<(), StoreError> {
        self.books.insert(book.instrument_id().clone(), book);
        Ok(())
    }

    async fn find(
        &self,
        instrument_id: &InstrumentId,
    ) -> Result<Option<Arc<OrderBook>>, StoreError> {
        Ok(self
            .books
            .get(instrument_id)
            .map(|entry| Arc::clone(entry.value())))
    }

    async fn find_all(&self) -> Result<Vec<Arc<OrderBook>>, StoreError> {
        let mut books: Vec<Arc<OrderBook>> = self
            .books
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        books.sort_by(|a, b| a.instrument_id().as_str().cmp(b.instrument_id().as_str()));
        Ok(books)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    use crate::domain::shared::{Price, Quantity};

    fn order(id: u64, instrument: &str, quantity: u64) -> Arc<Order> {
        Arc::new(Order::new(
            OrderId::new(id),
            InstrumentId::new(instrument),
            Quantity::new(quantity),
            None,
        ))
    }

    #[tokio::test]
    async fn order_ids_start_at_one_and_increase() {
        let repo = InMemoryOrderRepository::new();

        assert_eq!(repo.next_order_id().await, OrderId::new(1));
        assert_eq!(repo.next_order_id().await, OrderId::new(2));
        assert_eq!(repo.next_order_id().await, OrderId::new(3));
    }

    #[tokio::test]
    async fn execution_ids_start_at_one_and_increase() {
        let repo = InMemoryExecutionRepository::new();

        assert_eq!(repo.next_execution_id().await, ExecutionId::new(1));
        assert_eq!(repo.next_execution_id().await, ExecutionId::new(2));
    }

    #[tokio::test]
    async fn stored_orders_are_found_by_id() {
        let repo = InMemoryOrderRepository::new();
        let order = order(1, "CS", 100);

        repo.store(Arc::clone(&order)).await.unwrap();

        let found = repo.find(OrderId::new(1)).await.unwrap().unwrap();
        assert_eq!(found.order_id(), order.order_id());
        assert!(repo.find(OrderId::new(2)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_by_instrument_filters_and_sorts() {
        let repo = InMemoryOrderRepository::new();
        repo.store(order(2, "CS", 50)).await.unwrap();
        repo.store(order(1, "CS", 100)).await.unwrap();
        repo.store(order(3, "GE", 10)).await.unwrap();

        let found = repo
            .find_by_instrument(&InstrumentId::new("CS"))
            .await
            .unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].order_id(), OrderId::new(1));
        assert_eq!(found[1].order_id(), OrderId::new(2));
    }

    #[tokio::test]
    async fn stored_order_state_is_shared_not_copied() {
        let repo = InMemoryOrderRepository::new();
        let order = order(1, "CS", 100);
        repo.store(Arc::clone(&order)).await.unwrap();

        order.record_fill(Quantity::new(40)).unwrap();

        let found = repo.find(OrderId::new(1)).await.unwrap().unwrap();
        assert_eq!(found.filled_quantity(), Quantity::new(40));
    }

    #[tokio::test]
    async fn executions_are_stored_and_filtered() {
        let repo = InMemoryExecutionRepository::new();
        let execution = Execution::new(
            ExecutionId::new(1),
            InstrumentId::new("CS"),
            Quantity::new(100),
            Price::new(dec!(14.32)),
        );
        repo.store(execution.clone()).await.unwrap();

        let found = repo.find(ExecutionId::new(1)).await.unwrap().unwrap();
        assert_eq!(found, execution);
        assert!(repo
            .find_by_instrument(&InstrumentId::new("GE"))
            .await
            .unwrap()
            .is_empty());
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn books_are_keyed_by_instrument() {
        let repo = InMemoryBookRepository::new();
        let book = Arc::new(OrderBook::new(InstrumentId::new("CS")));
        repo.store(Arc::clone(&book)).await.unwrap();

        let found = repo.find(&InstrumentId::new("CS")).await.unwrap().unwrap();
        assert!(Arc::ptr_eq(&found, &book));
        assert!(repo.find(&InstrumentId::new("GE")).await.unwrap().is_none());
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn storing_the_same_book_twice_keeps_one_entry() {
        let repo = InMemoryBookRepository::new();
        let book = Arc::new(OrderBook::new(InstrumentId::new("CS")));

        repo.store(Arc::clone(&book)).await.unwrap();
        repo.store(book).await.unwrap();

        assert_eq!(repo.len(), 1);
    }
}
