//! Book Events Port (Driven Port)
//!
//! Interface through which the outer layers announce newly recorded
//! orders and executions to whatever consumes them.

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::services::{BookService, ServiceError};
use crate::domain::book::aggregate::Order;
use crate::domain::book::repository::{BookRepository, ExecutionRepository, OrderRepository};
use crate::domain::book::value_objects::Execution;

/// Port for announcing newly recorded entities.
#[async_trait]
pub trait BookEventsPort: Send + Sync {
    /// Announce a newly recorded order.
    ///
    /// # Errors
    ///
    /// Returns the downstream rejection, if any.
    async fn order_created(&self, order: Arc<Order>) -> Result<(), ServiceError>;

    /// Announce a newly recorded execution.
    ///
    /// # Errors
    ///
    /// Returns the downstream rejection, if any.
    async fn execution_created(&self, execution: Execution) -> Result<(), ServiceError>;
}

/// In-process implementation forwarding straight to the book service.
pub struct DirectBookEvents<O, E, B>
where
    O: OrderRepository,
    E: ExecutionRepository,
    B: BookRepository,
{
    service: Arc<BookService<O, E, B>>,
}

impl<O, E, B> DirectBookEvents<O, E, B>
where
    O: OrderRepository,
    E: ExecutionRepository,
    B: BookRepository,
{
    /// Create a forwarding port over the given service.
    pub fn new(service: Arc<BookService<O, E, B>>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl<O, E, B> BookEventsPort for DirectBookEvents<O, E, B>
where
    O: OrderRepository,
    E: ExecutionRepository,
    B: BookRepository,
{
    async fn order_created(&self, order: Arc<Order>) -> Result<(), ServiceError> {
        self.service.order_created(order).await
    }

    async fn execution_created(&self, execution: Execution) -> Result<(), ServiceError> {
        self.service.execution_created(execution).await
    }
}

/// No-op port for tests that exercise storage without a service.
#[derive(Debug, Clone, Default)]
pub struct NoOpBookEvents;

#[async_trait]
impl BookEventsPort for NoOpBookEvents {
    async fn order_created(&self, _order: Arc<Order>) -> Result<(), ServiceError> {
        Ok(())
    }

    async fn execution_created(&self, _execution: Execution) -> Result<(), ServiceError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    use crate::domain::shared::{ExecutionId, InstrumentId, OrderId, Price, Quantity};
    use crate::infrastructure::persistence::{
        InMemoryBookRepository, InMemoryExecutionRepository, InMemoryOrderRepository,
    };

    #[tokio::test]
    async fn no_op_port_accepts_everything() {
        let port = NoOpBookEvents;

        let order = Arc::new(Order::new(
            OrderId::new(1),
            InstrumentId::new("CS"),
            Quantity::new(100),
            None,
        ));
        assert!(port.order_created(order).await.is_ok());

        let execution = Execution::new(
            ExecutionId::new(1),
            InstrumentId::new("CS"),
            Quantity::new(100),
            Price::new(dec!(14.32)),
        );
        assert!(port.execution_created(execution).await.is_ok());
    }

    #[tokio::test]
    async fn direct_port_forwards_to_the_service() {
        let service = Arc::new(BookService::new(
            Arc::new(InMemoryOrderRepository::new()),
            Arc::new(InMemoryExecutionRepository::new()),
            Arc::new(InMemoryBookRepository::new()),
        ));
        service.open_book(InstrumentId::new("CS")).await.unwrap();

        let port = DirectBookEvents::new(Arc::clone(&service));
        let order = Arc::new(Order::new(
            OrderId::new(1),
            InstrumentId::new("CS"),
            Quantity::new(100),
            None,
        ));
        port.order_created(Arc::clone(&order)).await.unwrap();

        let book = service
            .find_book(&InstrumentId::new("CS"))
            .await
            .unwrap()
            .unwrap();
        assert!(book.contains_order(order.order_id()));
    }
}
