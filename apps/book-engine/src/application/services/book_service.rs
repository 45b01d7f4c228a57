//! Book lifecycle orchestration.
//!
//! The service owns the interplay between the stores and the book
//! aggregates: lifecycle transitions replay stored entities into the
//! book, and creation notifications are forwarded only when a book is
//! in the right state to take them.

use std::sync::Arc;

use crate::domain::book::aggregate::{Order, OrderBook};
use crate::domain::book::errors::BookError;
use crate::domain::book::repository::{
    BookRepository, ExecutionRepository, OrderRepository, StoreError,
};
use crate::domain::book::value_objects::Execution;
use crate::domain::shared::InstrumentId;

/// Orchestration failure.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The book is already open.
    #[error("order book for instrument {instrument_id} is already open")]
    AlreadyOpen {
        /// Instrument whose book was targeted.
        instrument_id: String,
    },

    /// The book is already closed.
    #[error("order book for instrument {instrument_id} is already closed")]
    AlreadyClosed {
        /// Instrument whose book was targeted.
        instrument_id: String,
    },

    /// No book has ever been opened for the instrument.
    #[error("no order book exists for instrument {instrument_id}")]
    UnknownBook {
        /// Instrument whose book was targeted.
        instrument_id: String,
    },

    /// A book aggregate rejected the forwarded entity.
    #[error(transparent)]
    Book(#[from] BookError),

    /// A backing store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Application service coordinating books, orders and executions.
pub struct BookService<O, E, B>
where
    O: OrderRepository,
    E: ExecutionRepository,
    B: BookRepository,
{
    order_repository: Arc<O>,
    execution_repository: Arc<E>,
    book_repository: Arc<B>,
}

impl<O, E, B> BookService<O, E, B>
where
    O: OrderRepository,
    E: ExecutionRepository,
    B: BookRepository,
{
    /// Create a new service over the given stores.
    pub fn new(
        order_repository: Arc<O>,
        execution_repository: Arc<E>,
        book_repository: Arc<B>,
    ) -> Self {
        Self {
            order_repository,
            execution_repository,
            book_repository,
        }
    }

    /// Open the book for an instrument, creating it on first use.
    ///
    /// Stored orders for the instrument that the book does not yet
    /// contain are replayed into it, so orders recorded while no book
    /// was open are not lost.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::AlreadyOpen`] when the book is open, or
    /// propagates store and aggregate failures.
    pub async fn open_book(&self, instrument_id: InstrumentId) -> Result<(), ServiceError> {
        let book = match self.book_repository.find(&instrument_id).await? {
            Some(book) => book,
            None => Arc::new(OrderBook::new(instrument_id.clone())),
        };

        if book.state().is_open() {
            return Err(ServiceError::AlreadyOpen {
                instrument_id: instrument_id.to_string(),
            });
        }

        book.open();

        let stored = self
            .order_repository
            .find_by_instrument(&instrument_id)
            .await?;
        let mut replayed = 0_usize;
        for order in stored {
            if !book.contains_order(order.order_id()) {
                book.accept_order(order)?;
                replayed += 1;
            }
        }

        self.book_repository.store(Arc::clone(&book)).await?;
        tracing::info!(instrument = %instrument_id, replayed, "order book opened");
        Ok(())
    }

    /// Close the book for an instrument.
    ///
    /// Stored executions for the instrument that the book does not yet
    /// contain are replayed through `accept_execution`; the first
    /// rejection aborts the replay and propagates.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::UnknownBook`] when no book exists,
    /// [`ServiceError::AlreadyClosed`] when the book is closed, or
    /// propagates store and aggregate failures.
    pub async fn close_book(&self, instrument_id: &InstrumentId) -> Result<(), ServiceError> {
        let Some(book) = self.book_repository.find(instrument_id).await? else {
            return Err(ServiceError::UnknownBook {
                instrument_id: instrument_id.to_string(),
            });
        };

        if book.state().is_closed() {
            return Err(ServiceError::AlreadyClosed {
                instrument_id: instrument_id.to_string(),
            });
        }

        book.close();

        let stored = self
            .execution_repository
            .find_by_instrument(instrument_id)
            .await?;
        let mut replayed = 0_usize;
        for execution in stored {
            if !book.contains_execution(execution.execution_id()) {
                book.accept_execution(execution)?;
                replayed += 1;
            }
        }

        self.book_repository.store(Arc::clone(&book)).await?;
        tracing::info!(
            instrument = %instrument_id,
            replayed,
            reconciled = book.is_reconciled(),
            "order book closed"
        );
        Ok(())
    }

    /// Forward a newly recorded order to its instrument's book.
    ///
    /// Skips silently when no book exists or the book is closed; the
    /// order rests in its store until the next `open_book` replay.
    ///
    /// # Errors
    ///
    /// Propagates store and aggregate failures.
    pub async fn order_created(&self, order: Arc<Order>) -> Result<(), ServiceError> {
        match self.book_repository.find(order.instrument_id()).await? {
            Some(book) if book.state().is_open() => {
                book.accept_order(order)?;
                Ok(())
            }
            _ => {
                tracing::debug!(
                    instrument = %order.instrument_id(),
                    order_id = %order.order_id(),
                    "no open book, order rests in store"
                );
                Ok(())
            }
        }
    }

    /// Forward a newly recorded execution to its instrument's book.
    ///
    /// Skips silently when no book exists or the book is open; the
    /// execution rests in its store until the next `close_book` replay.
    /// Domain rejections from the book propagate to the caller.
    ///
    /// # Errors
    ///
    /// Propagates store and aggregate failures.
    pub async fn execution_created(&self, execution: Execution) -> Result<(), ServiceError> {
        match self
            .book_repository
            .find(execution.instrument_id())
            .await?
        {
            Some(book) if book.state().is_closed() => {
                book.accept_execution(execution)?;
                Ok(())
            }
            _ => {
                tracing::debug!(
                    instrument = %execution.instrument_id(),
                    execution_id = %execution.execution_id(),
                    "no closed book, execution rests in store"
                );
                Ok(())
            }
        }
    }

    /// Look up the book for an instrument.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn find_book(
        &self,
        instrument_id: &InstrumentId,
    ) -> Result<Option<Arc<OrderBook>>, ServiceError> {
        Ok(self.book_repository.find(instrument_id).await?)
    }

    /// All books, across every instrument.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn all_books(&self) -> Result<Vec<Arc<OrderBook>>, ServiceError> {
        Ok(self.book_repository.find_all().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    use crate::domain::book::value_objects::BookState;
    use crate::domain::shared::{Price, Quantity};
    use crate::infrastructure::persistence::{
        InMemoryBookRepository, InMemoryExecutionRepository, InMemoryOrderRepository,
    };

    fn service() -> BookService<
        InMemoryOrderRepository,
        InMemoryExecutionRepository,
        InMemoryBookRepository,
    > {
        BookService::new(
            Arc::new(InMemoryOrderRepository::new()),
            Arc::new(InMemoryExecutionRepository::new()),
            Arc::new(InMemoryBookRepository::new()),
        )
    }

    async fn stored_order(
        service: &BookService<
            InMemoryOrderRepository,
            InMemoryExecutionRepository,
            InMemoryBookRepository,
        >,
        instrument: &str,
        quantity: u64,
        limit: Option<Price>,
    ) -> Arc<Order> {
        let order = Arc::new(Order::new(
            service.order_repository.next_order_id().await,
            InstrumentId::new(instrument),
            Quantity::new(quantity),
            limit,
        ));
        service
            .order_repository
            .store(Arc::clone(&order))
            .await
            .unwrap();
        order
    }

    #[tokio::test]
    async fn open_book_replays_stored_orders() {
        let service = service();
        stored_order(&service, "CS", 100, Some(Price::new(dec!(14.34)))).await;
        stored_order(&service, "CS", 50, None).await;
        stored_order(&service, "GE", 10, None).await;

        service.open_book(InstrumentId::new("CS")).await.unwrap();

        let book = service
            .find_book(&InstrumentId::new("CS"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(book.state(), BookState::Open);
        assert_eq!(book.order_count(), 2);
        assert_eq!(book.total_demand(), Quantity::new(150));
    }

    #[tokio::test]
    async fn opening_an_open_book_is_rejected() {
        let service = service();
        service.open_book(InstrumentId::new("CS")).await.unwrap();

        let err = service
            .open_book(InstrumentId::new("CS"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::AlreadyOpen { .. }));
    }

    #[tokio::test]
    async fn closing_an_unknown_book_is_rejected() {
        let service = service();

        let err = service
            .close_book(&InstrumentId::new("CS"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::UnknownBook { .. }));
    }

    #[tokio::test]
    async fn closing_a_closed_book_is_rejected() {
        let service = service();
        service.open_book(InstrumentId::new("CS")).await.unwrap();
        service.close_book(&InstrumentId::new("CS")).await.unwrap();

        let err = service
            .close_book(&InstrumentId::new("CS"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::AlreadyClosed { .. }));
    }

    #[tokio::test]
    async fn order_created_forwards_into_an_open_book() {
        let service = service();
        service.open_book(InstrumentId::new("CS")).await.unwrap();

        let order = stored_order(&service, "CS", 100, None).await;
        service.order_created(Arc::clone(&order)).await.unwrap();

        let book = service
            .find_book(&InstrumentId::new("CS"))
            .await
            .unwrap()
            .unwrap();
        assert!(book.contains_order(order.order_id()));
    }

    #[tokio::test]
    async fn order_created_without_a_book_rests_until_replay() {
        let service = service();
        let order = stored_order(&service, "CS", 100, None).await;

        service.order_created(Arc::clone(&order)).await.unwrap();
        assert!(service
            .find_book(&InstrumentId::new("CS"))
            .await
            .unwrap()
            .is_none());

        service.open_book(InstrumentId::new("CS")).await.unwrap();
        let book = service
            .find_book(&InstrumentId::new("CS"))
            .await
            .unwrap()
            .unwrap();
        assert!(book.contains_order(order.order_id()));
    }

    #[tokio::test]
    async fn execution_created_against_an_open_book_rests_until_close() {
        let service = service();
        stored_order(&service, "CS", 100, None).await;
        service.open_book(InstrumentId::new("CS")).await.unwrap();

        let execution = Execution::new(
            service.execution_repository.next_execution_id().await,
            InstrumentId::new("CS"),
            Quantity::new(100),
            Price::new(dec!(14.32)),
        );
        service
            .execution_repository
            .store(execution.clone())
            .await
            .unwrap();

        // Book is still open: the notification is a silent no-op.
        service.execution_created(execution.clone()).await.unwrap();
        let book = service
            .find_book(&InstrumentId::new("CS"))
            .await
            .unwrap()
            .unwrap();
        assert!(!book.contains_execution(execution.execution_id()));

        // Closing replays the stored execution and fills the book.
        service.close_book(&InstrumentId::new("CS")).await.unwrap();
        assert!(book.contains_execution(execution.execution_id()));
        assert!(book.is_reconciled());
    }

    #[tokio::test]
    async fn domain_rejection_during_forwarding_propagates() {
        let service = service();
        stored_order(&service, "CS", 100, None).await;
        service.open_book(InstrumentId::new("CS")).await.unwrap();
        service.close_book(&InstrumentId::new("CS")).await.unwrap();

        let first = Execution::new(
            service.execution_repository.next_execution_id().await,
            InstrumentId::new("CS"),
            Quantity::new(50),
            Price::new(dec!(14.32)),
        );
        service.execution_created(first).await.unwrap();

        let outside = Execution::new(
            service.execution_repository.next_execution_id().await,
            InstrumentId::new("CS"),
            Quantity::new(50),
            Price::new(dec!(14.40)),
        );
        let err = service.execution_created(outside).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Book(BookError::PriceOutOfTolerance { .. })
        ));
    }
}
