//! HTTP Controller (Driver Adapter)
//!
//! Axum-based REST API. Creation endpoints record the entity first and
//! notify the book service second, so a rejected notification answers
//! 422 while the entity stays recorded for a later replay.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};

use crate::application::dto::{BookStatistics, ExecutionDto, OrderDto};
use crate::application::ports::BookEventsPort;
use crate::application::services::{BookService, ServiceError};
use crate::domain::book::aggregate::Order;
use crate::domain::book::repository::{BookRepository, ExecutionRepository, OrderRepository};
use crate::domain::book::value_objects::Execution;
use crate::domain::shared::{ExecutionId, InstrumentId, OrderId, Price, Quantity};

use super::request::{CreateExecutionRequest, CreateOrderRequest};
use super::response::{ErrorResponse, HealthResponse};

/// Application state shared across handlers.
pub struct AppState<O, E, B, N>
where
    O: OrderRepository,
    E: ExecutionRepository,
    B: BookRepository,
    N: BookEventsPort,
{
    /// Order store and id allocator.
    pub order_repository: Arc<O>,
    /// Execution store and id allocator.
    pub execution_repository: Arc<E>,
    /// Book lifecycle service.
    pub service: Arc<BookService<O, E, B>>,
    /// Notification channel for newly recorded entities.
    pub events: Arc<N>,
    /// Application version.
    pub version: String,
}

impl<O, E, B, N> Clone for AppState<O, E, B, N>
where
    O: OrderRepository,
    E: ExecutionRepository,
    B: BookRepository,
    N: BookEventsPort,
{
    fn clone(&self) -> Self {
        Self {
            order_repository: Arc::clone(&self.order_repository),
            execution_repository: Arc::clone(&self.execution_repository),
            service: Arc::clone(&self.service),
            events: Arc::clone(&self.events),
            version: self.version.clone(),
        }
    }
}

/// Create the HTTP router with all endpoints.
pub fn create_router<O, E, B, N>(state: AppState<O, E, B, N>) -> Router
where
    O: OrderRepository + 'static,
    E: ExecutionRepository + 'static,
    B: BookRepository + 'static,
    N: BookEventsPort + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/order", post(create_order))
        .route("/order/all", get(list_orders))
        .route("/order/{order_id}", get(get_order))
        .route("/execution", post(create_execution))
        .route("/execution/all", get(list_executions))
        .route("/execution/{execution_id}", get(get_execution))
        .route("/orderbook/all", get(list_books))
        .route("/orderbook/open/{instrument_id}", post(open_book))
        .route("/orderbook/close/{instrument_id}", post(close_book))
        .route("/orderbook/{instrument_id}", get(get_book))
        .with_state(state)
}

/// Map a service rejection onto the wire.
fn service_rejection(error: &ServiceError) -> Response {
    let status = match error {
        ServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::UNPROCESSABLE_ENTITY,
    };
    (status, Json(ErrorResponse::new(error))).into_response()
}

/// Health check endpoint.
async fn health_check<O, E, B, N>(State(state): State<AppState<O, E, B, N>>) -> impl IntoResponse
where
    O: OrderRepository,
    E: ExecutionRepository,
    B: BookRepository,
    N: BookEventsPort,
{
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
    })
}

/// Record a new order.
async fn create_order<O, E, B, N>(
    State(state): State<AppState<O, E, B, N>>,
    Json(request): Json<CreateOrderRequest>,
) -> Response
where
    O: OrderRepository,
    E: ExecutionRepository,
    B: BookRepository,
    N: BookEventsPort,
{
    if request.quantity == 0 {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse::new("order quantity must be positive")),
        )
            .into_response();
    }

    let order_id = state.order_repository.next_order_id().await;
    let order = Arc::new(Order::new(
        order_id,
        InstrumentId::new(request.instrument_id),
        Quantity::new(request.quantity),
        request.price.map(Price::new),
    ));

    if let Err(e) = state.order_repository.store(Arc::clone(&order)).await {
        tracing::error!(error = %e, "failed to store order");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(e)),
        )
            .into_response();
    }

    if let Err(e) = state.events.order_created(Arc::clone(&order)).await {
        return service_rejection(&e);
    }

    (StatusCode::CREATED, Json(OrderDto::from_order(&order))).into_response()
}

/// Look up one order.
async fn get_order<O, E, B, N>(
    State(state): State<AppState<O, E, B, N>>,
    Path(order_id): Path<u64>,
) -> Response
where
    O: OrderRepository,
    E: ExecutionRepository,
    B: BookRepository,
    N: BookEventsPort,
{
    match state.order_repository.find(OrderId::new(order_id)).await {
        Ok(Some(order)) => (StatusCode::OK, Json(OrderDto::from_order(&order))).into_response(),
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(e)),
        )
            .into_response(),
    }
}

/// List every recorded order.
async fn list_orders<O, E, B, N>(State(state): State<AppState<O, E, B, N>>) -> Response
where
    O: OrderRepository,
    E: ExecutionRepository,
    B: BookRepository,
    N: BookEventsPort,
{
    match state.order_repository.find_all().await {
        Ok(orders) => {
            let dtos: Vec<OrderDto> = orders
                .iter()
                .map(|order| OrderDto::from_order(order))
                .collect();
            (StatusCode::OK, Json(dtos)).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(e)),
        )
            .into_response(),
    }
}

/// Record a new execution.
async fn create_execution<O, E, B, N>(
    State(state): State<AppState<O, E, B, N>>,
    Json(request): Json<CreateExecutionRequest>,
) -> Response
where
    O: OrderRepository,
    E: ExecutionRepository,
    B: BookRepository,
    N: BookEventsPort,
{
    if request.quantity == 0 {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse::new("execution quantity must be positive")),
        )
            .into_response();
    }

    let execution_id = state.execution_repository.next_execution_id().await;
    let execution = Execution::new(
        execution_id,
        InstrumentId::new(request.instrument_id),
        Quantity::new(request.quantity),
        Price::new(request.price),
    );

    if let Err(e) = state
        .execution_repository
        .store(execution.clone())
        .await
    {
        tracing::error!(error = %e, "failed to store execution");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(e)),
        )
            .into_response();
    }

    if let Err(e) = state.events.execution_created(execution.clone()).await {
        return service_rejection(&e);
    }

    (
        StatusCode::CREATED,
        Json(ExecutionDto::from_execution(&execution)),
    )
        .into_response()
}

/// Look up one execution.
async fn get_execution<O, E, B, N>(
    State(state): State<AppState<O, E, B, N>>,
    Path(execution_id): Path<u64>,
) -> Response
where
    O: OrderRepository,
    E: ExecutionRepository,
    B: BookRepository,
    N: BookEventsPort,
{
    match state
        .execution_repository
        .find(ExecutionId::new(execution_id))
        .await
    {
        Ok(Some(execution)) => (
            StatusCode::OK,
            Json(ExecutionDto::from_execution(&execution)),
        )
            .into_response(),
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(e)),
        )
            .into_response(),
    }
}

/// List every recorded execution.
async fn list_executions<O, E, B, N>(State(state): State<AppState<O, E, B, N>>) -> Response
where
    O: OrderRepository,
    E: ExecutionRepository,
    B: BookRepository,
    N: BookEventsPort,
{
    match state.execution_repository.find_all().await {
        Ok(executions) => {
            let dtos: Vec<ExecutionDto> = executions
                .iter()
                .map(ExecutionDto::from_execution)
                .collect();
            (StatusCode::OK, Json(dtos)).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(e)),
        )
            .into_response(),
    }
}

/// Open the book for an instrument.
async fn open_book<O, E, B, N>(
    State(state): State<AppState<O, E, B, N>>,
    Path(instrument_id): Path<String>,
) -> Response
where
    O: OrderRepository,
    E: ExecutionRepository,
    B: BookRepository,
    N: BookEventsPort,
{
    match state.service.open_book(InstrumentId::new(instrument_id)).await {
        Ok(()) => StatusCode::CREATED.into_response(),
        Err(e) => service_rejection(&e),
    }
}

/// Close the book for an instrument.
async fn close_book<O, E, B, N>(
    State(state): State<AppState<O, E, B, N>>,
    Path(instrument_id): Path<String>,
) -> Response
where
    O: OrderRepository,
    E: ExecutionRepository,
    B: BookRepository,
    N: BookEventsPort,
{
    match state
        .service
        .close_book(&InstrumentId::new(instrument_id))
        .await
    {
        Ok(()) => StatusCode::CREATED.into_response(),
        Err(e) => service_rejection(&e),
    }
}

/// Statistics for one instrument's book.
async fn get_book<O, E, B, N>(
    State(state): State<AppState<O, E, B, N>>,
    Path(instrument_id): Path<String>,
) -> Response
where
    O: OrderRepository,
    E: ExecutionRepository,
    B: BookRepository,
    N: BookEventsPort,
{
    match state.service.find_book(&InstrumentId::new(instrument_id)).await {
        Ok(Some(book)) => (StatusCode::OK, Json(BookStatistics::from_book(&book))).into_response(),
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => service_rejection(&e),
    }
}

/// Statistics for every book.
async fn list_books<O, E, B, N>(State(state): State<AppState<O, E, B, N>>) -> Response
where
    O: OrderRepository,
    E: ExecutionRepository,
    B: BookRepository,
    N: BookEventsPort,
{
    match state.service.all_books().await {
        Ok(books) => {
            let stats: Vec<BookStatistics> = books
                .iter()
                .map(|book| BookStatistics::from_book(book))
                .collect();
            (StatusCode::OK, Json(stats)).into_response()
        }
        Err(e) => service_rejection(&e),
    }
}
