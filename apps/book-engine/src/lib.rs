// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Book Engine - Rust Core Library
//!
//! Order-book aggregation and trade reconciliation engine.
//!
//! # Architecture (Clean Architecture + DDD)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core business logic with no service dependencies
//!   - `book`: `OrderBook` aggregate, `Order` entity, pro-rata fill
//!     distribution, lifecycle and tolerance invariants
//!   - `shared`: Identifier, price, quantity and timestamp value objects
//!
//! - **Application**: Orchestration over the aggregates
//!   - `services`: `BookService` (open/close replay, notification routing)
//!   - `ports`: `BookEventsPort` for announcing recorded entities
//!   - `dto`: Serializable snapshots for API boundaries
//!
//! - **Infrastructure**: Adapters
//!   - `persistence`: In-memory repositories with id allocation
//!   - `http`: Axum REST controller
//!
//! The aggregate enforces its own invariants: intake gating on the
//! open/closed lifecycle, the execution price tolerance, and pro-rata
//! distribution with per-order capacity caps all live in the domain
//! layer, not in the HTTP surface.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Services, ports and DTOs.
pub mod application;

/// Infrastructure layer - Adapters for storage and HTTP.
pub mod infrastructure;

/// Configuration loading.
pub mod config;

// =============================================================================
// Re-exports from Clean Architecture
// =============================================================================

// Domain re-exports
pub use domain::book::{
    BookError, BookState, Execution, Order, OrderBook, OrderType, PRICE_TOLERANCE,
};
pub use domain::shared::{ExecutionId, InstrumentId, OrderId, Price, Quantity, Timestamp};

// Application re-exports
pub use application::dto::{BookStatistics, ExecutionDto, OrderDto};
pub use application::ports::{BookEventsPort, DirectBookEvents};
pub use application::services::{BookService, ServiceError};
