//! Order Book Bounded Context
//!
//! Aggregates resting buy interest per instrument and reconciles it
//! against confirmed trade executions.
//!
//! # Key Concepts
//!
//! - **OrderBook Aggregate**: lifecycle gate plus the proportional-fill
//!   reconciliation pass
//! - **Invalidation**: limit orders priced below an execution are
//!   permanently excluded from fills
//! - **Reference Price**: the first execution pins the price all later
//!   ones must stay within tolerance of

pub mod aggregate;
pub mod errors;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use aggregate::{Order, OrderBook, PRICE_TOLERANCE};
pub use errors::BookError;
pub use repository::{BookRepository, ExecutionRepository, OrderRepository, StoreError};
pub use value_objects::{BookState, Execution, OrderType};
