//! Shared Domain Types
//!
//! Value objects shared across the book context and the application layer.

pub mod value_objects;

pub use value_objects::{ExecutionId, InstrumentId, OrderId, Price, Quantity, Timestamp};
