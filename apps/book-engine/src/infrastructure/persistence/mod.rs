//! Persistence Adapters
//!
//! In-memory implementations of the domain repository traits.

pub mod in_memory;

pub use in_memory::{InMemoryBookRepository, InMemoryExecutionRepository, InMemoryOrderRepository};
