//! Book Value Objects
//!
//! Immutable types scoped to the order book context.

mod book_state;
mod execution;
mod order_type;

pub use book_state::BookState;
pub use execution::Execution;
pub use order_type::OrderType;
