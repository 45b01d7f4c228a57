//! Order Book Aggregate
//!
//! The OrderBook aggregate root owns the orders and executions for one
//! instrument and enforces every reconciliation invariant.

mod order;
mod order_book;

pub use order::Order;
pub use order_book::{OrderBook, PRICE_TOLERANCE};
