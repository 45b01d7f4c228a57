//! Data Transfer Objects (DTOs)
//!
//! Serializable snapshots of domain state for API boundaries. Domain
//! entities with interior mutability never cross the HTTP layer directly;
//! they are projected into these structs first.

mod execution_dto;
mod order_dto;
mod statistics;

pub use execution_dto::ExecutionDto;
pub use order_dto::OrderDto;
pub use statistics::{BookStatistics, LimitLevel, OrderBreakdown};
