//! Application Layer
//!
//! The application layer orchestrates domain logic. It defines:
//!
//! - **Services**: Application-specific orchestration over the aggregates
//! - **Ports**: Interfaces for interacting with the application
//! - **DTOs**: Data transfer objects for API boundaries

pub mod dto;
pub mod ports;
pub mod services;

pub use dto::*;
pub use ports::*;
pub use services::*;
