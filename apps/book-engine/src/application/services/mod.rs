//! Application Services
//!
//! Services orchestrate domain aggregates and repositories to fulfill
//! application requirements.

mod book_service;

pub use book_service::{BookService, ServiceError};
