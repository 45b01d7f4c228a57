//! Book Domain Services
//!
//! Stateless business logic consumed by the aggregate.

pub mod allocation;
