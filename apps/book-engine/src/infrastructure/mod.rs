//! Infrastructure Layer
//!
//! Adapters for the ports and repository traits defined by the inner
//! layers:
//!
//! - **Driven Adapters (Outbound)**:
//!   - `persistence/`: In-memory repository implementations
//!
//! - **Driver Adapters (Inbound)**:
//!   - `http/`: REST API controller

pub mod http;
pub mod persistence;
