//! Application Ports (Driven)
//!
//! Ports define interfaces for pushing work out of the HTTP layer.

mod book_events;

pub use book_events::{BookEventsPort, DirectBookEvents, NoOpBookEvents};
