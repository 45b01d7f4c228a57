//! HTTP response DTOs.
//!
//! Successful reads and creations answer with the application DTOs
//! directly; only the envelopes that exist solely for the wire live
//! here.

use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}

/// Rejection envelope for domain and service errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable rejection reason.
    pub error: String,
}

impl ErrorResponse {
    /// Wrap a display-able rejection.
    pub fn new(error: impl std::fmt::Display) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}
