//! Order book lifecycle state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of an order book.
///
/// A book starts `Closed`, accepts orders only while `Open`, and accepts
/// executions only while `Closed`. It can cycle between the two states
/// indefinitely; there is no terminal state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookState {
    /// Accepting orders.
    Open,
    /// Accepting executions. The initial state.
    #[default]
    Closed,
}

impl BookState {
    /// Returns true if the book is open for order intake.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    /// Returns true if the book is closed for execution intake.
    #[must_use]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl fmt::Display for BookState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "OPEN"),
            Self::Closed => write!(f, "CLOSED"),
        }
    }
}
