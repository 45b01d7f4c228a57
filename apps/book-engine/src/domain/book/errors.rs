//! Order book errors.

use std::fmt;

use crate::domain::shared::{InstrumentId, OrderId, Price, Quantity};

/// Errors raised by the order book aggregate.
///
/// Every rejection is distinguishable by kind so the service boundary can
/// map it to a domain-appropriate response. A rejected order or execution
/// leaves the book unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    /// An order was submitted while the book was closed.
    BookClosed {
        /// Instrument the book is scoped to.
        instrument_id: InstrumentId,
    },

    /// An execution was submitted while the book was open.
    BookOpen {
        /// Instrument the book is scoped to.
        instrument_id: InstrumentId,
    },

    /// The entity's instrument disagrees with the book's.
    InstrumentMismatch {
        /// Instrument the book is scoped to.
        expected: InstrumentId,
        /// Instrument carried by the rejected entity.
        actual: InstrumentId,
    },

    /// An execution's price fell outside tolerance of the reference price.
    PriceOutOfTolerance {
        /// The book's established reference price.
        reference: Price,
        /// The rejected execution's price.
        offered: Price,
    },

    /// An execution was submitted to a fully reconciled book.
    AlreadyReconciled {
        /// Instrument the book is scoped to.
        instrument_id: InstrumentId,
    },

    /// A cumulative fill above the requested quantity was attempted.
    ///
    /// Unreachable through the public fill path; reachable only by direct
    /// misuse of the order mutator and treated as a fatal programming error.
    Overfill {
        /// Order whose capacity would be exceeded.
        order_id: OrderId,
        /// Requested quantity of the order.
        requested: Quantity,
        /// The rejected cumulative fill.
        attempted: Quantity,
    },
}

impl fmt::Display for BookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BookClosed { instrument_id } => {
                write!(f, "Order book for {instrument_id} is closed to orders")
            }
            Self::BookOpen { instrument_id } => {
                write!(f, "Order book for {instrument_id} is open to orders, not executions")
            }
            Self::InstrumentMismatch { expected, actual } => {
                write!(f, "Instrument mismatch: book is for {expected}, got {actual}")
            }
            Self::PriceOutOfTolerance { reference, offered } => {
                write!(
                    f,
                    "Execution price {offered} is outside tolerance of reference price {reference}"
                )
            }
            Self::AlreadyReconciled { instrument_id } => {
                write!(f, "Order book for {instrument_id} is already fully reconciled")
            }
            Self::Overfill {
                order_id,
                requested,
                attempted,
            } => {
                write!(
                    f,
                    "Overfill on order {order_id}: cumulative fill {attempted} exceeds requested {requested}"
                )
            }
        }
    }
}

impl std::error::Error for BookError {}
