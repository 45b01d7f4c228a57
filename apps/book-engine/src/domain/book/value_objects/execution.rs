//! Trade execution value object.

use serde::Serialize;

use crate::domain::shared::{ExecutionId, InstrumentId, Price, Quantity, Timestamp};

/// An immutable record of one confirmed trade against an instrument.
///
/// Submitted once to exactly one order book and retained by the book for
/// audit and reconciliation checks. No behavior beyond field access.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Execution {
    execution_id: ExecutionId,
    instrument_id: InstrumentId,
    quantity: Quantity,
    price: Price,
    executed_at: Timestamp,
}

impl Execution {
    /// Create a new execution, stamping its creation time.
    #[must_use]
    pub fn new(
        execution_id: ExecutionId,
        instrument_id: InstrumentId,
        quantity: Quantity,
        price: Price,
    ) -> Self {
        Self {
            execution_id,
            instrument_id,
            quantity,
            price,
            executed_at: Timestamp::now(),
        }
    }

    /// The execution's unique id.
    #[must_use]
    pub const fn execution_id(&self) -> ExecutionId {
        self.execution_id
    }

    /// The instrument this execution was confirmed for.
    #[must_use]
    pub const fn instrument_id(&self) -> &InstrumentId {
        &self.instrument_id
    }

    /// Confirmed quantity.
    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Confirmed price.
    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    /// When the execution was recorded.
    #[must_use]
    pub const fn executed_at(&self) -> Timestamp {
        self.executed_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn execution_exposes_its_fields() {
        let execution = Execution::new(
            ExecutionId::new(1),
            InstrumentId::new("CS"),
            Quantity::new(100),
            Price::new(dec!(14.32)),
        );

        assert_eq!(execution.execution_id(), ExecutionId::new(1));
        assert_eq!(execution.instrument_id().as_str(), "CS");
        assert_eq!(execution.quantity(), Quantity::new(100));
        assert_eq!(execution.price(), Price::new(dec!(14.32)));
        assert!(execution.executed_at().as_datetime().timestamp() > 0);
    }
}
