//! Execution DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::book::value_objects::Execution;
use crate::domain::shared::Timestamp;

/// Serializable snapshot of a trade execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionDto {
    /// Execution ID.
    pub execution_id: u64,
    /// Instrument the trade was confirmed for.
    pub instrument_id: String,
    /// Confirmed quantity.
    pub quantity: u64,
    /// Confirmed price.
    pub price: Decimal,
    /// When the execution was recorded.
    pub executed_at: Timestamp,
}

impl ExecutionDto {
    /// Create from a domain execution.
    #[must_use]
    pub fn from_execution(execution: &Execution) -> Self {
        Self {
            execution_id: execution.execution_id().value(),
            instrument_id: execution.instrument_id().to_string(),
            quantity: execution.quantity().amount(),
            price: execution.price().amount(),
            executed_at: execution.executed_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    use crate::domain::shared::{ExecutionId, InstrumentId, Price, Quantity};

    #[test]
    fn from_execution_copies_every_field() {
        let execution = Execution::new(
            ExecutionId::new(9),
            InstrumentId::new("CS"),
            Quantity::new(100),
            Price::new(dec!(14.32)),
        );

        let dto = ExecutionDto::from_execution(&execution);

        assert_eq!(dto.execution_id, 9);
        assert_eq!(dto.instrument_id, "CS");
        assert_eq!(dto.quantity, 100);
        assert_eq!(dto.price, dec!(14.32));
        assert_eq!(dto.executed_at, execution.executed_at());
    }
}
