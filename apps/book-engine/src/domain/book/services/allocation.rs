//! Proportional allocation of confirmed quantity across eligible orders.

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::book::aggregate::Order;
use crate::domain::shared::{OrderId, Quantity};

/// Compute each order's fractional share of aggregate requested quantity.
///
/// `weight(o) = requested(o) / Σ requested` over the given pool. The
/// weighting basis is the requested quantity, not the remaining one, so
/// a partially filled order keeps its original share. Input ordering is
/// irrelevant; every entry divides by the same sum. Defined for a
/// non-empty pool; the empty case yields an empty map and is guarded by
/// the fill pass before any distribution arithmetic.
#[must_use]
pub fn weights(pool: &[Arc<Order>]) -> HashMap<OrderId, Decimal> {
    let total: Decimal = pool.iter().map(|order| order.quantity().as_decimal()).sum();
    pool.iter()
        .map(|order| (order.order_id(), order.quantity().as_decimal() / total))
        .collect()
}

/// Round a weighted share of a confirmed quantity to whole units.
///
/// Midpoints round away from zero: a share of 33.5 allocates 34.
#[must_use]
pub fn allocate(weight: Decimal, quantity: Quantity) -> Quantity {
    let share = weight * quantity.as_decimal();
    let rounded = share.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    Quantity::new(rounded.to_u64().unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    use crate::domain::shared::{InstrumentId, Price};

    fn pool_of(entries: &[(u64, u64)]) -> Vec<Arc<Order>> {
        entries
            .iter()
            .map(|&(id, qty)| {
                Arc::new(Order::new(
                    OrderId::new(id),
                    InstrumentId::new("CS"),
                    Quantity::new(qty),
                    Some(Price::new(dec!(14.34))),
                ))
            })
            .collect()
    }

    #[test]
    fn weights_are_proportional_to_requested_quantity() {
        let pool = pool_of(&[(1, 100), (2, 50)]);
        let w = weights(&pool);

        assert_eq!(w[&OrderId::new(1)], dec!(100) / dec!(150));
        assert_eq!(w[&OrderId::new(2)], dec!(50) / dec!(150));
    }

    #[test]
    fn weights_sum_to_one_within_epsilon() {
        let pool = pool_of(&[(1, 100), (2, 50), (3, 77), (4, 3)]);
        let sum: Decimal = weights(&pool).values().copied().sum();

        let epsilon = dec!(0.000000000000000000000001);
        assert!((Decimal::ONE - sum).abs() < epsilon, "sum was {sum}");
    }

    #[test]
    fn weights_ignore_input_ordering() {
        let forward = pool_of(&[(1, 100), (2, 50), (3, 25)]);
        let mut reversed = forward.clone();
        reversed.reverse();

        assert_eq!(weights(&forward), weights(&reversed));
    }

    #[test]
    fn weights_of_empty_pool_are_empty() {
        assert!(weights(&[]).is_empty());
    }

    #[test]
    fn allocate_scales_by_weight() {
        // The scenario split: 100:50 demand over a 100-unit execution.
        let two_thirds = dec!(100) / dec!(150);
        let one_third = dec!(50) / dec!(150);

        assert_eq!(allocate(two_thirds, Quantity::new(100)), Quantity::new(67));
        assert_eq!(allocate(one_third, Quantity::new(100)), Quantity::new(33));
    }

    #[test]
    fn allocate_rounds_midpoints_away_from_zero() {
        assert_eq!(allocate(dec!(0.5), Quantity::new(1)), Quantity::new(1));
        assert_eq!(allocate(dec!(0.335), Quantity::new(100)), Quantity::new(34));
        assert_eq!(allocate(dec!(0.334), Quantity::new(100)), Quantity::new(33));
    }

    #[test]
    fn allocate_full_weight_is_identity() {
        assert_eq!(allocate(Decimal::ONE, Quantity::new(150)), Quantity::new(150));
    }
}
