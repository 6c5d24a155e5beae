//! Rating aggregation
//!
//! Derived product statistics (average rating and rating count) are always
//! recomputed from the full set of rated purchases. A running average would
//! be cheaper, but it drifts under lost updates when raters interleave;
//! recomputation from source cannot drift.

use crate::types::{ProductId, Purchase};
use rust_decimal::{Decimal, RoundingStrategy};

/// Recompute a product's rating statistics from its purchases
///
/// Returns the mean of all submitted ratings rounded to one decimal place
/// (midpoint rounds away from zero) and the number of rated purchases.
/// A product with no rated purchases yields `(0, 0)`.
///
/// # Arguments
///
/// * `purchases` - The full current purchase set to aggregate over
/// * `product_id` - The product whose statistics are recomputed
pub fn recompute<'a, I>(purchases: I, product_id: ProductId) -> (Decimal, u32)
where
    I: IntoIterator<Item = &'a Purchase>,
{
    let mut sum: u64 = 0;
    let mut count: u32 = 0;

    for purchase in purchases {
        if purchase.product_id != product_id {
            continue;
        }
        if let Some(rating) = purchase.user_rating {
            sum += u64::from(rating);
            count += 1;
        }
    }

    if count == 0 {
        return (Decimal::ZERO, 0);
    }

    let average = (Decimal::from(sum) / Decimal::from(count))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    (average, count)
}
