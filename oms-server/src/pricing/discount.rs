//! Discount calculator
//!
//! Three independent discounts, recomputed on every pricing pass and never
//! stored:
//! - Seasonal: 15% of the subtotal from December 3 to December 31
//! - Loyalty: 5% of the subtotal once the user has 5 or more orders
//! - Volume: 10% of the line total for every line of 10 or more units

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use super::{OrderHistory, PricedLine, PricingError};

/// Seasonal discount rate (15%)
pub const SEASONAL_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 2);
/// Loyalty discount rate (5%)
pub const LOYALTY_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);
/// Volume discount rate applied to qualifying line totals (10%)
pub const VOLUME_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);
/// Minimum line quantity for the volume discount
pub const VOLUME_MIN_QUANTITY: i32 = 10;
/// Minimum number of existing orders for the loyalty discount
pub const LOYALTY_MIN_ORDERS: i64 = 5;

const SEASON_MONTH: u32 = 12;
const SEASON_FIRST_DAY: u32 = 3;

/// Discounts computed for one pricing pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Discounts {
    /// Fraction of the subtotal
    pub seasonal_rate: Decimal,
    /// Fraction of the subtotal
    pub loyalty_rate: Decimal,
    /// Absolute amount
    pub volume_amount: Decimal,
}

impl Discounts {
    /// Compute all three discounts from already-known inputs
    pub fn compute(prior_orders: i64, lines: &[PricedLine], as_of: NaiveDate) -> Self {
        Self {
            seasonal_rate: seasonal_rate(as_of),
            loyalty_rate: loyalty_rate(prior_orders),
            volume_amount: volume_amount(lines),
        }
    }
}

/// 0.15 when `as_of` falls on December 3..=31, else 0
pub fn seasonal_rate(as_of: NaiveDate) -> Decimal {
    if as_of.month() == SEASON_MONTH && as_of.day() >= SEASON_FIRST_DAY {
        SEASONAL_RATE
    } else {
        Decimal::ZERO
    }
}

/// 0.05 when the user already has at least 5 orders, else 0
pub fn loyalty_rate(prior_orders: i64) -> Decimal {
    if prior_orders >= LOYALTY_MIN_ORDERS {
        LOYALTY_RATE
    } else {
        Decimal::ZERO
    }
}

/// Σ 0.10 x line_total over lines with quantity >= 10
pub fn volume_amount(lines: &[PricedLine]) -> Decimal {
    lines
        .iter()
        .filter(|line| line.quantity >= VOLUME_MIN_QUANTITY)
        .map(|line| VOLUME_RATE * line.line_total())
        .sum()
}

/// Compute discounts for a new order owned by `user_id`
///
/// The order count is read before the order is inserted, so it only covers
/// the user's earlier orders.
pub async fn calculate_discounts<H>(
    history: &mut H,
    user_id: i64,
    lines: &[PricedLine],
    as_of: NaiveDate,
) -> Result<Discounts, PricingError>
where
    H: OrderHistory + ?Sized,
{
    let prior_orders = history.count_user_orders(user_id).await?;
    tracing::debug!(user_id, prior_orders, "Loaded order history");
    Ok(Discounts::compute(prior_orders, lines, as_of))
}
