//! Total resolver
//!
//! `final = subtotal - min(subtotal, subtotal x seasonal + subtotal x loyalty + volume)`

use rust_decimal::Decimal;
use shared::models::{DiscountKind, DiscountLine};
use shared::util::round_money;

use super::Discounts;

/// Result of combining a subtotal with its discounts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceBreakdown {
    pub subtotal: Decimal,
    pub seasonal_amount: Decimal,
    pub loyalty_amount: Decimal,
    pub volume_amount: Decimal,
    /// Combined discount in cents, clamped to the subtotal
    pub total_discount: Decimal,
    /// Always within `0..=subtotal`
    pub final_price: Decimal,
}

impl PriceBreakdown {
    /// Non-zero discounts as display lines, rounded to cents
    pub fn discount_lines(&self) -> Vec<DiscountLine> {
        [
            (DiscountKind::Seasonal, self.seasonal_amount),
            (DiscountKind::Loyalty, self.loyalty_amount),
            (DiscountKind::Volume, self.volume_amount),
        ]
        .into_iter()
        .filter(|(_, amount)| !amount.is_zero())
        .map(|(kind, amount)| DiscountLine {
            kind,
            amount: round_money(amount),
        })
        .collect()
    }
}

/// Combine `subtotal` and `discounts` into the final price
pub fn resolve_total(subtotal: Decimal, discounts: &Discounts) -> PriceBreakdown {
    let seasonal_amount = subtotal * discounts.seasonal_rate;
    let loyalty_amount = subtotal * discounts.loyalty_rate;
    let volume_amount = discounts.volume_amount;

    // Rounded to cents before subtracting so final + discount == subtotal
    let total_discount = round_money(seasonal_amount + loyalty_amount + volume_amount)
        .min(subtotal)
        .max(Decimal::ZERO);
    let final_price = subtotal - total_discount;

    PriceBreakdown {
        subtotal,
        seasonal_amount,
        loyalty_amount,
        volume_amount,
        total_discount,
        final_price,
    }
}
