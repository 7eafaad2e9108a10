//! Order Pricing Engine
//!
//! Three stages run in sequence for every pricing pass:
//!
//! 1. [`materialize`] resolves requested `(item, quantity)` pairs to priced
//!    line items through an [`ItemPriceSource`].
//! 2. [`calculate_discounts`] derives the seasonal, loyalty and volume
//!    discounts, consulting an [`OrderHistory`] for the loyalty count.
//! 3. [`resolve_total`] clamps the combined discount to the subtotal and
//!    yields the final price.
//!
//! The same stages re-run when an order's items are replaced.

mod discount;
mod materializer;
mod source;
mod total;

pub use discount::*;
pub use materializer::*;
pub use source::*;
pub use total::*;

use rust_decimal::Decimal;
use thiserror::Error;

/// Pricing stage errors
#[derive(Debug, Error)]
pub enum PricingError {
    #[error("Item {0} not found")]
    ItemNotFound(i64),

    #[error("Invalid quantity {quantity} for item {item_id}")]
    InvalidQuantity { item_id: i64, quantity: i32 },

    #[error("Total quantity of item {item_id} exceeds the supported maximum")]
    QuantityOverflow { item_id: i64 },

    #[error("Order amount {0} exceeds the supported maximum")]
    AmountTooLarge(Decimal),

    #[error(transparent)]
    Lookup(#[from] LookupError),
}
