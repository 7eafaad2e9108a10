//! Line-item materializer
//!
//! Resolves requested lines to the catalog's current unit price. The price
//! captured here is what gets written to the order item and never changes
//! afterwards.

use rust_decimal::Decimal;
use shared::models::OrderLine;
use std::collections::HashMap;

use super::{ItemPriceSource, PricingError};

/// Largest amount an order column holds: NUMERIC(12,2)
pub const MAX_ORDER_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_0FFF, 0xE8, 0, false, 2);

/// A requested line resolved to its unit price
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedLine {
    pub item_id: i64,
    pub quantity: i32,
    pub unit_price: Decimal,
}

impl PricedLine {
    /// unit_price x quantity
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Output of the materializer stage
#[derive(Debug, Clone, PartialEq)]
pub struct MaterializedLines {
    pub lines: Vec<PricedLine>,
    pub subtotal: Decimal,
}

/// Sum of `line_total` over `lines`
pub fn subtotal_of(lines: &[PricedLine]) -> Decimal {
    lines.iter().map(PricedLine::line_total).sum()
}

/// Resolve every requested line through `source`
///
/// Fails on the first non-positive quantity or unknown item; nothing is
/// partially returned. The summed quantity of one item id must fit an
/// `i32` and the subtotal must fit [`MAX_ORDER_AMOUNT`].
pub async fn materialize<S>(
    source: &mut S,
    requested: &[OrderLine],
) -> Result<MaterializedLines, PricingError>
where
    S: ItemPriceSource + ?Sized,
{
    let mut lines = Vec::with_capacity(requested.len());
    let mut per_item: HashMap<i64, i32> = HashMap::with_capacity(requested.len());

    for line in requested {
        if line.quantity <= 0 {
            return Err(PricingError::InvalidQuantity {
                item_id: line.item_id,
                quantity: line.quantity,
            });
        }

        let total = per_item.entry(line.item_id).or_insert(0);
        *total = total
            .checked_add(line.quantity)
            .ok_or(PricingError::QuantityOverflow {
                item_id: line.item_id,
            })?;

        let unit_price = source
            .item_price(line.item_id)
            .await?
            .ok_or(PricingError::ItemNotFound(line.item_id))?;
        tracing::debug!(item_id = line.item_id, %unit_price, "Resolved item price");

        lines.push(PricedLine {
            item_id: line.item_id,
            quantity: line.quantity,
            unit_price,
        });
    }

    let subtotal = subtotal_of(&lines);
    if subtotal > MAX_ORDER_AMOUNT {
        return Err(PricingError::AmountTooLarge(subtotal));
    }
    Ok(MaterializedLines { lines, subtotal })
}
