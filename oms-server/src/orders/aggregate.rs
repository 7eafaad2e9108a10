//! Line item aggregation for order listings

use shared::models::OrderItem;
use std::collections::HashMap;

use super::error::{OrderError, OrderResult};

/// Fold items sharing an item id into one line
///
/// Quantities and prices are summed into the first occurrence, which keeps
/// its id and position. A summed quantity past `i32::MAX` is an error.
pub fn aggregate_items(items: Vec<OrderItem>) -> OrderResult<Vec<OrderItem>> {
    let mut index: HashMap<i64, usize> = HashMap::with_capacity(items.len());
    let mut folded: Vec<OrderItem> = Vec::with_capacity(items.len());

    for item in items {
        match index.get(&item.item_id) {
            Some(&pos) => {
                let line = &mut folded[pos];
                line.quantity = line.quantity.checked_add(item.quantity).ok_or(
                    OrderError::QuantityOverflow {
                        item_id: item.item_id,
                    },
                )?;
                line.price += item.price;
            }
            None => {
                index.insert(item.item_id, folded.len());
                folded.push(item);
            }
        }
    }

    Ok(folded)
}
