//! Order Model
//!
//! Orders, their captured line items, the denormalized user-order link and
//! the request/response payloads of the order endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order lifecycle status
///
/// `Pending -> Confirm` through confirmation; cancellation moves any live
/// order to `Cancelled` and soft-deletes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(type_name = "order_status"))]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirm,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirm => "Confirm",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order entity (header row)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    /// Subtotal: sum of price x quantity over the current line items
    pub total_price: Decimal,
    /// Subtotal minus the clamped discount total
    pub final_price: Decimal,
    pub status: OrderStatus,
    pub created_at: i64,
    pub updated_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<i64>,
}

impl Order {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Order line item with the unit price captured at order time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub item_id: i64,
    pub quantity: i32,
    pub price: Decimal,
}

/// Denormalized user-order link row, one per order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct UserOrder {
    pub id: i64,
    pub user_id: i64,
    pub order_id: i64,
}

/// Requested (item, quantity) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub item_id: i64,
    pub quantity: i32,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub user_id: i64,
    pub items: Vec<OrderLine>,
}

/// Update order payload: optional new status plus the replacement item set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderUpdate {
    #[serde(default)]
    pub status: Option<OrderStatus>,
    pub items: Vec<OrderLine>,
}

/// Order with its line items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Discount kinds applied by the pricing pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountKind {
    Seasonal,
    Loyalty,
    Volume,
}

/// One applied discount with its absolute amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountLine {
    pub kind: DiscountKind,
    pub amount: Decimal,
}

/// Response of order creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreated {
    #[serde(flatten)]
    pub detail: OrderDetail,
    pub discounts: Vec<DiscountLine>,
}

/// Response of update-and-reprice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRepriced {
    pub order_id: i64,
    pub total_price: Decimal,
    pub final_price: Decimal,
}
