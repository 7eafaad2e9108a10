//! Catalog Item Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Catalog item entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Current unit price, always positive
    pub price: Decimal,
    pub created_at: i64,
    pub updated_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<i64>,
}

/// Create item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCreate {
    pub name: String,
    pub description: String,
    pub price: Decimal,
}

/// Update item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
}
