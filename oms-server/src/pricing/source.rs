//! Lookup capabilities consumed by the pricing stages

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

/// A lookup collaborator failed (distinct from "not found")
#[derive(Debug, Clone, Error)]
#[error("lookup failed: {0}")]
pub struct LookupError(pub String);

/// Authoritative current unit price of catalog items
///
/// Soft-deleted items resolve to `None`.
#[async_trait]
pub trait ItemPriceSource: Send {
    async fn item_price(&mut self, item_id: i64) -> Result<Option<Decimal>, LookupError>;
}

/// Order count per user, used for the loyalty discount
#[async_trait]
pub trait OrderHistory: Send {
    /// Number of existing, non-deleted orders owned by `user_id`
    async fn count_user_orders(&mut self, user_id: i64) -> Result<i64, LookupError>;
}
