//! Storage seam of the order service
//!
//! [`OrderStore`] hands out [`OrderUnit`]s. A unit is one atomic piece of
//! work: everything written through it becomes visible only after
//! [`OrderUnit::commit`], and dropping it discards the writes. Units also
//! answer the pricing lookups so that prices and order counts are read
//! inside the same transaction that writes the order.

use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::models::{Order, OrderDetail, OrderItem, OrderStatus, UserOrder};
use thiserror::Error;

use crate::pricing::{ItemPriceSource, OrderHistory, PricedLine};

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("{0}")]
    Backend(String),

    #[error("commit failed: {0}")]
    Commit(String),
}

/// Header row of an order about to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub user_id: i64,
    pub total_price: Decimal,
    pub final_price: Decimal,
    pub status: OrderStatus,
    pub now: i64,
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    type Unit: OrderUnit;

    /// Start a new unit of work
    async fn begin(&self) -> Result<Self::Unit, StoreError>;

    /// Non-deleted order with its items
    async fn load_order(&self, order_id: i64) -> Result<Option<OrderDetail>, StoreError>;

    /// Every non-deleted order with its items, ordered by id
    async fn load_orders(&self) -> Result<Vec<OrderDetail>, StoreError>;
}

#[async_trait]
pub trait OrderUnit: ItemPriceSource + OrderHistory + Send {
    async fn user_exists(&mut self, user_id: i64) -> Result<bool, StoreError>;

    /// Non-deleted order, locked for the rest of the unit
    async fn find_order(&mut self, order_id: i64) -> Result<Option<Order>, StoreError>;

    /// Order regardless of its soft-delete marker
    async fn find_order_any(&mut self, order_id: i64) -> Result<Option<Order>, StoreError>;

    async fn insert_order(&mut self, order: NewOrder) -> Result<Order, StoreError>;

    async fn insert_order_items(
        &mut self,
        order_id: i64,
        lines: &[PricedLine],
    ) -> Result<Vec<OrderItem>, StoreError>;

    async fn insert_user_order(
        &mut self,
        user_id: i64,
        order_id: i64,
    ) -> Result<UserOrder, StoreError>;

    /// Delete every item of the order, then insert `lines`
    async fn replace_order_items(
        &mut self,
        order_id: i64,
        lines: &[PricedLine],
    ) -> Result<Vec<OrderItem>, StoreError>;

    async fn update_status(
        &mut self,
        order_id: i64,
        status: OrderStatus,
        now: i64,
    ) -> Result<(), StoreError>;

    async fn update_prices(
        &mut self,
        order_id: i64,
        total_price: Decimal,
        final_price: Decimal,
        now: i64,
    ) -> Result<(), StoreError>;

    /// Set status `Cancelled` and the soft-delete marker
    async fn mark_cancelled(&mut self, order_id: i64, now: i64) -> Result<(), StoreError>;

    async fn commit(self) -> Result<(), StoreError>;
}
