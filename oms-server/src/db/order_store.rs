//! PostgreSQL-backed order store
//!
//! Every [`PgOrderUnit`] wraps one `sqlx` transaction. Dropping the unit
//! without committing rolls the transaction back.

use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::models::{Order, OrderDetail, OrderItem, OrderStatus, UserOrder};
use sqlx::{PgPool, Postgres, Transaction};
use std::collections::HashMap;

use super::repository::{RepoError, item, order, order_item, user, user_order};
use crate::orders::{NewOrder, OrderStore, OrderUnit, StoreError};
use crate::pricing::{ItemPriceSource, LookupError, OrderHistory, PricedLine};

#[derive(Clone)]
pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub struct PgOrderUnit {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl OrderStore for PgOrderStore {
    type Unit = PgOrderUnit;

    async fn begin(&self) -> Result<PgOrderUnit, StoreError> {
        let tx = self.pool.begin().await.map_err(RepoError::from)?;
        Ok(PgOrderUnit { tx })
    }

    async fn load_order(&self, order_id: i64) -> Result<Option<OrderDetail>, StoreError> {
        let Some(found) = order::find_by_id(&self.pool, order_id).await? else {
            return Ok(None);
        };
        let items = order_item::find_by_order(&self.pool, order_id).await?;
        Ok(Some(OrderDetail {
            order: found,
            items,
        }))
    }

    async fn load_orders(&self) -> Result<Vec<OrderDetail>, StoreError> {
        let orders = order::find_all(&self.pool).await?;
        let ids: Vec<i64> = orders.iter().map(|o| o.id).collect();
        let items = order_item::find_by_orders(&self.pool, &ids).await?;
        Ok(attach_items(orders, items))
    }
}

/// Pair each order with its items, keeping both orders and item order
pub fn attach_items(orders: Vec<Order>, items: Vec<OrderItem>) -> Vec<OrderDetail> {
    let mut by_order: HashMap<i64, Vec<OrderItem>> = HashMap::new();
    for item in items {
        by_order.entry(item.order_id).or_default().push(item);
    }

    orders
        .into_iter()
        .map(|order| {
            let items = by_order.remove(&order.id).unwrap_or_default();
            OrderDetail { order, items }
        })
        .collect()
}

#[async_trait]
impl ItemPriceSource for PgOrderUnit {
    async fn item_price(&mut self, item_id: i64) -> Result<Option<Decimal>, LookupError> {
        Ok(item::find_price(&mut self.tx, item_id).await?)
    }
}

#[async_trait]
impl OrderHistory for PgOrderUnit {
    async fn count_user_orders(&mut self, user_id: i64) -> Result<i64, LookupError> {
        Ok(order::count_by_user(&mut self.tx, user_id).await?)
    }
}

#[async_trait]
impl OrderUnit for PgOrderUnit {
    async fn user_exists(&mut self, user_id: i64) -> Result<bool, StoreError> {
        Ok(user::exists(&mut self.tx, user_id).await?)
    }

    async fn find_order(&mut self, order_id: i64) -> Result<Option<Order>, StoreError> {
        Ok(order::find_by_id_for_update(&mut self.tx, order_id).await?)
    }

    async fn find_order_any(&mut self, order_id: i64) -> Result<Option<Order>, StoreError> {
        Ok(order::find_any_for_update(&mut self.tx, order_id).await?)
    }

    async fn insert_order(&mut self, new: NewOrder) -> Result<Order, StoreError> {
        Ok(order::insert(&mut self.tx, &new).await?)
    }

    async fn insert_order_items(
        &mut self,
        order_id: i64,
        lines: &[PricedLine],
    ) -> Result<Vec<OrderItem>, StoreError> {
        Ok(order_item::insert_lines(&mut self.tx, order_id, lines).await?)
    }

    async fn insert_user_order(
        &mut self,
        user_id: i64,
        order_id: i64,
    ) -> Result<UserOrder, StoreError> {
        Ok(user_order::insert(&mut self.tx, user_id, order_id).await?)
    }

    async fn replace_order_items(
        &mut self,
        order_id: i64,
        lines: &[PricedLine],
    ) -> Result<Vec<OrderItem>, StoreError> {
        let removed = order_item::delete_by_order(&mut self.tx, order_id).await?;
        tracing::debug!(order_id, removed, "Cleared order items");
        Ok(order_item::insert_lines(&mut self.tx, order_id, lines).await?)
    }

    async fn update_status(
        &mut self,
        order_id: i64,
        status: OrderStatus,
        now: i64,
    ) -> Result<(), StoreError> {
        Ok(order::update_status(&mut self.tx, order_id, status, now).await?)
    }

    async fn update_prices(
        &mut self,
        order_id: i64,
        total_price: Decimal,
        final_price: Decimal,
        now: i64,
    ) -> Result<(), StoreError> {
        Ok(order::update_prices(&mut self.tx, order_id, total_price, final_price, now).await?)
    }

    async fn mark_cancelled(&mut self, order_id: i64, now: i64) -> Result<(), StoreError> {
        Ok(order::mark_cancelled(&mut self.tx, order_id, now).await?)
    }

    async fn commit(self) -> Result<(), StoreError> {
        self.tx
            .commit()
            .await
            .map_err(|e| StoreError::Commit(e.to_string()))
    }
}
