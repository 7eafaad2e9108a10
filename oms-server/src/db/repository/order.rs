//! Order Repository
//!
//! Lookup functions are generic over the executor so they serve both pool
//! reads and reads inside an order unit.

use super::RepoResult;
use crate::orders::NewOrder;
use rust_decimal::Decimal;
use shared::models::{Order, OrderStatus};
use sqlx::{PgConnection, PgExecutor};

const SELECT_LIVE: &str = "SELECT id, user_id, total_price, final_price, status, created_at, updated_at, deleted_at FROM orders WHERE id = $1 AND deleted_at IS NULL";
const SELECT_LIVE_FOR_UPDATE: &str = "SELECT id, user_id, total_price, final_price, status, created_at, updated_at, deleted_at FROM orders WHERE id = $1 AND deleted_at IS NULL FOR UPDATE";
const SELECT_ANY_FOR_UPDATE: &str = "SELECT id, user_id, total_price, final_price, status, created_at, updated_at, deleted_at FROM orders WHERE id = $1 FOR UPDATE";

pub async fn find_by_id<'e, E: PgExecutor<'e>>(executor: E, id: i64) -> RepoResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(SELECT_LIVE)
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(order)
}

/// Live order, row-locked until the surrounding transaction ends
pub async fn find_by_id_for_update(conn: &mut PgConnection, id: i64) -> RepoResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(SELECT_LIVE_FOR_UPDATE)
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(order)
}

/// Including soft-deleted rows, row-locked
pub async fn find_any_for_update(conn: &mut PgConnection, id: i64) -> RepoResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(SELECT_ANY_FOR_UPDATE)
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(order)
}

pub async fn find_all<'e, E: PgExecutor<'e>>(executor: E) -> RepoResult<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(
        "SELECT id, user_id, total_price, final_price, status, created_at, updated_at, deleted_at FROM orders WHERE deleted_at IS NULL ORDER BY id",
    )
    .fetch_all(executor)
    .await?;
    Ok(orders)
}

pub async fn find_by_user<'e, E: PgExecutor<'e>>(
    executor: E,
    user_id: i64,
) -> RepoResult<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(
        "SELECT id, user_id, total_price, final_price, status, created_at, updated_at, deleted_at FROM orders WHERE user_id = $1 AND deleted_at IS NULL ORDER BY id",
    )
    .bind(user_id)
    .fetch_all(executor)
    .await?;
    Ok(orders)
}

/// Live orders owned by `user_id`
pub async fn count_by_user(conn: &mut PgConnection, user_id: i64) -> RepoResult<i64> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE user_id = $1 AND deleted_at IS NULL")
            .bind(user_id)
            .fetch_one(conn)
            .await?;
    Ok(count)
}

pub async fn insert(conn: &mut PgConnection, order: &NewOrder) -> RepoResult<Order> {
    let created = sqlx::query_as::<_, Order>(
        r#"
        INSERT INTO orders (user_id, total_price, final_price, status, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $5)
        RETURNING id, user_id, total_price, final_price, status, created_at, updated_at, deleted_at
        "#,
    )
    .bind(order.user_id)
    .bind(order.total_price)
    .bind(order.final_price)
    .bind(order.status)
    .bind(order.now)
    .fetch_one(conn)
    .await?;
    Ok(created)
}

pub async fn update_status(
    conn: &mut PgConnection,
    id: i64,
    status: OrderStatus,
    now: i64,
) -> RepoResult<()> {
    sqlx::query("UPDATE orders SET status = $1, updated_at = $2 WHERE id = $3")
        .bind(status)
        .bind(now)
        .bind(id)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn update_prices(
    conn: &mut PgConnection,
    id: i64,
    total_price: Decimal,
    final_price: Decimal,
    now: i64,
) -> RepoResult<()> {
    sqlx::query("UPDATE orders SET total_price = $1, final_price = $2, updated_at = $3 WHERE id = $4")
        .bind(total_price)
        .bind(final_price)
        .bind(now)
        .bind(id)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn mark_cancelled(conn: &mut PgConnection, id: i64, now: i64) -> RepoResult<()> {
    sqlx::query(
        "UPDATE orders SET status = $1, deleted_at = $2, updated_at = $2 WHERE id = $3 AND deleted_at IS NULL",
    )
    .bind(OrderStatus::Cancelled)
    .bind(now)
    .bind(id)
    .execute(conn)
    .await?;
    Ok(())
}
