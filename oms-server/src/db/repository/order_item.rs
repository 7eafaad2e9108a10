//! Order Item Repository

use super::RepoResult;
use crate::pricing::PricedLine;
use shared::models::OrderItem;
use sqlx::{PgConnection, PgExecutor, PgPool};

/// Insert one row per line, returning them in input order
pub async fn insert_lines(
    conn: &mut PgConnection,
    order_id: i64,
    lines: &[PricedLine],
) -> RepoResult<Vec<OrderItem>> {
    let mut inserted = Vec::with_capacity(lines.len());
    for line in lines {
        let item = sqlx::query_as::<_, OrderItem>(
            r#"
            INSERT INTO order_items (order_id, item_id, quantity, price)
            VALUES ($1, $2, $3, $4)
            RETURNING id, order_id, item_id, quantity, price
            "#,
        )
        .bind(order_id)
        .bind(line.item_id)
        .bind(line.quantity)
        .bind(line.unit_price)
        .fetch_one(&mut *conn)
        .await?;
        inserted.push(item);
    }
    Ok(inserted)
}

pub async fn delete_by_order(conn: &mut PgConnection, order_id: i64) -> RepoResult<u64> {
    let result = sqlx::query("DELETE FROM order_items WHERE order_id = $1")
        .bind(order_id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}

pub async fn find_by_order<'e, E: PgExecutor<'e>>(
    executor: E,
    order_id: i64,
) -> RepoResult<Vec<OrderItem>> {
    let items = sqlx::query_as::<_, OrderItem>(
        "SELECT id, order_id, item_id, quantity, price FROM order_items WHERE order_id = $1 ORDER BY id",
    )
    .bind(order_id)
    .fetch_all(executor)
    .await?;
    Ok(items)
}

/// Items of several orders at once, ordered by id
pub async fn find_by_orders(pool: &PgPool, order_ids: &[i64]) -> RepoResult<Vec<OrderItem>> {
    if order_ids.is_empty() {
        return Ok(Vec::new());
    }
    let items = sqlx::query_as::<_, OrderItem>(
        "SELECT id, order_id, item_id, quantity, price FROM order_items WHERE order_id = ANY($1) ORDER BY id",
    )
    .bind(order_ids)
    .fetch_all(pool)
    .await?;
    Ok(items)
}
