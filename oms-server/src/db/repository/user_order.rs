//! User-Order link Repository

use super::RepoResult;
use shared::models::UserOrder;
use sqlx::PgConnection;

pub async fn insert(conn: &mut PgConnection, user_id: i64, order_id: i64) -> RepoResult<UserOrder> {
    let link = sqlx::query_as::<_, UserOrder>(
        "INSERT INTO user_orders (user_id, order_id) VALUES ($1, $2) RETURNING id, user_id, order_id",
    )
    .bind(user_id)
    .bind(order_id)
    .fetch_one(conn)
    .await?;
    Ok(link)
}
