//! Catalog Item Repository

use super::{RepoError, RepoResult};
use rust_decimal::Decimal;
use shared::models::{Item, ItemCreate, ItemUpdate};
use shared::util::{now_millis, round_money};
use sqlx::{PgConnection, PgPool};

fn validate_text(field: &str, value: &str) -> RepoResult<()> {
    if value.trim().is_empty() {
        return Err(RepoError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

fn validate_price(price: Decimal) -> RepoResult<()> {
    if price <= Decimal::ZERO {
        return Err(RepoError::InvalidPrice(price));
    }
    Ok(())
}

/// Name and description non-empty, price positive
pub fn validate_create(data: &ItemCreate) -> RepoResult<()> {
    validate_text("name", &data.name)?;
    validate_text("description", &data.description)?;
    validate_price(data.price)
}

/// Same rules as creation for every field that is present
pub fn validate_update(data: &ItemUpdate) -> RepoResult<()> {
    if let Some(name) = &data.name {
        validate_text("name", name)?;
    }
    if let Some(description) = &data.description {
        validate_text("description", description)?;
    }
    if let Some(price) = data.price {
        validate_price(price)?;
    }
    Ok(())
}

pub async fn find_all(pool: &PgPool) -> RepoResult<Vec<Item>> {
    let items = sqlx::query_as::<_, Item>(
        "SELECT id, name, description, price, created_at, updated_at, deleted_at FROM items WHERE deleted_at IS NULL ORDER BY id",
    )
    .fetch_all(pool)
    .await?;
    Ok(items)
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> RepoResult<Option<Item>> {
    let item = sqlx::query_as::<_, Item>(
        "SELECT id, name, description, price, created_at, updated_at, deleted_at FROM items WHERE id = $1 AND deleted_at IS NULL",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(item)
}

/// Current unit price of a live item
pub async fn find_price(conn: &mut PgConnection, id: i64) -> RepoResult<Option<Decimal>> {
    let price = sqlx::query_scalar::<_, Decimal>(
        "SELECT price FROM items WHERE id = $1 AND deleted_at IS NULL",
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;
    Ok(price)
}

pub async fn create(pool: &PgPool, data: ItemCreate) -> RepoResult<Item> {
    validate_create(&data)?;

    let item = sqlx::query_as::<_, Item>(
        r#"
        INSERT INTO items (name, description, price, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $4)
        RETURNING id, name, description, price, created_at, updated_at, deleted_at
        "#,
    )
    .bind(data.name.trim())
    .bind(data.description.trim())
    .bind(round_money(data.price))
    .bind(now_millis())
    .fetch_one(pool)
    .await?;
    Ok(item)
}

pub async fn update(pool: &PgPool, id: i64, data: ItemUpdate) -> RepoResult<Item> {
    validate_update(&data)?;

    sqlx::query_as::<_, Item>(
        r#"
        UPDATE items SET
            name = COALESCE($1, name),
            description = COALESCE($2, description),
            price = COALESCE($3, price),
            updated_at = $4
        WHERE id = $5 AND deleted_at IS NULL
        RETURNING id, name, description, price, created_at, updated_at, deleted_at
        "#,
    )
    .bind(data.name.as_deref().map(str::trim))
    .bind(data.description.as_deref().map(str::trim))
    .bind(data.price.map(round_money))
    .bind(now_millis())
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("Item {id} not found")))
}

/// Mark the item deleted; existing order items keep their captured price
pub async fn soft_delete(pool: &PgPool, id: i64) -> RepoResult<()> {
    let deleted_at: Option<Option<i64>> =
        sqlx::query_scalar("SELECT deleted_at FROM items WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;

    match deleted_at {
        None => Err(RepoError::NotFound(format!("Item {id} not found"))),
        Some(Some(_)) => Err(RepoError::AlreadyDeleted(format!(
            "Item {id} is already deleted"
        ))),
        Some(None) => {
            let now = now_millis();
            sqlx::query("UPDATE items SET deleted_at = $1, updated_at = $1 WHERE id = $2")
                .bind(now)
                .bind(id)
                .execute(pool)
                .await?;
            Ok(())
        }
    }
}
