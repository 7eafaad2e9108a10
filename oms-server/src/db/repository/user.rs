//! User Repository

use super::{RepoError, RepoResult};
use shared::models::{User, UserCreate, UserUpdate};
use shared::util::now_millis;
use sqlx::{PgConnection, PgPool};

pub async fn find_all(pool: &PgPool) -> RepoResult<Vec<User>> {
    let users = sqlx::query_as::<_, User>(
        "SELECT id, name, email, created_at, updated_at, deleted_at FROM users WHERE deleted_at IS NULL ORDER BY id",
    )
    .fetch_all(pool)
    .await?;
    Ok(users)
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, name, email, created_at, updated_at, deleted_at FROM users WHERE id = $1 AND deleted_at IS NULL",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

/// Including soft-deleted rows
pub async fn find_by_id_any(pool: &PgPool, id: i64) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, name, email, created_at, updated_at, deleted_at FROM users WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn exists(conn: &mut PgConnection, id: i64) -> RepoResult<bool> {
    let found: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM users WHERE id = $1 AND deleted_at IS NULL)",
    )
    .bind(id)
    .fetch_one(conn)
    .await?;
    Ok(found)
}

pub async fn create(pool: &PgPool, data: UserCreate) -> RepoResult<User> {
    let now = now_millis();
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (name, email, created_at, updated_at)
        VALUES ($1, $2, $3, $3)
        RETURNING id, name, email, created_at, updated_at, deleted_at
        "#,
    )
    .bind(&data.name)
    .bind(&data.email)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(user)
}

pub async fn update(pool: &PgPool, id: i64, data: UserUpdate) -> RepoResult<User> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users SET
            name = COALESCE($1, name),
            email = COALESCE($2, email),
            updated_at = $3
        WHERE id = $4 AND deleted_at IS NULL
        RETURNING id, name, email, created_at, updated_at, deleted_at
        "#,
    )
    .bind(&data.name)
    .bind(&data.email)
    .bind(now_millis())
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))
}

/// Mark the user deleted; a second delete is rejected
pub async fn soft_delete(pool: &PgPool, id: i64) -> RepoResult<()> {
    let user = find_by_id_any(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))?;
    if user.deleted_at.is_some() {
        return Err(RepoError::AlreadyDeleted(format!("User {id} is already deleted")));
    }

    let now = now_millis();
    sqlx::query("UPDATE users SET deleted_at = $1, updated_at = $1 WHERE id = $2 AND deleted_at IS NULL")
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
