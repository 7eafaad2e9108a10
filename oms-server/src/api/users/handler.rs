//! User API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};
use shared::models::{User, UserCreate, UserUpdate, UserWithOrders};

use crate::core::ServerState;
use crate::db::order_store::attach_items;
use crate::db::repository::{RepoError, order, order_item, user};

fn user_error(id: i64, err: RepoError) -> AppError {
    match err {
        RepoError::NotFound(_) => AppError::user_not_found(id),
        RepoError::AlreadyDeleted(msg) => AppError::with_message(ErrorCode::UserAlreadyDeleted, msg),
        other => other.into(),
    }
}

/// GET /api/users
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<User>>> {
    let users = user::find_all(&state.db.pool).await?;
    Ok(Json(users))
}

/// GET /api/users/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<User>> {
    let u = user::find_by_id(&state.db.pool, id)
        .await?
        .ok_or_else(|| AppError::user_not_found(id))?;
    Ok(Json(u))
}

/// GET /api/users/{id}/orders - user with every live order and its items
pub async fn get_with_orders(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<UserWithOrders>> {
    let pool = &state.db.pool;
    let u = user::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::user_not_found(id))?;

    let orders = order::find_by_user(pool, id).await?;
    let ids: Vec<i64> = orders.iter().map(|o| o.id).collect();
    let items = order_item::find_by_orders(pool, &ids).await?;

    Ok(Json(UserWithOrders {
        user: u,
        orders: attach_items(orders, items),
    }))
}

/// POST /api/users
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<Json<User>> {
    let u = user::create(&state.db.pool, payload).await?;
    tracing::info!(user_id = u.id, "User created");
    Ok(Json(u))
}

/// PUT /api/users/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Json<User>> {
    let u = user::update(&state.db.pool, id, payload)
        .await
        .map_err(|e| user_error(id, e))?;
    Ok(Json(u))
}

/// DELETE /api/users/{id} (soft delete)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<()>> {
    user::soft_delete(&state.db.pool, id)
        .await
        .map_err(|e| user_error(id, e))?;
    tracing::info!(user_id = id, "User deleted");
    Ok(ApiResponse::ok())
}
