//! Catalog Item API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};
use shared::models::{Item, ItemCreate, ItemUpdate};

use crate::core::ServerState;
use crate::db::repository::{RepoError, item};

fn item_error(id: i64, err: RepoError) -> AppError {
    match err {
        RepoError::NotFound(_) => AppError::item_not_found(id),
        RepoError::AlreadyDeleted(msg) => AppError::with_message(ErrorCode::ItemAlreadyDeleted, msg),
        other => other.into(),
    }
}

/// GET /api/items
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Item>>> {
    let items = item::find_all(&state.db.pool).await?;
    Ok(Json(items))
}

/// GET /api/items/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Item>> {
    let i = item::find_by_id(&state.db.pool, id)
        .await?
        .ok_or_else(|| AppError::item_not_found(id))?;
    Ok(Json(i))
}

/// POST /api/items
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ItemCreate>,
) -> AppResult<Json<Item>> {
    let i = item::create(&state.db.pool, payload).await?;
    tracing::info!(item_id = i.id, price = %i.price, "Item created");
    Ok(Json(i))
}

/// PUT /api/items/{id}
///
/// Existing order items keep the price they captured.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ItemUpdate>,
) -> AppResult<Json<Item>> {
    let i = item::update(&state.db.pool, id, payload)
        .await
        .map_err(|e| item_error(id, e))?;
    Ok(Json(i))
}

/// DELETE /api/items/{id} (soft delete)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<()>> {
    item::soft_delete(&state.db.pool, id)
        .await
        .map_err(|e| item_error(id, e))?;
    tracing::info!(item_id = id, "Item deleted");
    Ok(ApiResponse::ok())
}
