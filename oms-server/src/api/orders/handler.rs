//! Order API Handlers
//!
//! Thin wrappers over [`crate::orders::OrderService`]. Seasonal pricing uses
//! the server's local calendar date.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::{Local, NaiveDate};
use shared::error::{ApiResponse, AppResult};
use shared::models::{OrderCreate, OrderCreated, OrderDetail, OrderRepriced, OrderUpdate};

use crate::core::ServerState;

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// GET /api/orders - live orders, repeated item ids folded
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<OrderDetail>>> {
    let orders = state.orders.list_orders().await?;
    Ok(Json(orders))
}

/// GET /api/orders/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderDetail>> {
    let detail = state.orders.get_order(id).await?;
    Ok(Json(detail))
}

/// POST /api/orders
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<OrderCreated>> {
    let created = state
        .orders
        .create_order(payload.user_id, &payload.items, today())
        .await?;
    Ok(Json(created))
}

/// PUT /api/orders/{id} - replace items and reprice
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderUpdate>,
) -> AppResult<Json<OrderRepriced>> {
    let outcome = state
        .orders
        .update_and_reprice(id, payload.status, &payload.items, today())
        .await?;
    Ok(Json(OrderRepriced {
        order_id: outcome.order_id,
        total_price: outcome.subtotal,
        final_price: outcome.final_price,
    }))
}

/// PUT /api/orders/{id}/confirm
pub async fn confirm(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<()>> {
    state.orders.confirm_order(id).await?;
    Ok(ApiResponse::ok())
}

/// DELETE /api/orders/{id} - cancel (soft delete)
pub async fn cancel(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<()>> {
    state.orders.cancel_order(id).await?;
    Ok(ApiResponse::ok())
}
