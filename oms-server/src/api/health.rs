//! Health check endpoint

use axum::{Json, Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health_check))
}

pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "oms-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
