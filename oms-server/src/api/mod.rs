//! HTTP API
//!
//! | Prefix | Module |
//! |--------|--------|
//! | /health | [`health`] |
//! | /api/users | [`users`] |
//! | /api/items | [`items`] |
//! | /api/orders | [`orders`] |
//!
//! Handlers return [`AppResult`]; failures render as [`shared::error::ApiResponse`]
//! with the status mapped from the error code.

pub mod health;
pub mod items;
pub mod orders;
pub mod users;

use axum::Router;
use http::{HeaderName, HeaderValue};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

pub use shared::error::{AppError, AppResult};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Every route, no middleware and no state
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(users::router())
        .merge(items::router())
        .merge(orders::router())
}

/// Routes plus the middleware stack, used by the server and by tests
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    build_router()
        // CORS
        .layer(CorsLayer::permissive())
        // Abort handlers that outlive the configured timeout
        .layer(TimeoutLayer::new(state.config.request_timeout()))
        // Request tracing (INFO)
        .layer(TraceLayer::new_for_http())
        // Request ID, generated before tracing sees the request
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
}
