//! AppError and the JSON envelope every endpoint answers with

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Error returned by every HTTP handler
///
/// `details` carries the ids involved (`order_id`, `item_id`, ...) so a
/// client can react without parsing the message.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Error with the code's default message
    pub fn new(code: ErrorCode) -> Self {
        Self::with_message(code, code.message())
    }

    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    pub fn user_not_found(id: i64) -> Self {
        Self::with_message(ErrorCode::UserNotFound, format!("User {id} not found"))
            .with_detail("user_id", id)
    }

    pub fn item_not_found(id: i64) -> Self {
        Self::with_message(ErrorCode::ItemNotFound, format!("Item {id} not found"))
            .with_detail("item_id", id)
    }
}

/// Response envelope
///
/// Success: `{"code":0,"message":"OK","data":...}`. Failure: `data` is
/// absent and `details` may be present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: ErrorCode::Success.code(),
            message: "OK".to_string(),
            data: Some(data),
            details: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == ErrorCode::Success.code()
    }
}

impl ApiResponse<()> {
    /// Success without payload (deletes, status transitions)
    pub fn ok() -> Self {
        Self {
            code: ErrorCode::Success.code(),
            message: "OK".to_string(),
            data: None,
            details: None,
        }
    }

    pub fn error(err: &AppError) -> Self {
        Self {
            code: err.code.code(),
            message: err.message.clone(),
            data: None,
            details: err.details.clone(),
        }
    }
}

/// Result type of every handler
pub type AppResult<T> = Result<T, AppError>;

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.http_status();

        if self.code.category() == ErrorCategory::System {
            tracing::error!(code = %self.code, message = %self.message, "System error");
        } else {
            tracing::debug!(code = %self.code, message = %self.message, "Request rejected");
        }

        (status, axum::Json(ApiResponse::error(&self))).into_response()
    }
}

impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        let status = ErrorCode::try_from(self.code)
            .map(|c| c.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, axum::Json(self)).into_response()
    }
}
