//! Error codes and the response envelope of the HTTP API
//!
//! Handlers return [`AppResult`]. An [`AppError`] renders as
//! [`ApiResponse`] with the status picked by [`ErrorCode::http_status`]:
//!
//! ```
//! use shared::error::{ApiResponse, AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::OrderInvalidItem).with_detail("item_id", 42);
//! let body = ApiResponse::error(&err);
//! assert_eq!(body.code, 4005);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
