//! HTTP status for each error code

use super::codes::ErrorCode;
use super::category::ErrorCategory;
use http::StatusCode;

impl ErrorCode {
    /// Missing resources are 404, duplicates 409, system failures 500.
    /// Everything else the client caused is 400.
    pub fn http_status(&self) -> StatusCode {
        use ErrorCode::*;
        match self {
            Success => StatusCode::OK,
            NotFound | UserNotFound | OrderNotFound | ItemNotFound => StatusCode::NOT_FOUND,
            AlreadyExists => StatusCode::CONFLICT,
            _ if self.category() == ErrorCategory::System => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
