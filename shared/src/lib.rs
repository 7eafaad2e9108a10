//! Shared types for the order management backend
//!
//! Domain models, the unified error system and small utilities used by
//! `oms-server` and by any client that talks to its HTTP API.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
