//! Repository Module
//!
//! Free async functions per table. Reads outside a transaction take the
//! pool, everything that has to join a unit of work takes
//! `&mut PgConnection`. Soft-deleted rows are filtered unless a function
//! says otherwise.

pub mod item;
pub mod order;
pub mod order_item;
pub mod user;
pub mod user_order;

use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

use crate::orders::StoreError;
use crate::pricing::LookupError;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already deleted: {0}")]
    AlreadyDeleted(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Item price must be positive, got {0}")]
    InvalidPrice(Decimal),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Duplicate(db.message().to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::AlreadyDeleted(msg) => AppError::with_message(ErrorCode::AlreadyDeleted, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::InvalidPrice(price) => {
                AppError::with_message(
                    ErrorCode::ItemInvalidPrice,
                    format!("Item price must be positive, got {price}"),
                )
                    .with_detail("price", price.to_string())
            }
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(err: RepoError) -> Self {
        StoreError::Backend(err.to_string())
    }
}

impl From<RepoError> for LookupError {
    fn from(err: RepoError) -> Self {
        LookupError(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
