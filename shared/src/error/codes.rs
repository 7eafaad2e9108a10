//! Numeric error codes shared by the server and its clients
//!
//! | Range | Domain |
//! |-------|--------|
//! | 0xxx | general |
//! | 1xxx | users |
//! | 4xxx | orders |
//! | 6xxx | catalog items |
//! | 9xxx | system |

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    Success = 0,
    ValidationFailed = 2,
    NotFound = 3,
    AlreadyExists = 4,
    AlreadyDeleted = 6,

    UserNotFound = 1001,
    UserAlreadyDeleted = 1002,

    OrderNotFound = 4001,
    /// Cancelling an order that is already soft-deleted
    OrderAlreadyDeleted = 4002,
    /// Confirm on a non-`Pending` order
    OrderInvalidTransition = 4003,
    OrderInvalidQuantity = 4004,
    /// Unknown item in an order update
    OrderInvalidItem = 4005,
    /// Subtotal beyond what an order row can store
    OrderAmountTooLarge = 4006,

    ItemNotFound = 6001,
    ItemInvalidPrice = 6002,
    ItemAlreadyDeleted = 6003,

    DatabaseError = 9002,
    /// Commit of a unit of work failed, nothing was written
    TransactionFailed = 9003,
    /// Price or order-count lookup failed (not a miss)
    LookupFailed = 9004,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 19] = [
        ErrorCode::Success,
        ErrorCode::ValidationFailed,
        ErrorCode::NotFound,
        ErrorCode::AlreadyExists,
        ErrorCode::AlreadyDeleted,
        ErrorCode::UserNotFound,
        ErrorCode::UserAlreadyDeleted,
        ErrorCode::OrderNotFound,
        ErrorCode::OrderAlreadyDeleted,
        ErrorCode::OrderInvalidTransition,
        ErrorCode::OrderInvalidQuantity,
        ErrorCode::OrderInvalidItem,
        ErrorCode::OrderAmountTooLarge,
        ErrorCode::ItemNotFound,
        ErrorCode::ItemInvalidPrice,
        ErrorCode::ItemAlreadyDeleted,
        ErrorCode::DatabaseError,
        ErrorCode::TransactionFailed,
        ErrorCode::LookupFailed,
    ];

    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Default English message, used when no specific one is given
    pub const fn message(&self) -> &'static str {
        use ErrorCode::*;
        match self {
            Success => "OK",
            ValidationFailed => "Validation failed",
            NotFound => "Resource not found",
            AlreadyExists => "Resource already exists",
            AlreadyDeleted => "Resource already deleted",
            UserNotFound => "User not found",
            UserAlreadyDeleted => "User is already deleted",
            OrderNotFound => "Order not found",
            OrderAlreadyDeleted => "Order already deleted",
            OrderInvalidTransition => "Order status is not 'Pending'",
            OrderInvalidQuantity => "Order item quantity must be positive",
            OrderInvalidItem => "Invalid item ID",
            OrderAmountTooLarge => "Order amount exceeds the supported maximum",
            ItemNotFound => "Item not found",
            ItemInvalidPrice => "Item price must be positive",
            ItemAlreadyDeleted => "Item is already deleted",
            DatabaseError => "Database error",
            TransactionFailed => "Transaction failed",
            LookupFailed => "Lookup failed",
        }
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// A `u16` that names no [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|code| code.code() == value)
            .ok_or(InvalidErrorCode(value))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
