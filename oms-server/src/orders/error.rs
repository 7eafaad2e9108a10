//! Order errors and their mapping onto the API error codes

use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::models::OrderStatus;
use thiserror::Error;

use super::store::StoreError;
use crate::pricing::PricingError;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order {0} not found")]
    OrderNotFound(i64),

    #[error("User {0} not found")]
    UserNotFound(i64),

    #[error("Item {0} not found")]
    ItemNotFound(i64),

    #[error("Invalid item ID: {0}")]
    InvalidItem(i64),

    #[error("Invalid quantity {quantity} for item {item_id}")]
    InvalidQuantity { item_id: i64, quantity: i32 },

    #[error("Total quantity of item {item_id} exceeds the supported maximum")]
    QuantityOverflow { item_id: i64 },

    #[error("Order amount {0} exceeds the supported maximum")]
    AmountTooLarge(Decimal),

    #[error("Order status is not 'Pending' (current status: {current})")]
    InvalidTransition { current: OrderStatus },

    #[error("Order {0} already deleted")]
    AlreadyDeleted(i64),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Lookup failed: {0}")]
    Lookup(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type OrderResult<T> = Result<T, OrderError>;

impl OrderError {
    /// Update path: an unknown item in the replacement set is a bad request,
    /// not a missing resource
    pub(super) fn item_as_invalid(self) -> Self {
        match self {
            OrderError::ItemNotFound(id) => OrderError::InvalidItem(id),
            other => other,
        }
    }
}

impl From<PricingError> for OrderError {
    fn from(err: PricingError) -> Self {
        match err {
            PricingError::ItemNotFound(id) => OrderError::ItemNotFound(id),
            PricingError::InvalidQuantity { item_id, quantity } => {
                OrderError::InvalidQuantity { item_id, quantity }
            }
            PricingError::QuantityOverflow { item_id } => OrderError::QuantityOverflow { item_id },
            PricingError::AmountTooLarge(amount) => OrderError::AmountTooLarge(amount),
            PricingError::Lookup(e) => OrderError::Lookup(e.0),
        }
    }
}

impl From<StoreError> for OrderError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Commit(msg) => OrderError::TransactionFailed(msg),
            StoreError::Backend(msg) => OrderError::Storage(msg),
        }
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        let message = err.to_string();
        match err {
            OrderError::OrderNotFound(id) => {
                AppError::with_message(ErrorCode::OrderNotFound, message).with_detail("order_id", id)
            }
            OrderError::UserNotFound(id) => {
                AppError::with_message(ErrorCode::UserNotFound, message).with_detail("user_id", id)
            }
            OrderError::ItemNotFound(id) => {
                AppError::with_message(ErrorCode::ItemNotFound, message).with_detail("item_id", id)
            }
            OrderError::InvalidItem(id) => {
                AppError::new(ErrorCode::OrderInvalidItem).with_detail("item_id", id)
            }
            OrderError::InvalidQuantity { item_id, quantity } => {
                AppError::with_message(ErrorCode::OrderInvalidQuantity, message)
                    .with_detail("item_id", item_id)
                    .with_detail("quantity", quantity)
            }
            OrderError::QuantityOverflow { item_id } => {
                AppError::with_message(ErrorCode::OrderInvalidQuantity, message)
                    .with_detail("item_id", item_id)
            }
            OrderError::AmountTooLarge(amount) => {
                AppError::with_message(ErrorCode::OrderAmountTooLarge, message)
                    .with_detail("amount", amount.to_string())
            }
            OrderError::InvalidTransition { current } => {
                AppError::with_message(ErrorCode::OrderInvalidTransition, message)
                    .with_detail("current_status", current.as_str())
            }
            OrderError::AlreadyDeleted(id) => {
                AppError::with_message(ErrorCode::OrderAlreadyDeleted, message)
                    .with_detail("order_id", id)
            }
            OrderError::TransactionFailed(_) => AppError::with_message(ErrorCode::TransactionFailed, message),
            OrderError::Lookup(_) => AppError::with_message(ErrorCode::LookupFailed, message),
            OrderError::Storage(_) => AppError::with_message(ErrorCode::DatabaseError, message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::LookupError;
    use http::StatusCode;

    #[test]
    fn test_transition_message_names_current_status() {
        let err = OrderError::InvalidTransition {
            current: OrderStatus::Confirm,
        };
        assert_eq!(
            err.to_string(),
            "Order status is not 'Pending' (current status: Confirm)"
        );
    }

    #[test]
    fn test_pricing_errors_convert() {
        let err: OrderError = PricingError::ItemNotFound(4).into();
        assert!(matches!(err, OrderError::ItemNotFound(4)));
        assert!(matches!(err.item_as_invalid(), OrderError::InvalidItem(4)));

        let err: OrderError = PricingError::Lookup(LookupError("timeout".into())).into();
        assert!(matches!(err, OrderError::Lookup(ref m) if m == "timeout"));
        // Only item misses are rewritten
        assert!(matches!(err.item_as_invalid(), OrderError::Lookup(_)));
    }

    #[test]
    fn test_store_errors_convert() {
        let err: OrderError = StoreError::Commit("serialization failure".into()).into();
        assert!(matches!(err, OrderError::TransactionFailed(_)));

        let err: OrderError = StoreError::Backend("pool closed".into()).into();
        assert!(matches!(err, OrderError::Storage(_)));
    }

    #[test]
    fn test_app_error_mapping() {
        let cases = [
            (OrderError::OrderNotFound(1), ErrorCode::OrderNotFound, StatusCode::NOT_FOUND),
            (OrderError::InvalidItem(9), ErrorCode::OrderInvalidItem, StatusCode::BAD_REQUEST),
            (
                OrderError::InvalidTransition {
                    current: OrderStatus::Cancelled,
                },
                ErrorCode::OrderInvalidTransition,
                StatusCode::BAD_REQUEST,
            ),
            (
                OrderError::AlreadyDeleted(1),
                ErrorCode::OrderAlreadyDeleted,
                StatusCode::BAD_REQUEST,
            ),
            (
                OrderError::TransactionFailed("x".into()),
                ErrorCode::TransactionFailed,
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                OrderError::Lookup("x".into()),
                ErrorCode::LookupFailed,
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, code, status) in cases {
            let app: AppError = err.into();
            assert_eq!(app.code, code);
            assert_eq!(app.http_status(), status);
        }
    }

    #[test]
    fn test_limit_errors_are_bad_requests() {
        let app: AppError = OrderError::QuantityOverflow { item_id: 3 }.into();
        assert_eq!(app.code, ErrorCode::OrderInvalidQuantity);
        assert_eq!(app.http_status(), StatusCode::BAD_REQUEST);

        let err: OrderError = PricingError::AmountTooLarge(Decimal::new(1_000_000_000_000, 2)).into();
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::OrderAmountTooLarge);
        assert_eq!(app.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(app.details.unwrap()["amount"], "10000000000.00");
    }

    #[test]
    fn test_invalid_item_uses_fixed_message() {
        let app: AppError = OrderError::InvalidItem(9).into();
        assert_eq!(app.message, "Invalid item ID");
        assert_eq!(app.details.unwrap()["item_id"], 9);
    }
}
