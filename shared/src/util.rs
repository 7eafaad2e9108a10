//! Small helpers shared by the server and its clients

use rust_decimal::{Decimal, RoundingStrategy};

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Round a monetary amount to 2 decimal places, midpoint away from zero
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
