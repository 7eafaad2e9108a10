//! Data models
//!
//! Shared between oms-server and its API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (Postgres BIGSERIAL), timestamps are epoch millis and
//! money is [`rust_decimal::Decimal`].

pub mod item;
pub mod order;
pub mod user;

// Re-exports
pub use item::*;
pub use order::*;
pub use user::*;
