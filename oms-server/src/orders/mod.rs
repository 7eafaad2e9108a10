//! Order lifecycle
//!
//! [`OrderService`] prices, persists and mutates orders through an injected
//! [`OrderStore`]. Every mutating operation runs in one [`OrderUnit`] that is
//! discarded unless committed.

mod aggregate;
mod error;
mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use aggregate::aggregate_items;
pub use error::{OrderError, OrderResult};
pub use service::{OrderService, PricedOrder, RepriceOutcome};
pub use store::{NewOrder, OrderStore, OrderUnit, StoreError};
