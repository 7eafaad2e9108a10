//! Order management backend
//!
//! Users, a priced item catalog and orders whose totals come from a
//! three-stage pricing pipeline (materialize lines, compute discounts,
//! resolve the final price).
//!
//! # Module layout
//!
//! ```text
//! oms-server/src/
//! ├── core/          # config, state, server, errors
//! ├── api/           # HTTP routes and handlers
//! ├── pricing/       # line materialization, discounts, totals
//! ├── orders/        # order service and its store abstraction
//! ├── db/            # PostgreSQL pool, repositories, order store
//! └── utils/         # logging
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod orders;
pub mod pricing;
pub mod utils;

pub use crate::core::{Config, Server, ServerError, ServerState};
pub use orders::{OrderError, OrderService};
pub use pricing::PricingError;
pub use utils::logger::init_logger_with_file;

// Re-export unified error types from shared
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
