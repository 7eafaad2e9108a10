//! Database Module
//!
//! Handles the PostgreSQL connection pool and migrations

pub mod order_store;
pub mod repository;

pub use order_store::PgOrderStore;

use shared::error::AppError;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

/// Owns the PostgreSQL connection pool
#[derive(Clone)]
pub struct DbService {
    pub pool: PgPool,
}

impl DbService {
    /// Connect, then apply pending migrations
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to database: {e}")))?;

        tracing::info!(max_connections, "Database connection established (PostgreSQL)");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply migrations: {e}")))?;
        tracing::info!("Database migrations applied");

        Ok(Self { pool })
    }

    /// Wrap an existing pool without touching the database
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}
