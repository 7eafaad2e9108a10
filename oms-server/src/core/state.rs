//! Shared request state

use crate::core::{Config, Result};
use crate::db::{DbService, PgOrderStore};
use crate::orders::OrderService;

/// State handed to every handler
///
/// Cloning is cheap: the pool and the service share one connection pool.
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub orders: OrderService<PgOrderStore>,
}

impl ServerState {
    /// Connect to the database, run migrations and wire the services
    pub async fn initialize(config: &Config) -> Result<Self> {
        let db = DbService::new(&config.database_url, config.db_max_connections).await?;
        Ok(Self::new(config.clone(), db))
    }

    pub fn new(config: Config, db: DbService) -> Self {
        let orders = OrderService::new(PgOrderStore::new(db.pool.clone()));
        Self { config, db, orders }
    }
}
