pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;

use std::sync::Arc;

use sqlx::PgPool;

pub use manager::{DatabaseError, DatabaseManager};
pub use repository::{ProductRepository, UserRepository};

use crate::config::DatabaseConfig;

/// Handles to the repositories a request may touch
#[derive(Clone)]
pub struct Store {
    pub products: Arc<dyn ProductRepository>,
    pub users: Arc<dyn UserRepository>,
    pool: Option<PgPool>,
}

impl Store {
    pub fn memory() -> Self {
        Self {
            products: Arc::new(memory::MemoryProductRepository::new()),
            users: Arc::new(memory::MemoryUserRepository::new()),
            pool: None,
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self {
            products: Arc::new(postgres::PgProductRepository::new(pool.clone())),
            users: Arc::new(postgres::PgUserRepository::new(pool.clone())),
            pool: Some(pool),
        }
    }

    /// Postgres when a URL is configured, otherwise the in-memory store
    pub async fn from_config(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        if config.url.is_none() {
            tracing::warn!("DATABASE_URL not set; using in-memory store (data is lost on restart)");
            return Ok(Self::memory());
        }

        let pool = DatabaseManager::connect(config).await?;
        DatabaseManager::bootstrap_schema(&pool).await?;
        Ok(Self::postgres(pool))
    }

    /// Whether data survives a restart
    pub fn is_persistent(&self) -> bool {
        self.pool.is_some()
    }

    pub fn backend(&self) -> &'static str {
        if self.pool.is_some() {
            "postgres"
        } else {
            "memory"
        }
    }

    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
            tracing::info!("Closed database pool");
        }
    }
}
