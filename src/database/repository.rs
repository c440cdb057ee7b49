use async_trait::async_trait;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewUser, Product, ProductChanges, ProductDraft, User};

/// Persistence operations over products.
///
/// Implementations must list newest first (by `created_at`, then `id`), assign
/// ids that are never reused, and advance `updated_at` on every update.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Product>, DatabaseError>;

    /// Fails with `DatabaseError::NotFound` for unknown ids
    async fn get(&self, id: i64) -> Result<Product, DatabaseError>;

    async fn create(&self, draft: ProductDraft) -> Result<Product, DatabaseError>;

    /// Atomic read-modify-write of one product
    async fn update(&self, id: i64, changes: ProductChanges) -> Result<Product, DatabaseError>;

    async fn delete(&self, id: i64) -> Result<(), DatabaseError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `DatabaseError::Duplicate("username")` when the name is taken
    async fn create(&self, user: NewUser) -> Result<User, DatabaseError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError>;
}

pub(crate) fn product_not_found(id: i64) -> DatabaseError {
    DatabaseError::NotFound(format!("Product {} not found", id))
}
