use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{product, NewUser, Product, ProductChanges, ProductDraft, User};
use crate::database::repository::{product_not_found, ProductRepository, UserRepository};

/// Process-local product store, used when no DATABASE_URL is configured and in tests.
#[derive(Default)]
pub struct MemoryProductRepository {
    inner: RwLock<ProductTable>,
}

#[derive(Default)]
struct ProductTable {
    last_id: i64,
    rows: BTreeMap<i64, Product>,
}

impl MemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for MemoryProductRepository {
    async fn list(&self) -> Result<Vec<Product>, DatabaseError> {
        let table = self.inner.read().await;
        let mut products: Vec<Product> = table.rows.values().cloned().collect();
        products.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(products)
    }

    async fn get(&self, id: i64) -> Result<Product, DatabaseError> {
        let table = self.inner.read().await;
        table.rows.get(&id).cloned().ok_or_else(|| product_not_found(id))
    }

    async fn create(&self, draft: ProductDraft) -> Result<Product, DatabaseError> {
        let mut table = self.inner.write().await;
        table.last_id += 1;
        let product = Product::from_draft(table.last_id, draft, product::now());
        table.rows.insert(product.id, product.clone());
        Ok(product)
    }

    async fn update(&self, id: i64, changes: ProductChanges) -> Result<Product, DatabaseError> {
        let mut table = self.inner.write().await;
        let product = table.rows.get_mut(&id).ok_or_else(|| product_not_found(id))?;
        product.apply(changes);
        Ok(product.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), DatabaseError> {
        let mut table = self.inner.write().await;
        table.rows.remove(&id).map(|_| ()).ok_or_else(|| product_not_found(id))
    }
}

/// Process-local user store keyed by username
#[derive(Default)]
pub struct MemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, DatabaseError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.username) {
            return Err(DatabaseError::Duplicate("username".to_string()));
        }
        let user = User::from_new(user, product::now());
        users.insert(user.username.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        Ok(self.users.read().await.get(username).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.id == id).cloned())
    }
}
