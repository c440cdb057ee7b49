use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{product, NewUser, Product, ProductChanges, ProductDraft, User};
use crate::database::repository::{product_not_found, ProductRepository, UserRepository};

const PRODUCT_COLUMNS: &str = "id, name, description, price, created_at, updated_at";
const USER_COLUMNS: &str = "id, username, password_hash, date_joined";

pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn list(&self) -> Result<Vec<Product>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM products ORDER BY created_at DESC, id DESC",
            PRODUCT_COLUMNS
        );
        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(products)
    }

    async fn get(&self, id: i64) -> Result<Product, DatabaseError> {
        let sql = format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS);
        sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| product_not_found(id))
    }

    async fn create(&self, draft: ProductDraft) -> Result<Product, DatabaseError> {
        // One bound instant for both columns keeps created_at == updated_at
        let sql = format!(
            "INSERT INTO products (name, description, price, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $4) RETURNING {}",
            PRODUCT_COLUMNS
        );
        let created = sqlx::query_as::<_, Product>(&sql)
            .bind(&draft.name)
            .bind(&draft.description)
            .bind(draft.price)
            .bind(product::now())
            .fetch_one(&self.pool)
            .await?;
        Ok(created)
    }

    async fn update(&self, id: i64, changes: ProductChanges) -> Result<Product, DatabaseError> {
        let (set_description, description) = match changes.description {
            Some(value) => (true, value),
            None => (false, None),
        };

        let sql = format!(
            "UPDATE products SET \
                name = COALESCE($2, name), \
                description = CASE WHEN $3 THEN $4 ELSE description END, \
                price = COALESCE($5, price), \
                updated_at = GREATEST($6, updated_at + INTERVAL '1 microsecond') \
             WHERE id = $1 RETURNING {}",
            PRODUCT_COLUMNS
        );
        sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .bind(changes.name)
            .bind(set_description)
            .bind(description)
            .bind(changes.price)
            .bind(product::now())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| product_not_found(id))
    }

    async fn delete(&self, id: i64) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(product_not_found(id));
        }
        Ok(())
    }
}

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, DatabaseError> {
        let user = User::from_new(user, product::now());
        let sql = format!(
            "INSERT INTO users ({cols}) VALUES ($1, $2, $3, $4) RETURNING {cols}",
            cols = USER_COLUMNS
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(user.id)
            .bind(&user.username)
            .bind(&user.password_hash)
            .bind(user.date_joined)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                    DatabaseError::Duplicate("username".to_string())
                }
                other => DatabaseError::Sqlx(other),
            })
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM users WHERE username = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }
}
