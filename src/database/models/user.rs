use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub date_joined: DateTime<Utc>,
}

/// A user about to be persisted; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}

impl User {
    pub fn from_new(new_user: NewUser, date_joined: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: new_user.username,
            password_hash: new_user.password_hash,
            date_joined,
        }
    }
}
