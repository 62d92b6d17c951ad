//! User storage.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

use crate::entity::user;
use crate::error::StorageError;

/// Input for creating a user account. The password must already be hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
}

#[async_trait]
pub trait UserStorage: Send + Sync {
    /// Insert a new user. A duplicate username is a database error.
    async fn create_user(&self, input: NewUser) -> Result<user::Model, StorageError>;

    async fn get_user(&self, id: i32) -> Result<user::Model, StorageError>;

    async fn get_user_by_username(&self, username: &str) -> Result<user::Model, StorageError>;
}

pub struct SeaOrmUserStorage {
    db: DatabaseConnection,
}

impl SeaOrmUserStorage {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStorage for SeaOrmUserStorage {
    async fn create_user(&self, input: NewUser) -> Result<user::Model, StorageError> {
        let model = user::ActiveModel {
            username: Set(input.username),
            email: Set(input.email),
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            password_hash: Set(input.password_hash),
            date_joined: Set(Utc::now()),
            ..Default::default()
        };
        Ok(model.insert(&self.db).await?)
    }

    async fn get_user(&self, id: i32) -> Result<user::Model, StorageError> {
        user::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("user {id}")))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<user::Model, StorageError> {
        user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("user {username}")))
    }
}
