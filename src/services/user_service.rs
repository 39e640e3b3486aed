use crate::entities::user_entity as users;
use crate::error::{AppError, AppResult};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

#[derive(Clone)]
pub struct UserService {
    pool: DatabaseConnection,
}

impl UserService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Looks a user up by primary key, `NotFound` if absent.
    pub async fn get_by_id(&self, user_id: i32) -> AppResult<users::Model> {
        users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))
    }

    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<users::Model>> {
        Ok(users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.pool)
            .await?)
    }

    /// Resolves the identity carried by a token. A token whose user has
    /// since disappeared is treated as an authentication failure.
    pub async fn get_by_identity(&self, username: &str) -> AppResult<users::Model> {
        self.find_by_username(username)
            .await?
            .ok_or_else(|| AppError::AuthError("Token identity does not match a user".to_string()))
    }
}
