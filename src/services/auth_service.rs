use crate::entities::user_entity as users;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::*;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    Set, SqlErr,
};

#[derive(Clone)]
pub struct AuthService {
    pool: DatabaseConnection,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(pool: DatabaseConnection, jwt_service: JwtService) -> Self {
        Self { pool, jwt_service }
    }

    pub async fn signup(&self, request: SignupRequest) -> AppResult<UserResponse> {
        let username = request.username.trim().to_string();
        let email = request.email.trim().to_lowercase();

        validate_username(&username)?;
        validate_email(&email)?;
        validate_password(&request.password)?;

        let existing = users::Entity::find()
            .filter(
                Condition::any()
                    .add(users::Column::Username.eq(username.as_str()))
                    .add(users::Column::Email.eq(email.as_str())),
            )
            .one(&self.pool)
            .await?;
        if let Some(existing) = existing {
            let field = if existing.username == username {
                "Username"
            } else {
                "Email"
            };
            return Err(AppError::Conflict(format!("{field} is already registered")));
        }

        let password_hash = hash_password(&request.password)?;

        let user = users::ActiveModel {
            username: Set(username),
            email: Set(email),
            password_hash: Set(password_hash),
            is_staff: Set(false),
            is_active: Set(false),
            ..Default::default()
        }
        .insert(&self.pool)
        .await
        .map_err(unique_violation_to_conflict)?;

        log::info!("Registered user {} (id {})", user.username, user.id);
        Ok(UserResponse::from(user))
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<TokenResponse> {
        let email = request.email.trim().to_lowercase();

        let user = users::Entity::find()
            .filter(users::Column::Email.eq(email.as_str()))
            .one(&self.pool)
            .await?
            .ok_or_else(invalid_credentials)?;

        if !verify_password(&request.password, &user.password_hash)? {
            return Err(invalid_credentials());
        }

        let access_token = self.jwt_service.generate_access_token(&user.username)?;
        let refresh_token = self.jwt_service.generate_refresh_token(&user.username)?;

        log::info!("User {} logged in", user.username);
        Ok(TokenResponse {
            access_token,
            refresh_token: Some(refresh_token),
            token_type: "Bearer".to_string(),
            expires_in: self.jwt_service.get_access_token_expires_in(),
        })
    }

    /// Issues a fresh access token for the identity in a refresh token.
    pub async fn refresh_token(&self, refresh_token: &str) -> AppResult<TokenResponse> {
        let claims = self.jwt_service.verify_refresh_token(refresh_token)?;

        let exists = users::Entity::find()
            .filter(users::Column::Username.eq(claims.sub.as_str()))
            .one(&self.pool)
            .await?
            .is_some();
        if !exists {
            return Err(AppError::AuthError("User no longer exists".to_string()));
        }

        let access_token = self.jwt_service.generate_access_token(&claims.sub)?;
        Ok(TokenResponse {
            access_token,
            refresh_token: None,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt_service.get_access_token_expires_in(),
        })
    }
}

fn invalid_credentials() -> AppError {
    AppError::AuthError("Invalid email or password".to_string())
}

fn unique_violation_to_conflict(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict("Username or email is already registered".to_string())
        }
        _ => AppError::DatabaseError(err),
    }
}
