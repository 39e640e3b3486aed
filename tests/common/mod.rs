#![allow(dead_code)]

use pizza_delivery::config::DatabaseConfig;
use pizza_delivery::database::{DbPool, create_pool, run_migrations};
use pizza_delivery::entities::user_entity as users;
use pizza_delivery::models::SignupRequest;
use pizza_delivery::services::AuthService;
use pizza_delivery::utils::JwtService;
use sea_orm::{ActiveModelTrait, EntityTrait, IntoActiveModel, Set};

pub const PASSWORD: &str = "pepperoni-pass";

pub async fn test_db() -> DbPool {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        echo: false,
    };
    let pool = create_pool(&config).await.expect("connect to sqlite");
    run_migrations(&pool).await.expect("run migrations");
    pool
}

pub fn jwt() -> JwtService {
    JwtService::new("integration-secret", 1800, 2_592_000)
}

pub async fn create_user(pool: &DbPool, username: &str) -> users::Model {
    let response = AuthService::new(pool.clone(), jwt())
        .signup(SignupRequest {
            username: username.to_string(),
            email: format!("{username}@pizza.test"),
            password: PASSWORD.to_string(),
        })
        .await
        .expect("signup");

    users::Entity::find_by_id(response.id)
        .one(pool)
        .await
        .expect("query user")
        .expect("user exists")
}

pub async fn make_staff(pool: &DbPool, user: users::Model) -> users::Model {
    let mut model = user.into_active_model();
    model.is_staff = Set(true);
    model.update(pool).await.expect("promote to staff")
}
