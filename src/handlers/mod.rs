pub mod auth;
pub mod health;
pub mod order;

use actix_web::web;

use crate::error::AppError;

pub use auth::auth_config;
pub use health::health_config;
pub use order::order_config;

/// Everything mounted under `/api/v1`.
pub fn api_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                AppError::ValidationError(err.to_string()).into()
            }))
            .configure(auth_config)
            .configure(order_config),
    );
}
