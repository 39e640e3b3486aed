use actix_web::http::header::AUTHORIZATION;
use actix_web::{HttpRequest, HttpResponse, Result, web};
use serde_json::json;
use crate::error::AppError;
use crate::models::*;
use crate::services::AuthService;
use crate::utils::bearer_token;

pub async fn signup(
    auth_service: web::Data<AuthService>,
    request: web::Json<SignupRequest>,
) -> Result<HttpResponse> {
    let user = auth_service.signup(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "data": user
    })))
}

pub async fn login(
    auth_service: web::Data<AuthService>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let tokens = auth_service.login(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": tokens
    })))
}

/// Expects the refresh token as the bearer credential.
pub async fn refresh(
    auth_service: web::Data<AuthService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    let token = bearer_token(header)
        .ok_or_else(|| AppError::AuthError("Missing refresh token".to_string()))?;

    let tokens = auth_service.refresh_token(token).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": tokens
    })))
}

pub fn auth_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/signup", web::post().to(signup))
            .route("/login", web::post().to(login))
            .route("/refresh", web::post().to(refresh)),
    );
}
