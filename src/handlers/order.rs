use actix_web::{HttpRequest, HttpResponse, Result, web};
use serde_json::json;
use crate::error::AppError;
use crate::middlewares::current_identity;
use crate::models::*;
use crate::services::{OrderService, UserService};

pub async fn list_orders(order_service: web::Data<OrderService>) -> Result<HttpResponse> {
    let orders = order_service.list_orders().await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": orders
    })))
}

pub async fn create_order(
    order_service: web::Data<OrderService>,
    user_service: web::Data<UserService>,
    req: HttpRequest,
    request: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse> {
    let username = current_identity(&req)?;
    let customer = user_service.get_by_identity(&username).await?;

    let order = order_service
        .create_order(&customer, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "data": order
    })))
}

pub async fn get_order(
    order_service: web::Data<OrderService>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let order = order_service.get_order(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": order
    })))
}

pub async fn update_order(
    order_service: web::Data<OrderService>,
    path: web::Path<i32>,
    request: web::Json<UpdateOrderRequest>,
) -> Result<HttpResponse> {
    let order = order_service
        .update_order(path.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": order
    })))
}

pub async fn delete_order(
    order_service: web::Data<OrderService>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    order_service.delete_order(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Staff only.
pub async fn update_order_status(
    order_service: web::Data<OrderService>,
    user_service: web::Data<UserService>,
    req: HttpRequest,
    path: web::Path<i32>,
    request: web::Json<UpdateOrderStatusRequest>,
) -> Result<HttpResponse> {
    let username = current_identity(&req)?;
    let user = user_service.get_by_identity(&username).await?;
    if !user.is_staff {
        return Err(AppError::Forbidden.into());
    }

    let order = order_service
        .update_order_status(path.into_inner(), request.order_status)
        .await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": order
    })))
}

pub async fn get_user_order(
    order_service: web::Data<OrderService>,
    user_service: web::Data<UserService>,
    path: web::Path<(i32, i32)>,
) -> Result<HttpResponse> {
    let (user_id, order_id) = path.into_inner();
    let user = user_service.get_by_id(user_id).await?;

    let order = order_service.get_user_order(&user, order_id).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": order
    })))
}

pub async fn get_user_orders(
    order_service: web::Data<OrderService>,
    user_service: web::Data<UserService>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let user = user_service.get_by_id(path.into_inner()).await?;

    let orders = order_service.get_user_orders(&user).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": orders
    })))
}

pub fn order_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/orders", web::get().to(list_orders))
        .route("/orders", web::post().to(create_order))
        .route("/order/status/{order_id}", web::patch().to(update_order_status))
        .route("/order/{order_id}", web::get().to(get_order))
        .route("/order/{order_id}", web::put().to(update_order))
        .route("/order/{order_id}", web::delete().to(delete_order))
        .route(
            "/user/{user_id}/order/{order_id}",
            web::get().to(get_user_order),
        )
        .route("/user/{user_id}/orders", web::get().to(get_user_orders));
}
