use crate::entities::{OrderStatus, order_entity as orders, user_entity as users};
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait,
    QueryFilter, QueryOrder, Set,
};

#[derive(Clone)]
pub struct OrderService {
    pool: DatabaseConnection,
}

impl OrderService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    async fn find_order(&self, order_id: i32) -> AppResult<orders::Model> {
        orders::Entity::find_by_id(order_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Order {order_id} not found")))
    }

    pub async fn list_orders(&self) -> AppResult<Vec<OrderResponse>> {
        let models = orders::Entity::find()
            .order_by_asc(orders::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(models.into_iter().map(OrderResponse::from).collect())
    }

    /// Places an order owned by `customer`.
    pub async fn create_order(
        &self,
        customer: &users::Model,
        request: CreateOrderRequest,
    ) -> AppResult<OrderResponse> {
        request.validate()?;

        let order = orders::ActiveModel {
            size: Set(request.size.unwrap_or_default()),
            order_status: Set(OrderStatus::default()),
            flavour: Set(request.flavour.trim().to_string()),
            quantity: Set(request.quantity.unwrap_or(1)),
            date_created: Set(Utc::now()),
            customer: Set(customer.id),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!(
            "Order {} placed by {}: {} x {} ({})",
            order.id,
            customer.username,
            order.quantity,
            order.flavour,
            order.size
        );
        Ok(OrderResponse::from(order))
    }

    pub async fn get_order(&self, order_id: i32) -> AppResult<OrderResponse> {
        Ok(OrderResponse::from(self.find_order(order_id).await?))
    }

    pub async fn update_order(
        &self,
        order_id: i32,
        request: UpdateOrderRequest,
    ) -> AppResult<OrderResponse> {
        request.validate()?;

        let mut model = self.find_order(order_id).await?.into_active_model();
        if let Some(flavour) = &request.flavour {
            model.flavour = Set(flavour.trim().to_string());
        }
        if let Some(quantity) = request.quantity {
            model.quantity = Set(quantity);
        }
        if let Some(size) = request.size {
            model.size = Set(size);
        }
        let updated = model.update(&self.pool).await?;

        Ok(OrderResponse::from(updated))
    }

    pub async fn update_order_status(
        &self,
        order_id: i32,
        status: OrderStatus,
    ) -> AppResult<OrderResponse> {
        let mut model = self.find_order(order_id).await?.into_active_model();
        model.order_status = Set(status);
        let updated = model.update(&self.pool).await?;

        log::info!("Order {order_id} moved to {status}");
        Ok(OrderResponse::from(updated))
    }

    pub async fn delete_order(&self, order_id: i32) -> AppResult<()> {
        let order = self.find_order(order_id).await?;
        order.delete(&self.pool).await?;

        log::info!("Order {order_id} deleted");
        Ok(())
    }

    pub async fn get_user_orders(&self, user: &users::Model) -> AppResult<Vec<OrderResponse>> {
        let models = user
            .find_related(orders::Entity)
            .order_by_asc(orders::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(models.into_iter().map(OrderResponse::from).collect())
    }

    pub async fn get_user_order(
        &self,
        user: &users::Model,
        order_id: i32,
    ) -> AppResult<OrderResponse> {
        let order = user
            .find_related(orders::Entity)
            .filter(orders::Column::Id.eq(order_id))
            .one(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Order {order_id} not found for user {}", user.id))
            })?;
        Ok(OrderResponse::from(order))
    }
}
