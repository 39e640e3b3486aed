use crate::entities::{OrderStatus, PizzaSize, order_entity};
use crate::error::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: i32,
    pub flavour: String,
    pub quantity: i32,
    pub size: PizzaSize,
    pub order_status: OrderStatus,
    pub date_created: DateTime<Utc>,
    pub customer: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub flavour: String,
    pub quantity: Option<i32>,
    pub size: Option<PizzaSize>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateOrderRequest {
    pub flavour: Option<String>,
    pub quantity: Option<i32>,
    pub size: Option<PizzaSize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub order_status: OrderStatus,
}

fn validate_flavour(flavour: &str) -> AppResult<()> {
    if flavour.trim().is_empty() {
        return Err(AppError::ValidationError("Flavour is required".to_string()));
    }
    Ok(())
}

fn validate_quantity(quantity: i32) -> AppResult<()> {
    if quantity < 1 {
        return Err(AppError::ValidationError(
            "Quantity must be at least 1".to_string(),
        ));
    }
    Ok(())
}

impl CreateOrderRequest {
    pub fn validate(&self) -> AppResult<()> {
        validate_flavour(&self.flavour)?;
        if let Some(quantity) = self.quantity {
            validate_quantity(quantity)?;
        }
        Ok(())
    }
}

impl UpdateOrderRequest {
    pub fn validate(&self) -> AppResult<()> {
        if self.flavour.is_none() && self.quantity.is_none() && self.size.is_none() {
            return Err(AppError::ValidationError("No fields to update".to_string()));
        }
        if let Some(flavour) = &self.flavour {
            validate_flavour(flavour)?;
        }
        if let Some(quantity) = self.quantity {
            validate_quantity(quantity)?;
        }
        Ok(())
    }
}

impl From<order_entity::Model> for OrderResponse {
    fn from(m: order_entity::Model) -> Self {
        Self {
            id: m.id,
            flavour: m.flavour,
            quantity: m.quantity,
            size: m.size,
            order_status: m.order_status,
            date_created: m.date_created,
            customer: m.customer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_order_defaults_are_optional() {
        let req: CreateOrderRequest = serde_json::from_str(r#"{"flavour":"Margherita"}"#).unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.quantity, None);
        assert_eq!(req.size, None);
    }

    #[test]
    fn test_create_order_validation() {
        let blank = CreateOrderRequest {
            flavour: "  ".to_string(),
            quantity: None,
            size: None,
        };
        assert!(blank.validate().is_err());

        let zero = CreateOrderRequest {
            flavour: "Hawaiian".to_string(),
            quantity: Some(0),
            size: Some(PizzaSize::Large),
        };
        assert!(zero.validate().is_err());
    }

    #[test]
    fn test_update_order_requires_a_field() {
        assert!(UpdateOrderRequest::default().validate().is_err());

        let req = UpdateOrderRequest {
            size: Some(PizzaSize::ExtraLarge),
            ..Default::default()
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_unknown_size_is_rejected() {
        let parsed = serde_json::from_str::<CreateOrderRequest>(
            r#"{"flavour":"Veggie","size":"GIGANTIC"}"#,
        );
        assert!(parsed.is_err());
    }
}
