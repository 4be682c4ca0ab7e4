use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateOrderRequest {
    #[validate(range(min = 1, message = "Product ID is required"))]
    #[schema(example = 1)]
    pub product_id: i32,

    #[schema(example = 1)]
    pub market_id: Option<i32>,

    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    #[schema(example = 3)]
    pub quantity: i32,

    /// Computed from the product price when omitted.
    #[schema(value_type = Option<f64>, example = 150.0)]
    pub total_amount: Option<Decimal>,

    pub order_date: Option<NaiveDateTime>,

    #[schema(example = "pending")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateOrderRequest {
    #[validate(length(min = 1, message = "Status cannot be empty"))]
    #[schema(example = "Paid")]
    pub status: Option<String>,

    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: Option<i32>,

    #[validate(custom(function = "validate_non_negative"))]
    #[schema(value_type = Option<f64>)]
    pub total_amount: Option<Decimal>,
}

fn validate_non_negative(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        let mut err = ValidationError::new("total_amount");
        err.message = Some("Total amount cannot be negative".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateOrderStatusRequest {
    #[validate(length(min = 1, message = "Status is required"))]
    #[schema(example = "Delivered")]
    pub status: String,
}

#[derive(Debug, Clone)]
pub struct CreateOrderRecord {
    pub user_id: i32,
    pub product_id: i32,
    pub market_id: Option<i32>,
    pub quantity: i32,
    pub total_amount: Decimal,
    pub order_date: NaiveDateTime,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_update_rejects_blank_status_and_negative_total() {
        let blank = UpdateOrderRequest {
            status: Some(String::new()),
            ..Default::default()
        };
        let errors = blank.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("status"));

        let negative = UpdateOrderRequest {
            total_amount: Some(Decimal::new(-500, 2)),
            ..Default::default()
        };
        let errors = negative.validate().unwrap_err();
        assert_eq!(
            errors.field_errors()["total_amount"][0].message.as_deref(),
            Some("Total amount cannot be negative")
        );

        let fine = UpdateOrderRequest {
            status: Some("Delivered".into()),
            total_amount: Some(Decimal::ZERO),
            ..Default::default()
        };
        assert!(fine.validate().is_ok());
    }
}
