use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(range(min = 1, message = "Farmer ID is required"))]
    #[schema(example = 1)]
    pub farmer_id: i32,

    #[schema(example = "Tomatoes")]
    pub product_name: Option<String>,

    #[schema(example = "Vegetables")]
    pub category: Option<String>,

    #[validate(range(min = 0, message = "Stock quantity cannot be negative"))]
    #[schema(example = 100)]
    pub stock_quantity: Option<i32>,

    #[schema(value_type = Option<f64>, example = 50.0)]
    pub price: Option<Decimal>,

    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    pub product_name: Option<String>,

    pub category: Option<String>,

    #[validate(range(min = 0, message = "Stock quantity cannot be negative"))]
    pub stock_quantity: Option<i32>,

    #[schema(value_type = Option<f64>, example = 60.0)]
    pub price: Option<Decimal>,

    pub description: Option<String>,
}

/// Body of the farmer's own product endpoints; accepts the short field names too.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct FarmerProductRequest {
    #[serde(alias = "name")]
    #[schema(example = "Sukuma wiki")]
    pub product_name: Option<String>,

    #[schema(value_type = Option<f64>, example = 30.0)]
    pub price: Option<Decimal>,

    #[serde(alias = "quantity")]
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    #[schema(example = 40)]
    pub stock_quantity: Option<i32>,

    pub category: Option<String>,

    pub description: Option<String>,
}

impl From<FarmerProductRequest> for UpdateProductRequest {
    fn from(value: FarmerProductRequest) -> Self {
        UpdateProductRequest {
            product_name: value.product_name,
            category: value.category,
            stock_quantity: value.stock_quantity,
            price: value.price,
            description: value.description,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateProductRecord {
    pub farmer_id: i32,
    pub product_name: String,
    pub category: Option<String>,
    pub stock_quantity: i32,
    pub price: Decimal,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn farmer_request_accepts_short_names() {
        let req: FarmerProductRequest =
            serde_json::from_str(r#"{"name":"Kale","price":12.5,"quantity":3}"#).unwrap();

        assert_eq!(req.product_name.as_deref(), Some("Kale"));
        assert_eq!(req.stock_quantity, Some(3));
        assert_eq!(req.price, Some(Decimal::new(125, 1)));
    }
}
