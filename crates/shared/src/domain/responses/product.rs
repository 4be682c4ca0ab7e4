use crate::model::Product;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ProductResponse {
    pub product_id: i32,
    pub farmer_id: i32,
    pub product_name: String,
    pub category: Option<String>,
    pub stock_quantity: i32,
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub description: Option<String>,
    pub created_at: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(value: Product) -> Self {
        ProductResponse {
            product_id: value.product_id,
            farmer_id: value.farmer_id,
            product_name: value.product_name,
            category: value.category,
            stock_quantity: value.stock_quantity,
            price: value.price,
            description: value.description,
            created_at: value.created_at.map(|dt| dt.to_string()),
        }
    }
}
