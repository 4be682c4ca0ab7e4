use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub product_id: i32,
    pub farmer_id: i32,
    pub product_name: String,
    pub category: Option<String>,
    pub stock_quantity: i32,
    pub price: Decimal,
    pub description: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}
