use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const ORDER_STATUS_PENDING: &str = "pending";
pub const ORDER_STATUS_PAID: &str = "Paid";
pub const ORDER_STATUS_SHIPPED: &str = "Shipped";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub order_id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub market_id: Option<i32>,
    pub quantity: i32,
    pub total_amount: Decimal,
    pub order_date: NaiveDateTime,
    pub status: String,
}

/// Order row joined with its product, as seen by the selling farmer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderWithProduct {
    #[sqlx(flatten)]
    pub order: Order,
    pub product_name: String,
}

/// Order row joined with product and buyer, for the admin views.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderWithCustomer {
    #[sqlx(flatten)]
    pub order: Order,
    pub product_name: String,
    pub customer_name: String,
}
