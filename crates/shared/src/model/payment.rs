use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const PAYMENT_STATUS_PENDING: &str = "pending";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Payment {
    pub payment_id: i32,
    pub order_id: i32,
    pub payment_method: Option<String>,
    pub reference: Option<String>,
    pub payment_date: Option<NaiveDateTime>,
    pub payment_status: Option<String>,
}
