use crate::model::Payment;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct PaymentResponse {
    pub payment_id: i32,
    pub order_id: i32,
    pub payment_method: Option<String>,
    pub reference: Option<String>,
    pub payment_date: Option<String>,
    pub payment_status: Option<String>,
}

impl From<Payment> for PaymentResponse {
    fn from(value: Payment) -> Self {
        PaymentResponse {
            payment_id: value.payment_id,
            order_id: value.order_id,
            payment_method: value.payment_method,
            reference: value.reference,
            payment_date: value.payment_date.map(|dt| dt.to_string()),
            payment_status: value.payment_status,
        }
    }
}
