use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePaymentRequest {
    #[validate(range(min = 1, message = "Order ID is required"))]
    #[schema(example = 1001)]
    pub order_id: i32,

    #[schema(example = "M-Pesa")]
    pub payment_method: Option<String>,

    #[schema(example = "QWE123RTY")]
    pub reference: Option<String>,

    pub payment_date: Option<NaiveDateTime>,

    #[schema(example = "completed")]
    pub payment_status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdatePaymentRequest {
    pub payment_method: Option<String>,
    pub reference: Option<String>,
    pub payment_date: Option<NaiveDateTime>,
    pub payment_status: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreatePaymentRecord {
    pub order_id: i32,
    pub payment_method: Option<String>,
    pub reference: Option<String>,
    pub payment_date: NaiveDateTime,
    pub payment_status: String,
}
