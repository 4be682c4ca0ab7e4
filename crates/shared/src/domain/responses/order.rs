use crate::model::{Order, OrderWithCustomer, OrderWithProduct};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct OrderResponse {
    pub order_id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub market_id: Option<i32>,
    pub quantity: i32,
    #[schema(value_type = f64)]
    pub total_amount: Decimal,
    pub order_date: String,
    pub status: String,
}

impl From<Order> for OrderResponse {
    fn from(value: Order) -> Self {
        OrderResponse {
            order_id: value.order_id,
            user_id: value.user_id,
            product_id: value.product_id,
            market_id: value.market_id,
            quantity: value.quantity,
            total_amount: value.total_amount,
            order_date: value.order_date.to_string(),
            status: value.status,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct FarmerOrderResponse {
    #[serde(flatten)]
    pub order: OrderResponse,
    pub product_name: String,
}

impl From<OrderWithProduct> for FarmerOrderResponse {
    fn from(value: OrderWithProduct) -> Self {
        FarmerOrderResponse {
            order: value.order.into(),
            product_name: value.product_name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct AdminOrderResponse {
    #[serde(flatten)]
    pub order: OrderResponse,
    pub product_name: String,
    pub customer_name: String,
}

impl From<OrderWithCustomer> for AdminOrderResponse {
    fn from(value: OrderWithCustomer) -> Self {
        AdminOrderResponse {
            order: value.order.into(),
            product_name: value.product_name,
            customer_name: value.customer_name,
        }
    }
}
