use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Logistics {
    pub logistics_id: i32,
    pub order_id: i32,
    pub vehicle_number_plate: String,
    pub transport_mode: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub delivered: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LogisticsWithOrderStatus {
    #[sqlx(flatten)]
    pub logistics: Logistics,
    pub order_status: String,
}
