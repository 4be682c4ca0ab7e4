use crate::model::{Logistics, LogisticsWithOrderStatus};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct LogisticsResponse {
    pub logistics_id: i32,
    pub order_id: i32,
    pub vehicle_number_plate: String,
    pub transport_mode: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub delivered: bool,
}

impl From<Logistics> for LogisticsResponse {
    fn from(value: Logistics) -> Self {
        LogisticsResponse {
            logistics_id: value.logistics_id,
            order_id: value.order_id,
            vehicle_number_plate: value.vehicle_number_plate,
            transport_mode: value.transport_mode,
            pickup_location: value.pickup_location,
            dropoff_location: value.dropoff_location,
            delivered: value.delivered,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct LogisticsWithStatusResponse {
    #[serde(flatten)]
    pub logistics: LogisticsResponse,
    pub order_status: String,
}

impl From<LogisticsWithOrderStatus> for LogisticsWithStatusResponse {
    fn from(value: LogisticsWithOrderStatus) -> Self {
        LogisticsWithStatusResponse {
            logistics: value.logistics.into(),
            order_status: value.order_status,
        }
    }
}
