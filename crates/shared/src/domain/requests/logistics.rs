use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Free-form create body; required fields are checked by the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateLogisticsRequest {
    #[schema(example = 1001)]
    pub order_id: Option<i32>,

    #[schema(example = "KDA 123X")]
    pub vehicle_number_plate: Option<String>,

    #[schema(example = "truck")]
    pub transport_mode: Option<String>,

    #[schema(example = "Limuru farm gate")]
    pub pickup_location: Option<String>,

    #[schema(example = "Wakulima Market")]
    pub dropoff_location: Option<String>,

    pub delivered: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateLogisticsRequest {
    pub vehicle_number_plate: Option<String>,
    pub transport_mode: Option<String>,
    pub pickup_location: Option<String>,
    pub dropoff_location: Option<String>,
    pub delivered: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AssignDriverRequest {
    #[validate(length(min = 1, message = "Vehicle number plate is required"))]
    #[schema(example = "KDA 123X")]
    pub vehicle_number_plate: String,

    #[validate(length(min = 1, message = "Transport mode is required"))]
    #[schema(example = "truck")]
    pub transport_mode: String,

    #[validate(length(min = 1, message = "Pickup location is required"))]
    #[schema(example = "Limuru farm gate")]
    pub pickup_location: String,

    #[validate(length(min = 1, message = "Dropoff location is required"))]
    #[schema(example = "Wakulima Market")]
    pub dropoff_location: String,
}

#[derive(Debug, Clone)]
pub struct CreateLogisticsRecord {
    pub order_id: i32,
    pub vehicle_number_plate: String,
    pub transport_mode: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub delivered: bool,
}

impl CreateLogisticsRecord {
    pub fn for_assignment(order_id: i32, req: &AssignDriverRequest) -> Self {
        Self {
            order_id,
            vehicle_number_plate: req.vehicle_number_plate.clone(),
            transport_mode: req.transport_mode.clone(),
            pickup_location: req.pickup_location.clone(),
            dropoff_location: req.dropoff_location.clone(),
            delivered: false,
        }
    }
}
