use crate::model::Farmer;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct FarmerResponse {
    pub farmer_id: i32,
    pub full_name: String,
    pub phone_number: Option<String>,
    pub location: Option<String>,
    pub farm_name: Option<String>,
    pub created_at: Option<String>,
}

impl From<Farmer> for FarmerResponse {
    fn from(value: Farmer) -> Self {
        FarmerResponse {
            farmer_id: value.farmer_id,
            full_name: value.full_name,
            phone_number: value.phone_number,
            location: value.location,
            farm_name: value.farm_name,
            created_at: value.created_at.map(|dt| dt.to_string()),
        }
    }
}
