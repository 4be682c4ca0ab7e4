use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateFarmerRequest {
    #[validate(length(min = 1, message = "Full name is required"))]
    #[schema(example = "John Kamau")]
    pub full_name: String,

    #[schema(example = "+254711000000")]
    pub phone_number: Option<String>,

    #[schema(example = "Kiambu")]
    pub location: Option<String>,

    #[schema(example = "Green Acres")]
    pub farm_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateFarmerRequest {
    #[validate(length(min = 1, message = "Full name cannot be empty"))]
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub location: Option<String>,
    pub farm_name: Option<String>,
}
