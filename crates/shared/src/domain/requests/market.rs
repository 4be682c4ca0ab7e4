use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateMarketRequest {
    #[validate(length(min = 1, message = "Market name is required"))]
    #[schema(example = "Central Market")]
    pub market_name: String,

    #[schema(example = "Nairobi")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateMarketRequest {
    #[validate(length(min = 1, message = "Market name cannot be empty"))]
    pub market_name: Option<String>,
    pub location: Option<String>,
}
