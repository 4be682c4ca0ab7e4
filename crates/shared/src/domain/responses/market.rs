use crate::model::Market;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct MarketResponse {
    pub market_id: i32,
    pub market_name: String,
    pub location: Option<String>,
    pub created_at: Option<String>,
}

impl From<Market> for MarketResponse {
    fn from(value: Market) -> Self {
        MarketResponse {
            market_id: value.market_id,
            market_name: value.market_name,
            location: value.location,
            created_at: value.created_at.map(|dt| dt.to_string()),
        }
    }
}
