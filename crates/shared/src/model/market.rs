use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Market {
    pub market_id: i32,
    pub market_name: String,
    pub location: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}
