use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Farmer {
    pub farmer_id: i32,
    pub full_name: String,
    pub phone_number: Option<String>,
    pub location: Option<String>,
    pub farm_name: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}
