use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const ROLE_FARMER: &str = "farmer";
pub const ROLE_BUYER: &str = "buyer";
pub const ROLE_DRIVER: &str = "driver";
pub const ROLE_ADMIN: &str = "admin";

pub const ROLES: [&str; 4] = [ROLE_FARMER, ROLE_BUYER, ROLE_DRIVER, ROLE_ADMIN];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub user_id: i32,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: String,
    pub password_hash: String,
    pub created_at: Option<NaiveDateTime>,
}
