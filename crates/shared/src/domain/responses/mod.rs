mod api;
mod farmer;
mod logistics;
mod market;
mod order;
mod payment;
mod product;
mod user;

pub use self::api::{ApiResponse, MessageResponse};
pub use self::farmer::FarmerResponse;
pub use self::logistics::{LogisticsResponse, LogisticsWithStatusResponse};
pub use self::market::MarketResponse;
pub use self::order::{AdminOrderResponse, FarmerOrderResponse, OrderResponse};
pub use self::payment::PaymentResponse;
pub use self::product::ProductResponse;
pub use self::user::{LoginResponse, UserResponse};
