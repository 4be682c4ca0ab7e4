mod auth;
mod farmer;
mod logistics;
mod market;
mod order;
mod payment;
mod product;

pub use self::auth::{LoginRequest, RegisterRequest};
pub use self::farmer::{CreateFarmerRequest, UpdateFarmerRequest};
pub use self::logistics::{
    AssignDriverRequest, CreateLogisticsRecord, CreateLogisticsRequest, UpdateLogisticsRequest,
};
pub use self::market::{CreateMarketRequest, UpdateMarketRequest};
pub use self::order::{
    CreateOrderRecord, CreateOrderRequest, UpdateOrderRequest, UpdateOrderStatusRequest,
};
pub use self::payment::{CreatePaymentRecord, CreatePaymentRequest, UpdatePaymentRequest};
pub use self::product::{
    CreateProductRecord, CreateProductRequest, FarmerProductRequest, UpdateProductRequest,
};

pub(crate) fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}
