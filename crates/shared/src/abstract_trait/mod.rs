mod admin;
mod auth;
mod farmer;
mod hashing;
mod jwt;
mod logistics;
mod market;
mod order;
mod payment;
mod product;
mod user;

pub use self::admin::{AdminServiceTrait, DynAdminService};
pub use self::auth::{AuthServiceTrait, DynAuthService};
pub use self::farmer::{
    DynFarmerRepository, DynFarmerService, FarmerRepositoryTrait, FarmerServiceTrait,
};
pub use self::hashing::{DynHashing, HashingTrait};
pub use self::jwt::{DynJwtService, JwtServiceTrait};
pub use self::logistics::{
    DynLogisticsRepository, DynLogisticsService, LogisticsRepositoryTrait, LogisticsServiceTrait,
};
pub use self::market::{
    DynMarketRepository, DynMarketService, MarketRepositoryTrait, MarketServiceTrait,
};
pub use self::order::{DynOrderRepository, DynOrderService, OrderRepositoryTrait, OrderServiceTrait};
pub use self::payment::{
    DynPaymentRepository, DynPaymentService, PaymentRepositoryTrait, PaymentServiceTrait,
};
pub use self::product::{
    DynProductRepository, DynProductService, ProductRepositoryTrait, ProductServiceTrait,
};
pub use self::user::{DynUserRepository, UserRepositoryTrait};
