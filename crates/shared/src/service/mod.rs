mod admin;
mod auth;
mod farmer;
mod logistics;
mod market;
mod order;
mod payment;
mod product;

pub use self::admin::{AdminService, AdminServiceDeps};
pub use self::auth::{AuthService, AuthServiceDeps};
pub use self::farmer::{FarmerService, FarmerServiceDeps};
pub use self::logistics::{LogisticsService, LogisticsServiceDeps};
pub use self::market::{MarketService, MarketServiceDeps};
pub use self::order::{OrderService, OrderServiceDeps};
pub use self::payment::{PaymentService, PaymentServiceDeps};
pub use self::product::{ProductService, ProductServiceDeps};
