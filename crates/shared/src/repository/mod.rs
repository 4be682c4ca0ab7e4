mod farmer;
mod logistics;
mod market;
mod order;
mod payment;
mod product;
mod user;

pub use self::farmer::FarmerRepository;
pub use self::logistics::LogisticsRepository;
pub use self::market::MarketRepository;
pub use self::order::OrderRepository;
pub use self::payment::PaymentRepository;
pub use self::product::ProductRepository;
pub use self::user::UserRepository;
