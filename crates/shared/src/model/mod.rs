mod farmer;
mod logistics;
mod market;
mod order;
mod payment;
mod product;
mod user;

pub use self::farmer::Farmer;
pub use self::logistics::{Logistics, LogisticsWithOrderStatus};
pub use self::market::Market;
pub use self::order::{
    ORDER_STATUS_PAID, ORDER_STATUS_PENDING, ORDER_STATUS_SHIPPED, Order, OrderWithCustomer,
    OrderWithProduct,
};
pub use self::payment::{PAYMENT_STATUS_PENDING, Payment};
pub use self::product::Product;
pub use self::user::{ROLE_ADMIN, ROLE_BUYER, ROLE_DRIVER, ROLE_FARMER, ROLES, User};
