use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;

use shared::{
    abstract_trait::{
        DynAdminService, DynAuthService, DynFarmerRepository, DynFarmerService, DynHashing,
        DynJwtService, DynLogisticsRepository, DynLogisticsService, DynMarketRepository,
        DynMarketService, DynOrderRepository, DynOrderService, DynPaymentRepository,
        DynPaymentService, DynProductRepository, DynProductService, DynUserRepository,
    },
    config::ConnectionPool,
    repository::{
        FarmerRepository, LogisticsRepository, MarketRepository, OrderRepository,
        PaymentRepository, ProductRepository, UserRepository,
    },
    service::{
        AdminService, AdminServiceDeps, AuthService, AuthServiceDeps, FarmerService,
        FarmerServiceDeps, LogisticsService, LogisticsServiceDeps, MarketService,
        MarketServiceDeps, OrderService, OrderServiceDeps, PaymentService, PaymentServiceDeps,
        ProductService, ProductServiceDeps,
    },
};

/// Storage seams handed to the services.
#[derive(Clone)]
pub struct Repositories {
    pub users: DynUserRepository,
    pub products: DynProductRepository,
    pub farmers: DynFarmerRepository,
    pub markets: DynMarketRepository,
    pub orders: DynOrderRepository,
    pub payments: DynPaymentRepository,
    pub logistics: DynLogisticsRepository,
}

impl Repositories {
    pub fn postgres(pool: ConnectionPool) -> Self {
        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            products: Arc::new(ProductRepository::new(pool.clone())),
            farmers: Arc::new(FarmerRepository::new(pool.clone())),
            markets: Arc::new(MarketRepository::new(pool.clone())),
            orders: Arc::new(OrderRepository::new(pool.clone())),
            payments: Arc::new(PaymentRepository::new(pool.clone())),
            logistics: Arc::new(LogisticsRepository::new(pool)),
        }
    }
}

#[derive(Clone)]
pub struct DependenciesInject {
    pub auth_service: DynAuthService,
    pub product_service: DynProductService,
    pub order_service: DynOrderService,
    pub payment_service: DynPaymentService,
    pub market_service: DynMarketService,
    pub farmer_service: DynFarmerService,
    pub logistics_service: DynLogisticsService,
    pub admin_service: DynAdminService,
}

impl std::fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("auth_service", &"DynAuthService")
            .field("product_service", &"DynProductService")
            .field("order_service", &"DynOrderService")
            .field("payment_service", &"DynPaymentService")
            .field("market_service", &"DynMarketService")
            .field("farmer_service", &"DynFarmerService")
            .field("logistics_service", &"DynLogisticsService")
            .field("admin_service", &"DynAdminService")
            .finish()
    }
}

impl DependenciesInject {
    pub async fn new(
        repos: Repositories,
        hash: DynHashing,
        jwt: DynJwtService,
        registry: Arc<Mutex<Registry>>,
    ) -> Self {
        let auth_service: DynAuthService = Arc::new(
            AuthService::new(AuthServiceDeps {
                users: repos.users.clone(),
                hash,
                jwt,
                registry: registry.clone(),
            })
            .await,
        );

        let product_service: DynProductService = Arc::new(
            ProductService::new(ProductServiceDeps {
                products: repos.products.clone(),
                registry: registry.clone(),
            })
            .await,
        );

        let order_service: DynOrderService = Arc::new(
            OrderService::new(OrderServiceDeps {
                orders: repos.orders.clone(),
                products: repos.products.clone(),
                registry: registry.clone(),
            })
            .await,
        );

        let payment_service: DynPaymentService = Arc::new(
            PaymentService::new(PaymentServiceDeps {
                payments: repos.payments.clone(),
                registry: registry.clone(),
            })
            .await,
        );

        let market_service: DynMarketService = Arc::new(
            MarketService::new(MarketServiceDeps {
                markets: repos.markets.clone(),
                registry: registry.clone(),
            })
            .await,
        );

        let farmer_service: DynFarmerService = Arc::new(
            FarmerService::new(FarmerServiceDeps {
                farmers: repos.farmers.clone(),
                registry: registry.clone(),
            })
            .await,
        );

        let logistics_service: DynLogisticsService = Arc::new(
            LogisticsService::new(LogisticsServiceDeps {
                logistics: repos.logistics.clone(),
                registry: registry.clone(),
            })
            .await,
        );

        let admin_service: DynAdminService = Arc::new(
            AdminService::new(AdminServiceDeps {
                orders: repos.orders,
                payments: repos.payments,
                logistics: repos.logistics,
                users: repos.users,
                registry,
            })
            .await,
        );

        Self {
            auth_service,
            product_service,
            order_service,
            payment_service,
            market_service,
            farmer_service,
            logistics_service,
            admin_service,
        }
    }
}
