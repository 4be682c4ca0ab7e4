//! In-memory stand-ins for the Postgres repositories, shared by service tests.

use crate::{
    abstract_trait::{
        FarmerRepositoryTrait, LogisticsRepositoryTrait, MarketRepositoryTrait,
        OrderRepositoryTrait, PaymentRepositoryTrait, ProductRepositoryTrait,
        UserRepositoryTrait,
    },
    domain::requests::{
        CreateFarmerRequest, CreateLogisticsRecord, CreateMarketRequest, CreateOrderRecord,
        CreatePaymentRecord, CreateProductRecord, RegisterRequest, UpdateFarmerRequest,
        UpdateLogisticsRequest, UpdateMarketRequest, UpdateOrderRequest, UpdatePaymentRequest,
        UpdateProductRequest,
    },
    errors::RepositoryError,
    model::{
        Farmer, Logistics, LogisticsWithOrderStatus, Market, Order, OrderWithCustomer,
        OrderWithProduct, Payment, Product, User,
    },
};
use async_trait::async_trait;
use chrono::Utc;
use prometheus_client::registry::Registry;
use rust_decimal::Decimal;
use std::sync::{Arc, Mutex, MutexGuard};

pub fn registry() -> Arc<tokio::sync::Mutex<Registry>> {
    Arc::new(tokio::sync::Mutex::new(Registry::default()))
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    farmers: Vec<Farmer>,
    markets: Vec<Market>,
    products: Vec<Product>,
    orders: Vec<Order>,
    payments: Vec<Payment>,
    logistics: Vec<Logistics>,
}

fn next_id(ids: impl Iterator<Item = i32>) -> i32 {
    ids.max().unwrap_or(0) + 1
}

/// One store implementing every repository trait, so joins see the same rows.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn seed_user(&self, full_name: &str, email: &str, role: &str) -> User {
        let mut t = self.tables();
        let user = User {
            user_id: next_id(t.users.iter().map(|u| u.user_id)),
            full_name: full_name.into(),
            email: email.into(),
            phone: None,
            role: role.into(),
            password_hash: String::new(),
            created_at: Some(Utc::now().naive_utc()),
        };
        t.users.push(user.clone());
        user
    }

    pub fn seed_product(&self, farmer_id: i32, name: &str, price: Decimal, stock: i32) -> Product {
        let mut t = self.tables();
        let product = Product {
            product_id: next_id(t.products.iter().map(|p| p.product_id)),
            farmer_id,
            product_name: name.into(),
            category: None,
            stock_quantity: stock,
            price,
            description: None,
            created_at: Some(Utc::now().naive_utc()),
        };
        t.products.push(product.clone());
        product
    }

    pub fn seed_order(&self, user_id: i32, product_id: i32, quantity: i32, status: &str) -> Order {
        let mut t = self.tables();
        let order = Order {
            order_id: next_id(t.orders.iter().map(|o| o.order_id)),
            user_id,
            product_id,
            market_id: None,
            quantity,
            total_amount: Decimal::from(quantity * 10),
            order_date: Utc::now().naive_utc(),
            status: status.into(),
        };
        t.orders.push(order.clone());
        order
    }

    pub fn order(&self, id: i32) -> Option<Order> {
        self.tables().orders.iter().find(|o| o.order_id == id).cloned()
    }

    pub fn payments(&self) -> Vec<Payment> {
        self.tables().payments.clone()
    }

    pub fn logistics(&self) -> Vec<Logistics> {
        self.tables().logistics.clone()
    }

    pub fn products(&self) -> Vec<Product> {
        self.tables().products.clone()
    }
}

#[async_trait]
impl UserRepositoryTrait for InMemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self.tables().users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepositoryError> {
        Ok(self.tables().users.iter().find(|u| u.user_id == id).cloned())
    }

    async fn find_by_role(&self, role: &str) -> Result<Vec<User>, RepositoryError> {
        Ok(self
            .tables()
            .users
            .iter()
            .filter(|u| u.role == role)
            .cloned()
            .collect())
    }

    async fn create_user(
        &self,
        req: &RegisterRequest,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let mut t = self.tables();
        if t.users.iter().any(|u| u.email == req.email) {
            return Err(RepositoryError::AlreadyExists(
                "duplicate key value violates unique constraint \"users_email_key\"".into(),
            ));
        }
        let user = User {
            user_id: next_id(t.users.iter().map(|u| u.user_id)),
            full_name: req.full_name.clone(),
            email: req.email.clone(),
            phone: req.phone.clone(),
            role: req.role.to_lowercase(),
            password_hash: password_hash.into(),
            created_at: Some(Utc::now().naive_utc()),
        };
        t.users.push(user.clone());
        Ok(user)
    }
}

#[async_trait]
impl ProductRepositoryTrait for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        Ok(self.tables().products.clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, RepositoryError> {
        Ok(self
            .tables()
            .products
            .iter()
            .find(|p| p.product_id == id)
            .cloned())
    }

    async fn find_by_farmer(&self, farmer_id: i32) -> Result<Vec<Product>, RepositoryError> {
        Ok(self
            .tables()
            .products
            .iter()
            .filter(|p| p.farmer_id == farmer_id)
            .cloned()
            .collect())
    }

    async fn find_owned(
        &self,
        id: i32,
        farmer_id: i32,
    ) -> Result<Option<Product>, RepositoryError> {
        Ok(self
            .tables()
            .products
            .iter()
            .find(|p| p.product_id == id && p.farmer_id == farmer_id)
            .cloned())
    }

    async fn create_product(&self, req: &CreateProductRecord) -> Result<Product, RepositoryError> {
        let mut t = self.tables();
        let product = Product {
            product_id: next_id(t.products.iter().map(|p| p.product_id)),
            farmer_id: req.farmer_id,
            product_name: req.product_name.clone(),
            category: req.category.clone(),
            stock_quantity: req.stock_quantity,
            price: req.price,
            description: req.description.clone(),
            created_at: Some(Utc::now().naive_utc()),
        };
        t.products.push(product.clone());
        Ok(product)
    }

    async fn update_product(
        &self,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<Option<Product>, RepositoryError> {
        let mut t = self.tables();
        let Some(p) = t.products.iter_mut().find(|p| p.product_id == id) else {
            return Ok(None);
        };
        if let Some(name) = &req.product_name {
            p.product_name = name.clone();
        }
        if req.category.is_some() {
            p.category = req.category.clone();
        }
        if let Some(stock) = req.stock_quantity {
            p.stock_quantity = stock;
        }
        if let Some(price) = req.price {
            p.price = price;
        }
        if req.description.is_some() {
            p.description = req.description.clone();
        }
        Ok(Some(p.clone()))
    }

    async fn delete_product(&self, id: i32) -> Result<bool, RepositoryError> {
        let mut t = self.tables();
        if t.orders.iter().any(|o| o.product_id == id) {
            return Err(RepositoryError::ForeignKey(
                "orders_product_id_fkey".into(),
            ));
        }
        let before = t.products.len();
        t.products.retain(|p| p.product_id != id);
        Ok(t.products.len() < before)
    }
}

#[async_trait]
impl FarmerRepositoryTrait for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<Farmer>, RepositoryError> {
        Ok(self.tables().farmers.clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Farmer>, RepositoryError> {
        Ok(self
            .tables()
            .farmers
            .iter()
            .find(|f| f.farmer_id == id)
            .cloned())
    }

    async fn create_farmer(&self, req: &CreateFarmerRequest) -> Result<Farmer, RepositoryError> {
        let mut t = self.tables();
        let farmer = Farmer {
            farmer_id: next_id(t.farmers.iter().map(|f| f.farmer_id)),
            full_name: req.full_name.clone(),
            phone_number: req.phone_number.clone(),
            location: req.location.clone(),
            farm_name: req.farm_name.clone(),
            created_at: Some(Utc::now().naive_utc()),
        };
        t.farmers.push(farmer.clone());
        Ok(farmer)
    }

    async fn update_farmer(
        &self,
        id: i32,
        req: &UpdateFarmerRequest,
    ) -> Result<Option<Farmer>, RepositoryError> {
        let mut t = self.tables();
        let Some(f) = t.farmers.iter_mut().find(|f| f.farmer_id == id) else {
            return Ok(None);
        };
        if let Some(name) = &req.full_name {
            f.full_name = name.clone();
        }
        if req.phone_number.is_some() {
            f.phone_number = req.phone_number.clone();
        }
        if req.location.is_some() {
            f.location = req.location.clone();
        }
        if req.farm_name.is_some() {
            f.farm_name = req.farm_name.clone();
        }
        Ok(Some(f.clone()))
    }

    async fn delete_farmer(&self, id: i32) -> Result<bool, RepositoryError> {
        let mut t = self.tables();
        let before = t.farmers.len();
        t.farmers.retain(|f| f.farmer_id != id);
        Ok(t.farmers.len() < before)
    }
}

#[async_trait]
impl MarketRepositoryTrait for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<Market>, RepositoryError> {
        Ok(self.tables().markets.clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Market>, RepositoryError> {
        Ok(self
            .tables()
            .markets
            .iter()
            .find(|m| m.market_id == id)
            .cloned())
    }

    async fn create_market(&self, req: &CreateMarketRequest) -> Result<Market, RepositoryError> {
        let mut t = self.tables();
        let market = Market {
            market_id: next_id(t.markets.iter().map(|m| m.market_id)),
            market_name: req.market_name.clone(),
            location: req.location.clone(),
            created_at: Some(Utc::now().naive_utc()),
        };
        t.markets.push(market.clone());
        Ok(market)
    }

    async fn update_market(
        &self,
        id: i32,
        req: &UpdateMarketRequest,
    ) -> Result<Option<Market>, RepositoryError> {
        let mut t = self.tables();
        let Some(m) = t.markets.iter_mut().find(|m| m.market_id == id) else {
            return Ok(None);
        };
        if let Some(name) = &req.market_name {
            m.market_name = name.clone();
        }
        if req.location.is_some() {
            m.location = req.location.clone();
        }
        Ok(Some(m.clone()))
    }

    async fn delete_market(&self, id: i32) -> Result<bool, RepositoryError> {
        let mut t = self.tables();
        let before = t.markets.len();
        t.markets.retain(|m| m.market_id != id);
        Ok(t.markets.len() < before)
    }
}

#[async_trait]
impl OrderRepositoryTrait for InMemoryStore {
    async fn create_order(&self, req: &CreateOrderRecord) -> Result<Order, RepositoryError> {
        let mut t = self.tables();
        if !t.products.iter().any(|p| p.product_id == req.product_id) {
            return Err(RepositoryError::ForeignKey(
                "orders_product_id_fkey".into(),
            ));
        }
        let order = Order {
            order_id: next_id(t.orders.iter().map(|o| o.order_id)),
            user_id: req.user_id,
            product_id: req.product_id,
            market_id: req.market_id,
            quantity: req.quantity,
            total_amount: req.total_amount,
            order_date: req.order_date,
            status: req.status.clone(),
        };
        t.orders.push(order.clone());
        Ok(order)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Order>, RepositoryError> {
        Ok(self.order(id))
    }

    async fn find_by_user(&self, user_id: i32) -> Result<Vec<Order>, RepositoryError> {
        Ok(self
            .tables()
            .orders
            .iter()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_farmer(
        &self,
        farmer_id: i32,
    ) -> Result<Vec<OrderWithProduct>, RepositoryError> {
        let t = self.tables();
        Ok(t.orders
            .iter()
            .filter_map(|o| {
                t.products
                    .iter()
                    .find(|p| p.product_id == o.product_id && p.farmer_id == farmer_id)
                    .map(|p| OrderWithProduct {
                        order: o.clone(),
                        product_name: p.product_name.clone(),
                    })
            })
            .collect())
    }

    async fn find_all_with_customer(&self) -> Result<Vec<OrderWithCustomer>, RepositoryError> {
        let t = self.tables();
        Ok(t.orders
            .iter()
            .rev()
            .filter_map(|o| {
                let product = t.products.iter().find(|p| p.product_id == o.product_id)?;
                let user = t.users.iter().find(|u| u.user_id == o.user_id)?;
                Some(OrderWithCustomer {
                    order: o.clone(),
                    product_name: product.product_name.clone(),
                    customer_name: user.full_name.clone(),
                })
            })
            .collect())
    }

    async fn find_by_status_with_customer(
        &self,
        status: &str,
    ) -> Result<Vec<OrderWithCustomer>, RepositoryError> {
        let all = self.find_all_with_customer().await?;
        Ok(all.into_iter().filter(|o| o.order.status == status).collect())
    }

    async fn update_order(
        &self,
        id: i32,
        req: &UpdateOrderRequest,
    ) -> Result<Option<Order>, RepositoryError> {
        let mut t = self.tables();
        let Some(o) = t.orders.iter_mut().find(|o| o.order_id == id) else {
            return Ok(None);
        };
        if let Some(status) = &req.status {
            o.status = status.clone();
        }
        if let Some(quantity) = req.quantity {
            o.quantity = quantity;
        }
        if let Some(total) = req.total_amount {
            o.total_amount = total;
        }
        Ok(Some(o.clone()))
    }

    async fn update_status(&self, id: i32, status: &str) -> Result<bool, RepositoryError> {
        let mut t = self.tables();
        match t.orders.iter_mut().find(|o| o.order_id == id) {
            Some(o) => {
                o.status = status.into();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_order(&self, id: i32) -> Result<bool, RepositoryError> {
        let mut t = self.tables();
        if t.payments.iter().any(|p| p.order_id == id) {
            return Err(RepositoryError::ForeignKey(
                "payments_order_id_fkey".into(),
            ));
        }
        if t.logistics.iter().any(|l| l.order_id == id) {
            return Err(RepositoryError::ForeignKey(
                "logistics_order_id_fkey".into(),
            ));
        }
        let before = t.orders.len();
        t.orders.retain(|o| o.order_id != id);
        Ok(t.orders.len() < before)
    }
}

#[async_trait]
impl PaymentRepositoryTrait for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<Payment>, RepositoryError> {
        Ok(self.payments())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Payment>, RepositoryError> {
        Ok(self
            .tables()
            .payments
            .iter()
            .find(|p| p.payment_id == id)
            .cloned())
    }

    async fn find_by_user(&self, user_id: i32) -> Result<Vec<Payment>, RepositoryError> {
        let t = self.tables();
        Ok(t.payments
            .iter()
            .filter(|p| {
                t.orders
                    .iter()
                    .any(|o| o.order_id == p.order_id && o.user_id == user_id)
            })
            .cloned()
            .collect())
    }

    async fn create_payment(&self, req: &CreatePaymentRecord) -> Result<Payment, RepositoryError> {
        let mut t = self.tables();
        let payment = Payment {
            payment_id: next_id(t.payments.iter().map(|p| p.payment_id)),
            order_id: req.order_id,
            payment_method: req.payment_method.clone(),
            reference: req.reference.clone(),
            payment_date: Some(req.payment_date),
            payment_status: Some(req.payment_status.clone()),
        };
        t.payments.push(payment.clone());
        Ok(payment)
    }

    async fn update_payment(
        &self,
        id: i32,
        req: &UpdatePaymentRequest,
    ) -> Result<Option<Payment>, RepositoryError> {
        let mut t = self.tables();
        let Some(p) = t.payments.iter_mut().find(|p| p.payment_id == id) else {
            return Ok(None);
        };
        if req.payment_method.is_some() {
            p.payment_method = req.payment_method.clone();
        }
        if req.reference.is_some() {
            p.reference = req.reference.clone();
        }
        if req.payment_date.is_some() {
            p.payment_date = req.payment_date;
        }
        if req.payment_status.is_some() {
            p.payment_status = req.payment_status.clone();
        }
        Ok(Some(p.clone()))
    }

    async fn delete_payment(&self, id: i32) -> Result<bool, RepositoryError> {
        let mut t = self.tables();
        let before = t.payments.len();
        t.payments.retain(|p| p.payment_id != id);
        Ok(t.payments.len() < before)
    }
}

#[async_trait]
impl LogisticsRepositoryTrait for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<Logistics>, RepositoryError> {
        Ok(self.logistics())
    }

    async fn find_all_with_status(&self) -> Result<Vec<LogisticsWithOrderStatus>, RepositoryError> {
        let t = self.tables();
        Ok(t.logistics
            .iter()
            .rev()
            .filter_map(|l| {
                t.orders
                    .iter()
                    .find(|o| o.order_id == l.order_id)
                    .map(|o| LogisticsWithOrderStatus {
                        logistics: l.clone(),
                        order_status: o.status.clone(),
                    })
            })
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Logistics>, RepositoryError> {
        Ok(self
            .tables()
            .logistics
            .iter()
            .find(|l| l.logistics_id == id)
            .cloned())
    }

    async fn find_by_order(&self, order_id: i32) -> Result<Option<Logistics>, RepositoryError> {
        Ok(self
            .tables()
            .logistics
            .iter()
            .rev()
            .find(|l| l.order_id == order_id)
            .cloned())
    }

    async fn create_logistics(
        &self,
        req: &CreateLogisticsRecord,
    ) -> Result<Logistics, RepositoryError> {
        let mut t = self.tables();
        let row = Logistics {
            logistics_id: next_id(t.logistics.iter().map(|l| l.logistics_id)),
            order_id: req.order_id,
            vehicle_number_plate: req.vehicle_number_plate.clone(),
            transport_mode: req.transport_mode.clone(),
            pickup_location: req.pickup_location.clone(),
            dropoff_location: req.dropoff_location.clone(),
            delivered: req.delivered,
        };
        t.logistics.push(row.clone());
        Ok(row)
    }

    async fn update_logistics(
        &self,
        id: i32,
        req: &UpdateLogisticsRequest,
    ) -> Result<Option<Logistics>, RepositoryError> {
        let mut t = self.tables();
        let Some(l) = t.logistics.iter_mut().find(|l| l.logistics_id == id) else {
            return Ok(None);
        };
        if let Some(v) = &req.vehicle_number_plate {
            l.vehicle_number_plate = v.clone();
        }
        if let Some(v) = &req.transport_mode {
            l.transport_mode = v.clone();
        }
        if let Some(v) = &req.pickup_location {
            l.pickup_location = v.clone();
        }
        if let Some(v) = &req.dropoff_location {
            l.dropoff_location = v.clone();
        }
        if let Some(v) = req.delivered {
            l.delivered = v;
        }
        Ok(Some(l.clone()))
    }

    async fn delete_logistics(&self, id: i32) -> Result<bool, RepositoryError> {
        let mut t = self.tables();
        let before = t.logistics.len();
        t.logistics.retain(|l| l.logistics_id != id);
        Ok(t.logistics.len() < before)
    }
}
