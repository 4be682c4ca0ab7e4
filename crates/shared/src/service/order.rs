use crate::{
    abstract_trait::{DynOrderRepository, DynProductRepository, OrderServiceTrait},
    domain::{
        requests::{CreateOrderRecord, CreateOrderRequest, UpdateOrderRequest},
        responses::{ApiResponse, FarmerOrderResponse, MessageResponse, OrderResponse},
    },
    errors::ServiceError,
    model::ORDER_STATUS_PENDING,
    utils::{Method, Metrics, OperationTracer},
};
use async_trait::async_trait;
use chrono::Utc;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

const ORDER_NOT_FOUND: &str = "Order not found";

pub struct OrderService {
    orders: DynOrderRepository,
    products: DynProductRepository,
    tracer: OperationTracer,
}

pub struct OrderServiceDeps {
    pub orders: DynOrderRepository,
    pub products: DynProductRepository,
    pub registry: Arc<Mutex<Registry>>,
}

impl OrderService {
    pub async fn new(deps: OrderServiceDeps) -> Self {
        let OrderServiceDeps {
            orders,
            products,
            registry,
        } = deps;

        let metrics = Metrics::new();
        metrics.register(&mut *registry.lock().await, "order");

        Self {
            orders,
            products,
            tracer: OperationTracer::new("order-service", metrics),
        }
    }
}

#[async_trait]
impl OrderServiceTrait for OrderService {
    async fn create_order(
        &self,
        user_id: i32,
        req: &CreateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        info!(
            "🛒 User {user_id} ordering {} x product {}",
            req.quantity, req.product_id
        );

        let method = Method::Post;
        let tracing_ctx = self.tracer.start_tracing(
            "CreateOrder",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("user.id", user_id.to_string()),
                KeyValue::new("product.id", req.product_id.to_string()),
                KeyValue::new("order.quantity", req.quantity.to_string()),
            ],
        );

        if req.quantity < 1 {
            let msg = "Quantity must be at least 1";
            self.tracer.complete_tracing_error(&tracing_ctx, method, msg);
            return Err(ServiceError::validation(msg));
        }

        let product = match self.products.find_by_id(req.product_id).await {
            Ok(Some(product)) => product,
            Ok(None) => {
                error!("❌ Product {} not found for new order", req.product_id);
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Product not found");
                return Err(ServiceError::not_found("Product not found"));
            }
            Err(err) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Database error");
                return Err(ServiceError::Repo(err));
            }
        };

        let total_amount = req
            .total_amount
            .unwrap_or_else(|| product.price * Decimal::from(req.quantity));

        let status = req
            .status
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(ORDER_STATUS_PENDING)
            .to_string();

        let record = CreateOrderRecord {
            user_id,
            product_id: req.product_id,
            market_id: req.market_id,
            quantity: req.quantity,
            total_amount,
            order_date: req.order_date.unwrap_or_else(|| Utc::now().naive_utc()),
            status,
        };

        match self.orders.create_order(&record).await {
            Ok(order) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Order created");
                Ok(ApiResponse::success(
                    "Order created successfully",
                    OrderResponse::from(order),
                ))
            }
            Err(err) => {
                error!("❌ Failed to create order: {err}");
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Failed to create order");
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn find_by_user(
        &self,
        user_id: i32,
    ) -> Result<ApiResponse<Vec<OrderResponse>>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start_tracing(
            "FindUserOrders",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("user.id", user_id.to_string()),
            ],
        );

        match self.orders.find_by_user(user_id).await {
            Ok(orders) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Orders retrieved");
                Ok(ApiResponse::success(
                    "Orders retrieved successfully",
                    orders.into_iter().map(OrderResponse::from).collect(),
                ))
            }
            Err(err) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Database error");
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn find_by_farmer(
        &self,
        farmer_id: i32,
    ) -> Result<ApiResponse<Vec<FarmerOrderResponse>>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start_tracing(
            "FindFarmerOrders",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("farmer.id", farmer_id.to_string()),
            ],
        );

        match self.orders.find_by_farmer(farmer_id).await {
            Ok(orders) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Farmer orders retrieved");
                Ok(ApiResponse::success(
                    "Farmer orders retrieved successfully",
                    orders.into_iter().map(FarmerOrderResponse::from).collect(),
                ))
            }
            Err(err) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Database error");
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start_tracing(
            "FindOrderById",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("order.id", id.to_string()),
            ],
        );

        match self.orders.find_by_id(id).await {
            Ok(Some(order)) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Order retrieved");
                Ok(ApiResponse::success(
                    "Order retrieved successfully",
                    OrderResponse::from(order),
                ))
            }
            Ok(None) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, ORDER_NOT_FOUND);
                Err(ServiceError::not_found(ORDER_NOT_FOUND))
            }
            Err(err) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Database error");
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn update_order(
        &self,
        id: i32,
        req: &UpdateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let method = Method::Put;
        let tracing_ctx = self.tracer.start_tracing(
            "UpdateOrder",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("order.id", id.to_string()),
            ],
        );

        if req.quantity.is_some_and(|q| q < 1) {
            let msg = "Quantity must be at least 1";
            self.tracer.complete_tracing_error(&tracing_ctx, method, msg);
            return Err(ServiceError::validation(msg));
        }

        match self.orders.update_order(id, req).await {
            Ok(Some(order)) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Order updated");
                Ok(ApiResponse::success(
                    "Order updated successfully",
                    OrderResponse::from(order),
                ))
            }
            Ok(None) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, ORDER_NOT_FOUND);
                Err(ServiceError::not_found(ORDER_NOT_FOUND))
            }
            Err(err) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Database error");
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn delete_order(&self, id: i32) -> Result<MessageResponse, ServiceError> {
        let method = Method::Delete;
        let tracing_ctx = self.tracer.start_tracing(
            "DeleteOrder",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("order.id", id.to_string()),
            ],
        );

        match self.orders.delete_order(id).await {
            Ok(true) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Order deleted");
                Ok(MessageResponse::success("Order deleted successfully"))
            }
            Ok(false) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, ORDER_NOT_FOUND);
                Err(ServiceError::not_found(ORDER_NOT_FOUND))
            }
            Err(err) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Database error");
                Err(ServiceError::Repo(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{InMemoryStore, registry};
    use rust_decimal_macros::dec;

    async fn service(store: Arc<InMemoryStore>) -> OrderService {
        OrderService::new(OrderServiceDeps {
            orders: store.clone(),
            products: store,
            registry: registry(),
        })
        .await
    }

    fn order_request(product_id: i32, quantity: i32) -> CreateOrderRequest {
        CreateOrderRequest {
            product_id,
            market_id: None,
            quantity,
            total_amount: None,
            order_date: None,
            status: None,
        }
    }

    #[tokio::test]
    async fn create_computes_total_and_defaults_status() {
        let store = InMemoryStore::new();
        let product = store.seed_product(1, "Beans", dec!(12.50), 100);
        let service = service(store).await;

        let created = service
            .create_order(3, &order_request(product.product_id, 4))
            .await
            .unwrap();

        assert_eq!(created.message, "Order created successfully");
        assert_eq!(created.data.user_id, 3);
        assert_eq!(created.data.total_amount, dec!(50.00));
        assert_eq!(created.data.status, ORDER_STATUS_PENDING);
        assert!(created.data.order_id > 0);
    }

    #[tokio::test]
    async fn explicit_total_is_kept() {
        let store = InMemoryStore::new();
        let product = store.seed_product(1, "Beans", dec!(12.50), 100);
        let service = service(store).await;

        let created = service
            .create_order(
                3,
                &CreateOrderRequest {
                    total_amount: Some(dec!(45)),
                    status: Some("Paid".into()),
                    ..order_request(product.product_id, 4)
                },
            )
            .await
            .unwrap();

        assert_eq!(created.data.total_amount, dec!(45));
        assert_eq!(created.data.status, "Paid");
    }

    #[tokio::test]
    async fn create_rejects_unknown_product_and_zero_quantity() {
        let store = InMemoryStore::new();
        let product = store.seed_product(1, "Beans", dec!(1), 1);
        let service = service(store).await;

        let missing = service
            .create_order(3, &order_request(999, 1))
            .await
            .unwrap_err();
        assert!(matches!(missing, ServiceError::NotFound(ref m) if m == "Product not found"));

        let zero = service
            .create_order(3, &order_request(product.product_id, 0))
            .await
            .unwrap_err();
        assert!(matches!(zero, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn farmer_sees_orders_on_own_products_only() {
        let store = InMemoryStore::new();
        let mine = store.seed_product(10, "Avocado", dec!(5), 50);
        let other = store.seed_product(11, "Mango", dec!(5), 50);
        store.seed_order(3, mine.product_id, 2, ORDER_STATUS_PENDING);
        store.seed_order(3, other.product_id, 1, ORDER_STATUS_PENDING);
        let service = service(store).await;

        let orders = service.find_by_farmer(10).await.unwrap();
        assert_eq!(orders.data.len(), 1);
        assert_eq!(orders.data[0].product_name, "Avocado");
    }

    #[tokio::test]
    async fn update_and_delete_missing_orders_are_not_found() {
        let service = service(InMemoryStore::new()).await;

        let update = service
            .update_order(1, &UpdateOrderRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(update, ServiceError::NotFound(ref m) if m == ORDER_NOT_FOUND));

        let delete = service.delete_order(1).await.unwrap_err();
        assert!(matches!(delete, ServiceError::NotFound(_)));
    }
}
