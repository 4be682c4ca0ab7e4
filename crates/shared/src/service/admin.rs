use crate::{
    abstract_trait::{
        AdminServiceTrait, DynLogisticsRepository, DynOrderRepository, DynPaymentRepository,
        DynUserRepository,
    },
    domain::{
        requests::{AssignDriverRequest, CreateLogisticsRecord, CreatePaymentRecord, UpdateOrderStatusRequest},
        responses::{
            AdminOrderResponse, ApiResponse, LogisticsResponse, LogisticsWithStatusResponse,
            MessageResponse, PaymentResponse, UserResponse,
        },
    },
    errors::ServiceError,
    model::{ORDER_STATUS_PAID, ORDER_STATUS_PENDING, ORDER_STATUS_SHIPPED, ROLE_DRIVER},
    utils::{Method, Metrics, OperationTracer},
};
use async_trait::async_trait;
use chrono::Utc;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

const ORDER_NOT_FOUND: &str = "Order not found";

/// Back-office workflow. Multi-step operations run as independent
/// statements; a failure in a later step leaves the earlier one applied.
pub struct AdminService {
    orders: DynOrderRepository,
    payments: DynPaymentRepository,
    logistics: DynLogisticsRepository,
    users: DynUserRepository,
    tracer: OperationTracer,
}

pub struct AdminServiceDeps {
    pub orders: DynOrderRepository,
    pub payments: DynPaymentRepository,
    pub logistics: DynLogisticsRepository,
    pub users: DynUserRepository,
    pub registry: Arc<Mutex<Registry>>,
}

impl AdminService {
    pub async fn new(deps: AdminServiceDeps) -> Self {
        let AdminServiceDeps {
            orders,
            payments,
            logistics,
            users,
            registry,
        } = deps;

        let metrics = Metrics::new();
        metrics.register(&mut *registry.lock().await, "admin");

        Self {
            orders,
            payments,
            logistics,
            users,
            tracer: OperationTracer::new("admin-service", metrics),
        }
    }
}

#[async_trait]
impl AdminServiceTrait for AdminService {
    async fn find_all_orders(
        &self,
    ) -> Result<ApiResponse<Vec<AdminOrderResponse>>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self
            .tracer
            .start_tracing("AdminFindAllOrders", vec![KeyValue::new("component", "admin")]);

        match self.orders.find_all_with_customer().await {
            Ok(orders) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Orders retrieved");
                Ok(ApiResponse::success(
                    "Orders retrieved successfully",
                    orders.into_iter().map(AdminOrderResponse::from).collect(),
                ))
            }
            Err(err) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Database error");
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn find_pending_orders(
        &self,
    ) -> Result<ApiResponse<Vec<AdminOrderResponse>>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start_tracing(
            "AdminFindPendingOrders",
            vec![KeyValue::new("component", "admin")],
        );

        match self
            .orders
            .find_by_status_with_customer(ORDER_STATUS_PENDING)
            .await
        {
            Ok(orders) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Pending orders retrieved");
                Ok(ApiResponse::success(
                    "Pending orders retrieved successfully",
                    orders.into_iter().map(AdminOrderResponse::from).collect(),
                ))
            }
            Err(err) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Database error");
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn update_order_status(
        &self,
        order_id: i32,
        req: &UpdateOrderStatusRequest,
    ) -> Result<MessageResponse, ServiceError> {
        let method = Method::Patch;
        let tracing_ctx = self.tracer.start_tracing(
            "AdminUpdateOrderStatus",
            vec![
                KeyValue::new("component", "admin"),
                KeyValue::new("order.id", order_id.to_string()),
                KeyValue::new("order.status", req.status.clone()),
            ],
        );

        let status = req.status.trim();
        if status.is_empty() {
            let msg = "Status is required";
            self.tracer.complete_tracing_error(&tracing_ctx, method, msg);
            return Err(ServiceError::validation(msg));
        }

        match self.orders.update_status(order_id, status).await {
            Ok(true) => {
                info!("🔄 Order {order_id} moved to {status}");
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Order status updated");
                Ok(MessageResponse::success("Order status updated successfully"))
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

    async fn approve_payment(
        &self,
        order_id: i32,
    ) -> Result<ApiResponse<PaymentResponse>, ServiceError> {
        info!("💰 Approving payment for order {order_id}");

        let method = Method::Post;
        let tracing_ctx = self.tracer.start_tracing(
            "AdminApprovePayment",
            vec![
                KeyValue::new("component", "admin"),
                KeyValue::new("order.id", order_id.to_string()),
            ],
        );

        match self.orders.update_status(order_id, ORDER_STATUS_PAID).await {
            Ok(true) => {}
            Ok(false) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, ORDER_NOT_FOUND);
                return Err(ServiceError::not_found(ORDER_NOT_FOUND));
            }
            Err(err) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Failed to mark order paid");
                return Err(ServiceError::Repo(err));
            }
        }

        let record = CreatePaymentRecord {
            order_id,
            payment_method: Some("Admin Approved".into()),
            reference: Some(String::new()),
            payment_date: Utc::now().naive_utc(),
            payment_status: "completed".into(),
        };

        match self.payments.create_payment(&record).await {
            Ok(payment) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Payment approved");
                Ok(ApiResponse::success(
                    "Payment approved successfully",
                    PaymentResponse::from(payment),
                ))
            }
            Err(err) => {
                warn!("⚠️ Order {order_id} is marked Paid but the payment row was not written");
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Failed to record payment");
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn assign_driver(
        &self,
        order_id: i32,
        req: &AssignDriverRequest,
    ) -> Result<ApiResponse<LogisticsResponse>, ServiceError> {
        info!("🚚 Assigning vehicle {} to order {order_id}", req.vehicle_number_plate);

        let method = Method::Post;
        let tracing_ctx = self.tracer.start_tracing(
            "AdminAssignDriver",
            vec![
                KeyValue::new("component", "admin"),
                KeyValue::new("order.id", order_id.to_string()),
                KeyValue::new("vehicle", req.vehicle_number_plate.clone()),
            ],
        );

        let fields = [
            &req.vehicle_number_plate,
            &req.transport_mode,
            &req.pickup_location,
            &req.dropoff_location,
        ];
        if fields.iter().any(|f| f.trim().is_empty()) {
            let msg = "All logistics fields are required";
            self.tracer.complete_tracing_error(&tracing_ctx, method, msg);
            return Err(ServiceError::validation(msg));
        }

        match self.orders.find_by_id(order_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, ORDER_NOT_FOUND);
                return Err(ServiceError::not_found(ORDER_NOT_FOUND));
            }
            Err(err) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Database error");
                return Err(ServiceError::Repo(err));
            }
        }

        let record = CreateLogisticsRecord::for_assignment(order_id, req);
        let logistics = match self.logistics.create_logistics(&record).await {
            Ok(row) => row,
            Err(err) => {
                error!("❌ Failed to create logistics for order {order_id}: {err}");
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Failed to create logistics");
                return Err(ServiceError::Repo(err));
            }
        };

        match self.orders.update_status(order_id, ORDER_STATUS_SHIPPED).await {
            Ok(true) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Driver assigned");
                Ok(ApiResponse::success(
                    "Driver assigned successfully",
                    LogisticsResponse::from(logistics),
                ))
            }
            Ok(false) => {
                warn!("⚠️ Logistics {} written but order {order_id} vanished", logistics.logistics_id);
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, ORDER_NOT_FOUND);
                Err(ServiceError::not_found(ORDER_NOT_FOUND))
            }
            Err(err) => {
                warn!("⚠️ Logistics {} written but order {order_id} not marked Shipped", logistics.logistics_id);
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Failed to mark order shipped");
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn find_logistics_by_order(
        &self,
        order_id: i32,
    ) -> Result<ApiResponse<LogisticsResponse>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start_tracing(
            "AdminFindOrderLogistics",
            vec![
                KeyValue::new("component", "admin"),
                KeyValue::new("order.id", order_id.to_string()),
            ],
        );

        match self.logistics.find_by_order(order_id).await {
            Ok(Some(row)) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Logistics retrieved");
                Ok(ApiResponse::success(
                    "Logistics retrieved successfully",
                    LogisticsResponse::from(row),
                ))
            }
            Ok(None) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Logistics not found");
                Err(ServiceError::not_found("Logistics not found"))
            }
            Err(err) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Database error");
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn find_all_logistics(
        &self,
    ) -> Result<ApiResponse<Vec<LogisticsWithStatusResponse>>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start_tracing(
            "AdminFindAllLogistics",
            vec![KeyValue::new("component", "admin")],
        );

        match self.logistics.find_all_with_status().await {
            Ok(rows) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Logistics retrieved");
                Ok(ApiResponse::success(
                    "Logistics retrieved successfully",
                    rows.into_iter()
                        .map(LogisticsWithStatusResponse::from)
                        .collect(),
                ))
            }
            Err(err) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Database error");
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn find_drivers(&self) -> Result<ApiResponse<Vec<UserResponse>>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self
            .tracer
            .start_tracing("AdminFindDrivers", vec![KeyValue::new("component", "admin")]);

        match self.users.find_by_role(ROLE_DRIVER).await {
            Ok(users) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Drivers retrieved");
                Ok(ApiResponse::success(
                    "Drivers retrieved successfully",
                    users.into_iter().map(UserResponse::from).collect(),
                ))
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
    use crate::{
        model::{ROLE_BUYER, ROLE_FARMER},
        testing::{InMemoryStore, registry},
    };
    use rust_decimal_macros::dec;

    async fn service(store: Arc<InMemoryStore>) -> AdminService {
        AdminService::new(AdminServiceDeps {
            orders: store.clone(),
            payments: store.clone(),
            logistics: store.clone(),
            users: store,
            registry: registry(),
        })
        .await
    }

    fn seeded() -> (Arc<InMemoryStore>, i32) {
        let store = InMemoryStore::new();
        let farmer = store.seed_user("Amina", "amina@farm.test", ROLE_FARMER);
        let buyer = store.seed_user("Brian", "brian@farm.test", ROLE_BUYER);
        let product = store.seed_product(farmer.user_id, "Potatoes", dec!(30), 100);
        let order = store.seed_order(buyer.user_id, product.product_id, 2, ORDER_STATUS_PENDING);
        (store, order.order_id)
    }

    fn assignment() -> AssignDriverRequest {
        AssignDriverRequest {
            vehicle_number_plate: "KDA 123X".into(),
            transport_mode: "truck".into(),
            pickup_location: "Limuru".into(),
            dropoff_location: "Wakulima".into(),
        }
    }

    #[tokio::test]
    async fn approve_payment_marks_paid_and_records_payment() {
        let (store, order_id) = seeded();
        let service = service(store.clone()).await;

        let approved = service.approve_payment(order_id).await.unwrap();

        assert_eq!(approved.message, "Payment approved successfully");
        assert_eq!(store.order(order_id).unwrap().status, ORDER_STATUS_PAID);

        let payments = store.payments();
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].payment_method.as_deref(), Some("Admin Approved"));
        assert_eq!(payments[0].reference.as_deref(), Some(""));
        assert_eq!(payments[0].payment_status.as_deref(), Some("completed"));
    }

    #[tokio::test]
    async fn approve_payment_for_missing_order_writes_nothing() {
        let (store, _) = seeded();
        let service = service(store.clone()).await;

        let err = service.approve_payment(404).await.unwrap_err();

        assert!(matches!(err, ServiceError::NotFound(ref m) if m == ORDER_NOT_FOUND));
        assert!(store.payments().is_empty());
    }

    #[tokio::test]
    async fn assign_driver_creates_logistics_then_ships() {
        let (store, order_id) = seeded();
        let service = service(store.clone()).await;

        let assigned = service.assign_driver(order_id, &assignment()).await.unwrap();

        assert_eq!(assigned.message, "Driver assigned successfully");
        assert!(!assigned.data.delivered);
        assert_eq!(store.order(order_id).unwrap().status, ORDER_STATUS_SHIPPED);

        let by_order = service.find_logistics_by_order(order_id).await.unwrap();
        assert_eq!(by_order.data.vehicle_number_plate, "KDA 123X");

        let all = service.find_all_logistics().await.unwrap();
        assert_eq!(all.data[0].order_status, ORDER_STATUS_SHIPPED);
    }

    #[tokio::test]
    async fn assign_driver_validates_and_checks_order() {
        let (store, order_id) = seeded();
        let service = service(store.clone()).await;

        let blank = AssignDriverRequest {
            pickup_location: " ".into(),
            ..assignment()
        };
        let err = service.assign_driver(order_id, &blank).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let err = service.assign_driver(404, &assignment()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == ORDER_NOT_FOUND));
        assert!(store.logistics().is_empty());
    }

    #[tokio::test]
    async fn order_views_carry_product_and_customer() {
        let (store, order_id) = seeded();
        let service = service(store.clone()).await;

        let pending = service.find_pending_orders().await.unwrap();
        assert_eq!(pending.data.len(), 1);
        assert_eq!(pending.data[0].customer_name, "Brian");
        assert_eq!(pending.data[0].product_name, "Potatoes");

        service
            .update_order_status(
                order_id,
                &UpdateOrderStatusRequest {
                    status: "Delivered".into(),
                },
            )
            .await
            .unwrap();

        assert!(service.find_pending_orders().await.unwrap().data.is_empty());
        assert_eq!(service.find_all_orders().await.unwrap().data.len(), 1);

        let err = service
            .update_order_status(404, &UpdateOrderStatusRequest { status: "Paid".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn drivers_are_filtered_by_role() {
        let (store, _) = seeded();
        store.seed_user("Dan", "dan@farm.test", ROLE_DRIVER);
        let service = service(store).await;

        let drivers = service.find_drivers().await.unwrap();
        assert_eq!(drivers.data.len(), 1);
        assert_eq!(drivers.data[0].full_name, "Dan");
    }
}
