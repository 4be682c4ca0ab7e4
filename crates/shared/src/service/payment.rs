use crate::{
    abstract_trait::{DynPaymentRepository, PaymentServiceTrait},
    domain::{
        requests::{CreatePaymentRecord, CreatePaymentRequest, UpdatePaymentRequest},
        responses::{ApiResponse, MessageResponse, PaymentResponse},
    },
    errors::ServiceError,
    model::PAYMENT_STATUS_PENDING,
    utils::{Method, Metrics, OperationTracer},
};
use async_trait::async_trait;
use chrono::Utc;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

const PAYMENT_NOT_FOUND: &str = "Payment not found";

pub struct PaymentService {
    payments: DynPaymentRepository,
    tracer: OperationTracer,
}

pub struct PaymentServiceDeps {
    pub payments: DynPaymentRepository,
    pub registry: Arc<Mutex<Registry>>,
}

impl PaymentService {
    pub async fn new(deps: PaymentServiceDeps) -> Self {
        let PaymentServiceDeps { payments, registry } = deps;

        let metrics = Metrics::new();
        metrics.register(&mut *registry.lock().await, "payment");

        Self {
            payments,
            tracer: OperationTracer::new("payment-service", metrics),
        }
    }
}

#[async_trait]
impl PaymentServiceTrait for PaymentService {
    async fn find_all(&self) -> Result<ApiResponse<Vec<PaymentResponse>>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start_tracing(
            "FindAllPayments",
            vec![KeyValue::new("component", "payment")],
        );

        match self.payments.find_all().await {
            Ok(payments) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Payments retrieved");
                Ok(ApiResponse::success(
                    "Payments retrieved successfully",
                    payments.into_iter().map(PaymentResponse::from).collect(),
                ))
            }
            Err(err) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Database error");
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn find_by_user(
        &self,
        user_id: i32,
    ) -> Result<ApiResponse<Vec<PaymentResponse>>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start_tracing(
            "FindUserPayments",
            vec![
                KeyValue::new("component", "payment"),
                KeyValue::new("user.id", user_id.to_string()),
            ],
        );

        match self.payments.find_by_user(user_id).await {
            Ok(payments) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "User payments retrieved");
                Ok(ApiResponse::success(
                    "Payments retrieved successfully",
                    payments.into_iter().map(PaymentResponse::from).collect(),
                ))
            }
            Err(err) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Database error");
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<PaymentResponse>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start_tracing(
            "FindPaymentById",
            vec![
                KeyValue::new("component", "payment"),
                KeyValue::new("payment.id", id.to_string()),
            ],
        );

        match self.payments.find_by_id(id).await {
            Ok(Some(payment)) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Payment retrieved");
                Ok(ApiResponse::success(
                    "Payment retrieved successfully",
                    PaymentResponse::from(payment),
                ))
            }
            Ok(None) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, PAYMENT_NOT_FOUND);
                Err(ServiceError::not_found(PAYMENT_NOT_FOUND))
            }
            Err(err) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Database error");
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn create_payment(
        &self,
        req: &CreatePaymentRequest,
    ) -> Result<ApiResponse<PaymentResponse>, ServiceError> {
        info!("💳 Recording payment for order {}", req.order_id);

        let method = Method::Post;
        let tracing_ctx = self.tracer.start_tracing(
            "CreatePayment",
            vec![
                KeyValue::new("component", "payment"),
                KeyValue::new("order.id", req.order_id.to_string()),
            ],
        );

        let record = CreatePaymentRecord {
            order_id: req.order_id,
            payment_method: req.payment_method.clone(),
            reference: req.reference.clone(),
            payment_date: req.payment_date.unwrap_or_else(|| Utc::now().naive_utc()),
            payment_status: req
                .payment_status
                .clone()
                .unwrap_or_else(|| PAYMENT_STATUS_PENDING.to_string()),
        };

        match self.payments.create_payment(&record).await {
            Ok(payment) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Payment created");
                Ok(ApiResponse::success(
                    "Payment created",
                    PaymentResponse::from(payment),
                ))
            }
            Err(err) => {
                error!("❌ Failed to record payment for order {}: {err}", req.order_id);
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Failed to create payment");
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn update_payment(
        &self,
        id: i32,
        req: &UpdatePaymentRequest,
    ) -> Result<ApiResponse<PaymentResponse>, ServiceError> {
        let method = Method::Put;
        let tracing_ctx = self.tracer.start_tracing(
            "UpdatePayment",
            vec![
                KeyValue::new("component", "payment"),
                KeyValue::new("payment.id", id.to_string()),
            ],
        );

        match self.payments.update_payment(id, req).await {
            Ok(Some(payment)) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Payment updated");
                Ok(ApiResponse::success(
                    "Payment updated",
                    PaymentResponse::from(payment),
                ))
            }
            Ok(None) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, PAYMENT_NOT_FOUND);
                Err(ServiceError::not_found(PAYMENT_NOT_FOUND))
            }
            Err(err) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Database error");
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn delete_payment(&self, id: i32) -> Result<MessageResponse, ServiceError> {
        let method = Method::Delete;
        let tracing_ctx = self.tracer.start_tracing(
            "DeletePayment",
            vec![
                KeyValue::new("component", "payment"),
                KeyValue::new("payment.id", id.to_string()),
            ],
        );

        match self.payments.delete_payment(id).await {
            Ok(true) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Payment deleted");
                Ok(MessageResponse::success("Payment deleted"))
            }
            Ok(false) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, PAYMENT_NOT_FOUND);
                Err(ServiceError::not_found(PAYMENT_NOT_FOUND))
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

    async fn service(store: Arc<InMemoryStore>) -> PaymentService {
        PaymentService::new(PaymentServiceDeps {
            payments: store,
            registry: registry(),
        })
        .await
    }

    #[tokio::test]
    async fn create_fills_in_date_and_pending_status() {
        let store = InMemoryStore::new();
        let service = service(store.clone()).await;

        let created = service
            .create_payment(&CreatePaymentRequest {
                order_id: 1,
                payment_method: Some("M-Pesa".into()),
                reference: None,
                payment_date: None,
                payment_status: None,
            })
            .await
            .unwrap();

        assert_eq!(created.message, "Payment created");
        assert_eq!(
            created.data.payment_status.as_deref(),
            Some(PAYMENT_STATUS_PENDING)
        );
        assert!(store.payments()[0].payment_date.is_some());
    }

    #[tokio::test]
    async fn user_payments_follow_order_ownership() {
        let store = InMemoryStore::new();
        let product = store.seed_product(1, "Eggs", dec!(2), 10);
        let buyer_order = store.seed_order(5, product.product_id, 1, "pending");
        let other_order = store.seed_order(6, product.product_id, 1, "pending");
        let service = service(store).await;

        for order_id in [buyer_order.order_id, other_order.order_id] {
            service
                .create_payment(&CreatePaymentRequest {
                    order_id,
                    payment_method: None,
                    reference: None,
                    payment_date: None,
                    payment_status: Some("completed".into()),
                })
                .await
                .unwrap();
        }

        let mine = service.find_by_user(5).await.unwrap();
        assert_eq!(mine.data.len(), 1);
        assert_eq!(mine.data[0].order_id, buyer_order.order_id);
        assert_eq!(service.find_all().await.unwrap().data.len(), 2);
    }

    #[tokio::test]
    async fn missing_payment_is_not_found() {
        let service = service(InMemoryStore::new()).await;

        let err = service.find_by_id(3).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == PAYMENT_NOT_FOUND));

        let err = service
            .update_payment(3, &UpdatePaymentRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        let err = service.delete_payment(3).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
