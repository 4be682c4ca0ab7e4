use crate::{
    abstract_trait::{DynLogisticsRepository, LogisticsServiceTrait},
    domain::{
        requests::{CreateLogisticsRecord, CreateLogisticsRequest, UpdateLogisticsRequest, is_blank},
        responses::{ApiResponse, LogisticsResponse, MessageResponse},
    },
    errors::ServiceError,
    utils::{Method, Metrics, OperationTracer},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

const RECORD_NOT_FOUND: &str = "Logistics record not found";

pub struct LogisticsService {
    logistics: DynLogisticsRepository,
    tracer: OperationTracer,
}

pub struct LogisticsServiceDeps {
    pub logistics: DynLogisticsRepository,
    pub registry: Arc<Mutex<Registry>>,
}

impl LogisticsService {
    pub async fn new(deps: LogisticsServiceDeps) -> Self {
        let LogisticsServiceDeps {
            logistics,
            registry,
        } = deps;

        let metrics = Metrics::new();
        metrics.register(&mut *registry.lock().await, "logistics");

        Self {
            logistics,
            tracer: OperationTracer::new("logistics-service", metrics),
        }
    }
}

fn complete_record(req: &CreateLogisticsRequest) -> Option<CreateLogisticsRecord> {
    let order_id = req.order_id?;
    if is_blank(&req.vehicle_number_plate)
        || is_blank(&req.transport_mode)
        || is_blank(&req.pickup_location)
        || is_blank(&req.dropoff_location)
    {
        return None;
    }

    Some(CreateLogisticsRecord {
        order_id,
        vehicle_number_plate: req.vehicle_number_plate.clone()?,
        transport_mode: req.transport_mode.clone()?,
        pickup_location: req.pickup_location.clone()?,
        dropoff_location: req.dropoff_location.clone()?,
        delivered: req.delivered.unwrap_or(false),
    })
}

#[async_trait]
impl LogisticsServiceTrait for LogisticsService {
    async fn find_all(&self) -> Result<ApiResponse<Vec<LogisticsResponse>>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start_tracing(
            "FindAllLogistics",
            vec![KeyValue::new("component", "logistics")],
        );

        match self.logistics.find_all().await {
            Ok(rows) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Logistics retrieved");
                Ok(ApiResponse::success(
                    "Logistics retrieved successfully",
                    rows.into_iter().map(LogisticsResponse::from).collect(),
                ))
            }
            Err(err) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Database error");
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<LogisticsResponse>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start_tracing(
            "FindLogisticsById",
            vec![
                KeyValue::new("component", "logistics"),
                KeyValue::new("logistics.id", id.to_string()),
            ],
        );

        match self.logistics.find_by_id(id).await {
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

    async fn create_logistics(
        &self,
        req: &CreateLogisticsRequest,
    ) -> Result<ApiResponse<LogisticsResponse>, ServiceError> {
        let method = Method::Post;
        let tracing_ctx = self.tracer.start_tracing(
            "CreateLogistics",
            vec![
                KeyValue::new("component", "logistics"),
                KeyValue::new("order.id", req.order_id.unwrap_or_default().to_string()),
            ],
        );

        let Some(record) = complete_record(req) else {
            let msg = "Missing required logistics fields";
            error!("❌ {msg}");
            self.tracer.complete_tracing_error(&tracing_ctx, method, msg);
            return Err(ServiceError::validation(msg));
        };

        match self.logistics.create_logistics(&record).await {
            Ok(row) => {
                info!("🚚 Logistics {} scheduled for order {}", row.logistics_id, row.order_id);
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Logistics created");
                Ok(ApiResponse::success(
                    "Logistics record created successfully",
                    LogisticsResponse::from(row),
                ))
            }
            Err(err) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Failed to create logistics");
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn update_logistics(
        &self,
        id: i32,
        req: &UpdateLogisticsRequest,
    ) -> Result<ApiResponse<LogisticsResponse>, ServiceError> {
        let method = Method::Put;
        let tracing_ctx = self.tracer.start_tracing(
            "UpdateLogistics",
            vec![
                KeyValue::new("component", "logistics"),
                KeyValue::new("logistics.id", id.to_string()),
            ],
        );

        match self.logistics.update_logistics(id, req).await {
            Ok(Some(row)) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Logistics updated");
                Ok(ApiResponse::success(
                    "Logistics record updated successfully",
                    LogisticsResponse::from(row),
                ))
            }
            Ok(None) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, RECORD_NOT_FOUND);
                Err(ServiceError::not_found(RECORD_NOT_FOUND))
            }
            Err(err) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Database error");
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn delete_logistics(&self, id: i32) -> Result<MessageResponse, ServiceError> {
        let method = Method::Delete;
        let tracing_ctx = self.tracer.start_tracing(
            "DeleteLogistics",
            vec![
                KeyValue::new("component", "logistics"),
                KeyValue::new("logistics.id", id.to_string()),
            ],
        );

        match self.logistics.delete_logistics(id).await {
            Ok(true) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Logistics deleted");
                Ok(MessageResponse::success(
                    "Logistics record deleted successfully",
                ))
            }
            Ok(false) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, RECORD_NOT_FOUND);
                Err(ServiceError::not_found(RECORD_NOT_FOUND))
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

    async fn service(store: Arc<InMemoryStore>) -> LogisticsService {
        LogisticsService::new(LogisticsServiceDeps {
            logistics: store,
            registry: registry(),
        })
        .await
    }

    fn full_request() -> CreateLogisticsRequest {
        CreateLogisticsRequest {
            order_id: Some(1),
            vehicle_number_plate: Some("KDA 123X".into()),
            transport_mode: Some("truck".into()),
            pickup_location: Some("Limuru".into()),
            dropoff_location: Some("Wakulima".into()),
            delivered: None,
        }
    }

    #[tokio::test]
    async fn create_requires_every_field() {
        let service = service(InMemoryStore::new()).await;

        for req in [
            CreateLogisticsRequest {
                order_id: None,
                ..full_request()
            },
            CreateLogisticsRequest {
                transport_mode: Some("  ".into()),
                ..full_request()
            },
            CreateLogisticsRequest {
                dropoff_location: None,
                ..full_request()
            },
        ] {
            let err = service.create_logistics(&req).await.unwrap_err();
            assert!(
                matches!(err, ServiceError::Validation(ref m) if m[0] == "Missing required logistics fields")
            );
        }

        let created = service.create_logistics(&full_request()).await.unwrap();
        assert_eq!(created.message, "Logistics record created successfully");
        assert!(!created.data.delivered);
    }

    #[tokio::test]
    async fn update_marks_delivery_and_missing_rows_are_reported() {
        let store = InMemoryStore::new();
        let service = service(store.clone()).await;
        let created = service.create_logistics(&full_request()).await.unwrap();

        let updated = service
            .update_logistics(
                created.data.logistics_id,
                &UpdateLogisticsRequest {
                    delivered: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.data.delivered);
        assert_eq!(updated.data.transport_mode, "truck");

        let err = service
            .update_logistics(99, &UpdateLogisticsRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == RECORD_NOT_FOUND));

        let err = service.find_by_id(99).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == "Logistics not found"));
    }
}
