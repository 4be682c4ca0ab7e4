use crate::{
    abstract_trait::{DynFarmerRepository, FarmerServiceTrait},
    domain::{
        requests::{CreateFarmerRequest, UpdateFarmerRequest},
        responses::{ApiResponse, FarmerResponse, MessageResponse},
    },
    errors::ServiceError,
    utils::{Method, Metrics, OperationTracer},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

const FARMER_NOT_FOUND: &str = "Farmer not found";

/// Directory of farm profiles, separate from farmer user accounts.
pub struct FarmerService {
    farmers: DynFarmerRepository,
    tracer: OperationTracer,
}

pub struct FarmerServiceDeps {
    pub farmers: DynFarmerRepository,
    pub registry: Arc<Mutex<Registry>>,
}

impl FarmerService {
    pub async fn new(deps: FarmerServiceDeps) -> Self {
        let FarmerServiceDeps { farmers, registry } = deps;

        let metrics = Metrics::new();
        metrics.register(&mut *registry.lock().await, "farmer");

        Self {
            farmers,
            tracer: OperationTracer::new("farmer-service", metrics),
        }
    }
}

#[async_trait]
impl FarmerServiceTrait for FarmerService {
    async fn find_all(&self) -> Result<ApiResponse<Vec<FarmerResponse>>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self
            .tracer
            .start_tracing("FindAllFarmers", vec![KeyValue::new("component", "farmer")]);

        match self.farmers.find_all().await {
            Ok(farmers) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Farmers retrieved");
                Ok(ApiResponse::success(
                    "Farmers retrieved successfully",
                    farmers.into_iter().map(FarmerResponse::from).collect(),
                ))
            }
            Err(err) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Database error");
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<FarmerResponse>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start_tracing(
            "FindFarmerById",
            vec![
                KeyValue::new("component", "farmer"),
                KeyValue::new("farmer.id", id.to_string()),
            ],
        );

        match self.farmers.find_by_id(id).await {
            Ok(Some(farmer)) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Farmer retrieved");
                Ok(ApiResponse::success(
                    "Farmer retrieved successfully",
                    FarmerResponse::from(farmer),
                ))
            }
            Ok(None) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, FARMER_NOT_FOUND);
                Err(ServiceError::not_found(FARMER_NOT_FOUND))
            }
            Err(err) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Database error");
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn create_farmer(
        &self,
        req: &CreateFarmerRequest,
    ) -> Result<ApiResponse<FarmerResponse>, ServiceError> {
        info!("🧑‍🌾 Adding farmer profile {}", req.full_name);

        let method = Method::Post;
        let tracing_ctx = self
            .tracer
            .start_tracing("CreateFarmer", vec![KeyValue::new("component", "farmer")]);

        if req.full_name.trim().is_empty() {
            let msg = "Full name is required";
            self.tracer.complete_tracing_error(&tracing_ctx, method, msg);
            return Err(ServiceError::validation(msg));
        }

        match self.farmers.create_farmer(req).await {
            Ok(farmer) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Farmer created");
                Ok(ApiResponse::success(
                    "Farmer added successfully",
                    FarmerResponse::from(farmer),
                ))
            }
            Err(err) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Failed to create farmer");
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn update_farmer(
        &self,
        id: i32,
        req: &UpdateFarmerRequest,
    ) -> Result<ApiResponse<FarmerResponse>, ServiceError> {
        let method = Method::Put;
        let tracing_ctx = self.tracer.start_tracing(
            "UpdateFarmer",
            vec![
                KeyValue::new("component", "farmer"),
                KeyValue::new("farmer.id", id.to_string()),
            ],
        );

        match self.farmers.update_farmer(id, req).await {
            Ok(Some(farmer)) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Farmer updated");
                Ok(ApiResponse::success(
                    "Farmer updated successfully",
                    FarmerResponse::from(farmer),
                ))
            }
            Ok(None) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, FARMER_NOT_FOUND);
                Err(ServiceError::not_found(FARMER_NOT_FOUND))
            }
            Err(err) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Database error");
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn delete_farmer(&self, id: i32) -> Result<MessageResponse, ServiceError> {
        let method = Method::Delete;
        let tracing_ctx = self.tracer.start_tracing(
            "DeleteFarmer",
            vec![
                KeyValue::new("component", "farmer"),
                KeyValue::new("farmer.id", id.to_string()),
            ],
        );

        match self.farmers.delete_farmer(id).await {
            Ok(true) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Farmer deleted");
                Ok(MessageResponse::success("Farmer deleted successfully"))
            }
            Ok(false) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, FARMER_NOT_FOUND);
                Err(ServiceError::not_found(FARMER_NOT_FOUND))
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

    #[tokio::test]
    async fn profiles_are_created_updated_and_removed() {
        let service = FarmerService::new(FarmerServiceDeps {
            farmers: InMemoryStore::new(),
            registry: registry(),
        })
        .await;

        let created = service
            .create_farmer(&CreateFarmerRequest {
                full_name: "Amina Mwangi".into(),
                phone_number: None,
                location: Some("Nakuru".into()),
                farm_name: Some("Green Acres".into()),
            })
            .await
            .unwrap();
        assert_eq!(created.message, "Farmer added successfully");

        let updated = service
            .update_farmer(
                created.data.farmer_id,
                &UpdateFarmerRequest {
                    phone_number: Some("0711000000".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.data.farm_name.as_deref(), Some("Green Acres"));
        assert_eq!(updated.data.phone_number.as_deref(), Some("0711000000"));

        let removed = service.delete_farmer(created.data.farmer_id).await.unwrap();
        assert_eq!(removed.message, "Farmer deleted successfully");

        let again = service.delete_farmer(created.data.farmer_id).await.unwrap_err();
        assert!(matches!(again, ServiceError::NotFound(ref m) if m == FARMER_NOT_FOUND));
    }
}
