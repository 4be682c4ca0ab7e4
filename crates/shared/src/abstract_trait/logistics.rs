use crate::{
    domain::{
        requests::{CreateLogisticsRecord, CreateLogisticsRequest, UpdateLogisticsRequest},
        responses::{ApiResponse, LogisticsResponse, MessageResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::{Logistics, LogisticsWithOrderStatus},
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynLogisticsRepository = Arc<dyn LogisticsRepositoryTrait + Send + Sync>;
pub type DynLogisticsService = Arc<dyn LogisticsServiceTrait + Send + Sync>;

#[async_trait]
pub trait LogisticsRepositoryTrait {
    async fn find_all(&self) -> Result<Vec<Logistics>, RepositoryError>;
    async fn find_all_with_status(&self) -> Result<Vec<LogisticsWithOrderStatus>, RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Logistics>, RepositoryError>;
    async fn find_by_order(&self, order_id: i32) -> Result<Option<Logistics>, RepositoryError>;
    async fn create_logistics(
        &self,
        req: &CreateLogisticsRecord,
    ) -> Result<Logistics, RepositoryError>;
    async fn update_logistics(
        &self,
        id: i32,
        req: &UpdateLogisticsRequest,
    ) -> Result<Option<Logistics>, RepositoryError>;
    async fn delete_logistics(&self, id: i32) -> Result<bool, RepositoryError>;
}

#[async_trait]
pub trait LogisticsServiceTrait {
    async fn find_all(&self) -> Result<ApiResponse<Vec<LogisticsResponse>>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<LogisticsResponse>, ServiceError>;
    async fn create_logistics(
        &self,
        req: &CreateLogisticsRequest,
    ) -> Result<ApiResponse<LogisticsResponse>, ServiceError>;
    async fn update_logistics(
        &self,
        id: i32,
        req: &UpdateLogisticsRequest,
    ) -> Result<ApiResponse<LogisticsResponse>, ServiceError>;
    async fn delete_logistics(&self, id: i32) -> Result<MessageResponse, ServiceError>;
}
