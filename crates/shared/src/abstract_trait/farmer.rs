use crate::{
    domain::{
        requests::{CreateFarmerRequest, UpdateFarmerRequest},
        responses::{ApiResponse, FarmerResponse, MessageResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::Farmer,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynFarmerRepository = Arc<dyn FarmerRepositoryTrait + Send + Sync>;
pub type DynFarmerService = Arc<dyn FarmerServiceTrait + Send + Sync>;

#[async_trait]
pub trait FarmerRepositoryTrait {
    async fn find_all(&self) -> Result<Vec<Farmer>, RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Farmer>, RepositoryError>;
    async fn create_farmer(&self, req: &CreateFarmerRequest) -> Result<Farmer, RepositoryError>;
    async fn update_farmer(
        &self,
        id: i32,
        req: &UpdateFarmerRequest,
    ) -> Result<Option<Farmer>, RepositoryError>;
    async fn delete_farmer(&self, id: i32) -> Result<bool, RepositoryError>;
}

#[async_trait]
pub trait FarmerServiceTrait {
    async fn find_all(&self) -> Result<ApiResponse<Vec<FarmerResponse>>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<FarmerResponse>, ServiceError>;
    async fn create_farmer(
        &self,
        req: &CreateFarmerRequest,
    ) -> Result<ApiResponse<FarmerResponse>, ServiceError>;
    async fn update_farmer(
        &self,
        id: i32,
        req: &UpdateFarmerRequest,
    ) -> Result<ApiResponse<FarmerResponse>, ServiceError>;
    async fn delete_farmer(&self, id: i32) -> Result<MessageResponse, ServiceError>;
}
