use crate::{
    domain::{
        requests::{
            CreateProductRecord, CreateProductRequest, FarmerProductRequest, UpdateProductRequest,
        },
        responses::{ApiResponse, MessageResponse, ProductResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::Product,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynProductRepository = Arc<dyn ProductRepositoryTrait + Send + Sync>;
pub type DynProductService = Arc<dyn ProductServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductRepositoryTrait {
    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, RepositoryError>;
    async fn find_by_farmer(&self, farmer_id: i32) -> Result<Vec<Product>, RepositoryError>;
    async fn find_owned(
        &self,
        id: i32,
        farmer_id: i32,
    ) -> Result<Option<Product>, RepositoryError>;
    async fn create_product(&self, req: &CreateProductRecord) -> Result<Product, RepositoryError>;
    async fn update_product(
        &self,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<Option<Product>, RepositoryError>;
    async fn delete_product(&self, id: i32) -> Result<bool, RepositoryError>;
}

#[async_trait]
pub trait ProductServiceTrait {
    async fn find_all(&self) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn update_product(
        &self,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn delete_product(&self, id: i32) -> Result<MessageResponse, ServiceError>;

    async fn find_mine(
        &self,
        farmer_id: i32,
    ) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError>;
    async fn create_for_farmer(
        &self,
        farmer_id: i32,
        req: &FarmerProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn update_owned(
        &self,
        farmer_id: i32,
        id: i32,
        req: &FarmerProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn delete_owned(&self, farmer_id: i32, id: i32)
    -> Result<MessageResponse, ServiceError>;
}
