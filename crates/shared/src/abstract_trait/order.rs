use crate::{
    domain::{
        requests::{CreateOrderRecord, CreateOrderRequest, UpdateOrderRequest},
        responses::{ApiResponse, FarmerOrderResponse, MessageResponse, OrderResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::{Order, OrderWithCustomer, OrderWithProduct},
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynOrderRepository = Arc<dyn OrderRepositoryTrait + Send + Sync>;
pub type DynOrderService = Arc<dyn OrderServiceTrait + Send + Sync>;

#[async_trait]
pub trait OrderRepositoryTrait {
    async fn create_order(&self, req: &CreateOrderRecord) -> Result<Order, RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Order>, RepositoryError>;
    async fn find_by_user(&self, user_id: i32) -> Result<Vec<Order>, RepositoryError>;
    async fn find_by_farmer(
        &self,
        farmer_id: i32,
    ) -> Result<Vec<OrderWithProduct>, RepositoryError>;
    async fn find_all_with_customer(&self) -> Result<Vec<OrderWithCustomer>, RepositoryError>;
    async fn find_by_status_with_customer(
        &self,
        status: &str,
    ) -> Result<Vec<OrderWithCustomer>, RepositoryError>;
    async fn update_order(
        &self,
        id: i32,
        req: &UpdateOrderRequest,
    ) -> Result<Option<Order>, RepositoryError>;
    async fn update_status(&self, id: i32, status: &str) -> Result<bool, RepositoryError>;
    async fn delete_order(&self, id: i32) -> Result<bool, RepositoryError>;
}

#[async_trait]
pub trait OrderServiceTrait {
    async fn create_order(
        &self,
        user_id: i32,
        req: &CreateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
    async fn find_by_user(
        &self,
        user_id: i32,
    ) -> Result<ApiResponse<Vec<OrderResponse>>, ServiceError>;
    async fn find_by_farmer(
        &self,
        farmer_id: i32,
    ) -> Result<ApiResponse<Vec<FarmerOrderResponse>>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<OrderResponse>, ServiceError>;
    async fn update_order(
        &self,
        id: i32,
        req: &UpdateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
    async fn delete_order(&self, id: i32) -> Result<MessageResponse, ServiceError>;
}
