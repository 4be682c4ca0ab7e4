use crate::{
    domain::{
        requests::{AssignDriverRequest, UpdateOrderStatusRequest},
        responses::{
            AdminOrderResponse, ApiResponse, LogisticsResponse, LogisticsWithStatusResponse,
            MessageResponse, PaymentResponse, UserResponse,
        },
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynAdminService = Arc<dyn AdminServiceTrait + Send + Sync>;

#[async_trait]
pub trait AdminServiceTrait {
    async fn find_all_orders(&self)
    -> Result<ApiResponse<Vec<AdminOrderResponse>>, ServiceError>;
    async fn find_pending_orders(
        &self,
    ) -> Result<ApiResponse<Vec<AdminOrderResponse>>, ServiceError>;
    async fn update_order_status(
        &self,
        order_id: i32,
        req: &UpdateOrderStatusRequest,
    ) -> Result<MessageResponse, ServiceError>;
    async fn approve_payment(
        &self,
        order_id: i32,
    ) -> Result<ApiResponse<PaymentResponse>, ServiceError>;
    async fn assign_driver(
        &self,
        order_id: i32,
        req: &AssignDriverRequest,
    ) -> Result<ApiResponse<LogisticsResponse>, ServiceError>;
    async fn find_logistics_by_order(
        &self,
        order_id: i32,
    ) -> Result<ApiResponse<LogisticsResponse>, ServiceError>;
    async fn find_all_logistics(
        &self,
    ) -> Result<ApiResponse<Vec<LogisticsWithStatusResponse>>, ServiceError>;
    async fn find_drivers(&self) -> Result<ApiResponse<Vec<UserResponse>>, ServiceError>;
}
