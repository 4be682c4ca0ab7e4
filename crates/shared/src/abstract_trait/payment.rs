use crate::{
    domain::{
        requests::{CreatePaymentRecord, CreatePaymentRequest, UpdatePaymentRequest},
        responses::{ApiResponse, MessageResponse, PaymentResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::Payment,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynPaymentRepository = Arc<dyn PaymentRepositoryTrait + Send + Sync>;
pub type DynPaymentService = Arc<dyn PaymentServiceTrait + Send + Sync>;

#[async_trait]
pub trait PaymentRepositoryTrait {
    async fn find_all(&self) -> Result<Vec<Payment>, RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Payment>, RepositoryError>;
    async fn find_by_user(&self, user_id: i32) -> Result<Vec<Payment>, RepositoryError>;
    async fn create_payment(&self, req: &CreatePaymentRecord) -> Result<Payment, RepositoryError>;
    async fn update_payment(
        &self,
        id: i32,
        req: &UpdatePaymentRequest,
    ) -> Result<Option<Payment>, RepositoryError>;
    async fn delete_payment(&self, id: i32) -> Result<bool, RepositoryError>;
}

#[async_trait]
pub trait PaymentServiceTrait {
    async fn find_all(&self) -> Result<ApiResponse<Vec<PaymentResponse>>, ServiceError>;
    async fn find_by_user(
        &self,
        user_id: i32,
    ) -> Result<ApiResponse<Vec<PaymentResponse>>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<PaymentResponse>, ServiceError>;
    async fn create_payment(
        &self,
        req: &CreatePaymentRequest,
    ) -> Result<ApiResponse<PaymentResponse>, ServiceError>;
    async fn update_payment(
        &self,
        id: i32,
        req: &UpdatePaymentRequest,
    ) -> Result<ApiResponse<PaymentResponse>, ServiceError>;
    async fn delete_payment(&self, id: i32) -> Result<MessageResponse, ServiceError>;
}
