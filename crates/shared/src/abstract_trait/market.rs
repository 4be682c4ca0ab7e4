use crate::{
    domain::{
        requests::{CreateMarketRequest, UpdateMarketRequest},
        responses::{ApiResponse, MarketResponse, MessageResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::Market,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynMarketRepository = Arc<dyn MarketRepositoryTrait + Send + Sync>;
pub type DynMarketService = Arc<dyn MarketServiceTrait + Send + Sync>;

#[async_trait]
pub trait MarketRepositoryTrait {
    async fn find_all(&self) -> Result<Vec<Market>, RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Market>, RepositoryError>;
    async fn create_market(&self, req: &CreateMarketRequest) -> Result<Market, RepositoryError>;
    async fn update_market(
        &self,
        id: i32,
        req: &UpdateMarketRequest,
    ) -> Result<Option<Market>, RepositoryError>;
    async fn delete_market(&self, id: i32) -> Result<bool, RepositoryError>;
}

#[async_trait]
pub trait MarketServiceTrait {
    async fn find_all(&self) -> Result<ApiResponse<Vec<MarketResponse>>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<MarketResponse>, ServiceError>;
    async fn create_market(
        &self,
        req: &CreateMarketRequest,
    ) -> Result<ApiResponse<MarketResponse>, ServiceError>;
    async fn update_market(
        &self,
        id: i32,
        req: &UpdateMarketRequest,
    ) -> Result<ApiResponse<MarketResponse>, ServiceError>;
    async fn delete_market(&self, id: i32) -> Result<MessageResponse, ServiceError>;
}
