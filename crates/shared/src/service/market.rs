use crate::{
    abstract_trait::{DynMarketRepository, MarketServiceTrait},
    domain::{
        requests::{CreateMarketRequest, UpdateMarketRequest},
        responses::{ApiResponse, MarketResponse, MessageResponse},
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

const MARKET_NOT_FOUND: &str = "Market not found";

pub struct MarketService {
    markets: DynMarketRepository,
    tracer: OperationTracer,
}

pub struct MarketServiceDeps {
    pub markets: DynMarketRepository,
    pub registry: Arc<Mutex<Registry>>,
}

impl MarketService {
    pub async fn new(deps: MarketServiceDeps) -> Self {
        let MarketServiceDeps { markets, registry } = deps;

        let metrics = Metrics::new();
        metrics.register(&mut *registry.lock().await, "market");

        Self {
            markets,
            tracer: OperationTracer::new("market-service", metrics),
        }
    }
}

#[async_trait]
impl MarketServiceTrait for MarketService {
    async fn find_all(&self) -> Result<ApiResponse<Vec<MarketResponse>>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self
            .tracer
            .start_tracing("FindAllMarkets", vec![KeyValue::new("component", "market")]);

        match self.markets.find_all().await {
            Ok(markets) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Markets retrieved");
                Ok(ApiResponse::success(
                    "Markets retrieved successfully",
                    markets.into_iter().map(MarketResponse::from).collect(),
                ))
            }
            Err(err) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Database error");
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<MarketResponse>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start_tracing(
            "FindMarketById",
            vec![
                KeyValue::new("component", "market"),
                KeyValue::new("market.id", id.to_string()),
            ],
        );

        match self.markets.find_by_id(id).await {
            Ok(Some(market)) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Market retrieved");
                Ok(ApiResponse::success(
                    "Market retrieved successfully",
                    MarketResponse::from(market),
                ))
            }
            Ok(None) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, MARKET_NOT_FOUND);
                Err(ServiceError::not_found(MARKET_NOT_FOUND))
            }
            Err(err) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Database error");
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn create_market(
        &self,
        req: &CreateMarketRequest,
    ) -> Result<ApiResponse<MarketResponse>, ServiceError> {
        info!("🏪 Creating market {}", req.market_name);

        let method = Method::Post;
        let tracing_ctx = self.tracer.start_tracing(
            "CreateMarket",
            vec![
                KeyValue::new("component", "market"),
                KeyValue::new("market.name", req.market_name.clone()),
            ],
        );

        if req.market_name.trim().is_empty() {
            let msg = "Market name is required";
            self.tracer.complete_tracing_error(&tracing_ctx, method, msg);
            return Err(ServiceError::validation(msg));
        }

        match self.markets.create_market(req).await {
            Ok(market) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Market created");
                Ok(ApiResponse::success(
                    "Market created successfully",
                    MarketResponse::from(market),
                ))
            }
            Err(err) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Failed to create market");
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn update_market(
        &self,
        id: i32,
        req: &UpdateMarketRequest,
    ) -> Result<ApiResponse<MarketResponse>, ServiceError> {
        let method = Method::Put;
        let tracing_ctx = self.tracer.start_tracing(
            "UpdateMarket",
            vec![
                KeyValue::new("component", "market"),
                KeyValue::new("market.id", id.to_string()),
            ],
        );

        match self.markets.update_market(id, req).await {
            Ok(Some(market)) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Market updated");
                Ok(ApiResponse::success(
                    "Market updated successfully",
                    MarketResponse::from(market),
                ))
            }
            Ok(None) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, MARKET_NOT_FOUND);
                Err(ServiceError::not_found(MARKET_NOT_FOUND))
            }
            Err(err) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Database error");
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn delete_market(&self, id: i32) -> Result<MessageResponse, ServiceError> {
        let method = Method::Delete;
        let tracing_ctx = self.tracer.start_tracing(
            "DeleteMarket",
            vec![
                KeyValue::new("component", "market"),
                KeyValue::new("market.id", id.to_string()),
            ],
        );

        match self.markets.delete_market(id).await {
            Ok(true) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Market deleted");
                Ok(MessageResponse::success("Market deleted successfully"))
            }
            Ok(false) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, MARKET_NOT_FOUND);
                Err(ServiceError::not_found(MARKET_NOT_FOUND))
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
    async fn market_crud_round() {
        let service = MarketService::new(MarketServiceDeps {
            markets: InMemoryStore::new(),
            registry: registry(),
        })
        .await;

        let created = service
            .create_market(&CreateMarketRequest {
                market_name: "Wakulima".into(),
                location: Some("Nairobi".into()),
            })
            .await
            .unwrap();
        let id = created.data.market_id;

        let renamed = service
            .update_market(
                id,
                &UpdateMarketRequest {
                    market_name: Some("Marikiti".into()),
                    location: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.data.market_name, "Marikiti");
        assert_eq!(renamed.data.location.as_deref(), Some("Nairobi"));

        service.delete_market(id).await.unwrap();
        let err = service.find_by_id(id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == MARKET_NOT_FOUND));
    }
}
