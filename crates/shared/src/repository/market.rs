use crate::{
    abstract_trait::MarketRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{CreateMarketRequest, UpdateMarketRequest},
    errors::RepositoryError,
    model::Market,
};
use async_trait::async_trait;
use tracing::{error, info};

pub struct MarketRepository {
    db: ConnectionPool,
}

impl MarketRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MarketRepositoryTrait for MarketRepository {
    async fn find_all(&self) -> Result<Vec<Market>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let markets = sqlx::query_as::<_, Market>(
            "SELECT market_id, market_name, location, created_at FROM markets ORDER BY market_id",
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to list markets: {err:?}");
            RepositoryError::from(err)
        })?;

        info!("✅ Found {} markets", markets.len());
        Ok(markets)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Market>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let market = sqlx::query_as::<_, Market>(
            "SELECT market_id, market_name, location, created_at FROM markets WHERE market_id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to fetch market ID {id}: {err:?}");
            RepositoryError::from(err)
        })?;

        Ok(market)
    }

    async fn create_market(&self, req: &CreateMarketRequest) -> Result<Market, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let market = sqlx::query_as::<_, Market>(
            r#"
            INSERT INTO markets (market_name, location)
            VALUES ($1, $2)
            RETURNING market_id, market_name, location, created_at
            "#,
        )
        .bind(&req.market_name)
        .bind(&req.location)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to create market {}: {err:?}", req.market_name);
            RepositoryError::from(err)
        })?;

        info!("✅ Created market ID {} ({})", market.market_id, market.market_name);
        Ok(market)
    }

    async fn update_market(
        &self,
        id: i32,
        req: &UpdateMarketRequest,
    ) -> Result<Option<Market>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let market = sqlx::query_as::<_, Market>(
            r#"
            UPDATE markets
            SET market_name = COALESCE($2, market_name),
                location = COALESCE($3, location)
            WHERE market_id = $1
            RETURNING market_id, market_name, location, created_at
            "#,
        )
        .bind(id)
        .bind(&req.market_name)
        .bind(&req.location)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to update market ID {id}: {err:?}");
            RepositoryError::from(err)
        })?;

        if market.is_some() {
            info!("🔄 Updated market ID {id}");
        }
        Ok(market)
    }

    async fn delete_market(&self, id: i32) -> Result<bool, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query("DELETE FROM markets WHERE market_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to delete market ID {id}: {err:?}");
                RepositoryError::from(err)
            })?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!("🗑️ Deleted market ID {id}");
        }
        Ok(deleted)
    }
}
