use crate::{
    abstract_trait::LogisticsRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{CreateLogisticsRecord, UpdateLogisticsRequest},
    errors::RepositoryError,
    model::{Logistics, LogisticsWithOrderStatus},
};
use async_trait::async_trait;
use tracing::{error, info};

const LOGISTICS_COLUMNS: &str = "logistics_id, order_id, vehicle_number_plate, transport_mode, \
                                 pickup_location, dropoff_location, delivered";

pub struct LogisticsRepository {
    db: ConnectionPool,
}

impl LogisticsRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LogisticsRepositoryTrait for LogisticsRepository {
    async fn find_all(&self) -> Result<Vec<Logistics>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!("SELECT {LOGISTICS_COLUMNS} FROM logistics ORDER BY logistics_id");
        let rows = sqlx::query_as::<_, Logistics>(&sql)
            .fetch_all(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to list logistics: {err:?}");
                RepositoryError::from(err)
            })?;

        info!("✅ Found {} logistics records", rows.len());
        Ok(rows)
    }

    async fn find_all_with_status(&self) -> Result<Vec<LogisticsWithOrderStatus>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let rows = sqlx::query_as::<_, LogisticsWithOrderStatus>(
            r#"
            SELECT l.logistics_id, l.order_id, l.vehicle_number_plate, l.transport_mode,
                   l.pickup_location, l.dropoff_location, l.delivered,
                   o.status AS order_status
            FROM logistics l
            JOIN orders o ON l.order_id = o.order_id
            ORDER BY l.logistics_id DESC
            "#,
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to list logistics with order status: {err:?}");
            RepositoryError::from(err)
        })?;

        info!("✅ Found {} logistics records", rows.len());
        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Logistics>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!("SELECT {LOGISTICS_COLUMNS} FROM logistics WHERE logistics_id = $1");
        let row = sqlx::query_as::<_, Logistics>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to fetch logistics ID {id}: {err:?}");
                RepositoryError::from(err)
            })?;

        Ok(row)
    }

    async fn find_by_order(&self, order_id: i32) -> Result<Option<Logistics>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            "SELECT {LOGISTICS_COLUMNS} FROM logistics WHERE order_id = $1 \
             ORDER BY logistics_id DESC LIMIT 1"
        );
        let row = sqlx::query_as::<_, Logistics>(&sql)
            .bind(order_id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to fetch logistics for order {order_id}: {err:?}");
                RepositoryError::from(err)
            })?;

        Ok(row)
    }

    async fn create_logistics(
        &self,
        req: &CreateLogisticsRecord,
    ) -> Result<Logistics, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            "INSERT INTO logistics (order_id, vehicle_number_plate, transport_mode, \
                                    pickup_location, dropoff_location, delivered) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {LOGISTICS_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Logistics>(&sql)
            .bind(req.order_id)
            .bind(&req.vehicle_number_plate)
            .bind(&req.transport_mode)
            .bind(&req.pickup_location)
            .bind(&req.dropoff_location)
            .bind(req.delivered)
            .fetch_one(&mut *conn)
            .await
            .map_err(|err| {
                error!(
                    "❌ Failed to create logistics for order {}: {err:?}",
                    req.order_id
                );
                RepositoryError::from(err)
            })?;

        info!(
            "✅ Created logistics ID {} for order {}",
            row.logistics_id, row.order_id
        );
        Ok(row)
    }

    async fn update_logistics(
        &self,
        id: i32,
        req: &UpdateLogisticsRequest,
    ) -> Result<Option<Logistics>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            "UPDATE logistics SET \
                vehicle_number_plate = COALESCE($2, vehicle_number_plate), \
                transport_mode = COALESCE($3, transport_mode), \
                pickup_location = COALESCE($4, pickup_location), \
                dropoff_location = COALESCE($5, dropoff_location), \
                delivered = COALESCE($6, delivered) \
             WHERE logistics_id = $1 RETURNING {LOGISTICS_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Logistics>(&sql)
            .bind(id)
            .bind(&req.vehicle_number_plate)
            .bind(&req.transport_mode)
            .bind(&req.pickup_location)
            .bind(&req.dropoff_location)
            .bind(req.delivered)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to update logistics ID {id}: {err:?}");
                RepositoryError::from(err)
            })?;

        if row.is_some() {
            info!("🔄 Updated logistics ID {id}");
        }
        Ok(row)
    }

    async fn delete_logistics(&self, id: i32) -> Result<bool, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query("DELETE FROM logistics WHERE logistics_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to delete logistics ID {id}: {err:?}");
                RepositoryError::from(err)
            })?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!("🗑️ Deleted logistics ID {id}");
        }
        Ok(deleted)
    }
}
