use crate::{
    abstract_trait::FarmerRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{CreateFarmerRequest, UpdateFarmerRequest},
    errors::RepositoryError,
    model::Farmer,
};
use async_trait::async_trait;
use tracing::{error, info};

const FARMER_COLUMNS: &str = "farmer_id, full_name, phone_number, location, farm_name, created_at";

pub struct FarmerRepository {
    db: ConnectionPool,
}

impl FarmerRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FarmerRepositoryTrait for FarmerRepository {
    async fn find_all(&self) -> Result<Vec<Farmer>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!("SELECT {FARMER_COLUMNS} FROM farmers ORDER BY farmer_id");
        let farmers = sqlx::query_as::<_, Farmer>(&sql)
            .fetch_all(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to list farmers: {err:?}");
                RepositoryError::from(err)
            })?;

        info!("✅ Found {} farmers", farmers.len());
        Ok(farmers)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Farmer>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!("SELECT {FARMER_COLUMNS} FROM farmers WHERE farmer_id = $1");
        let farmer = sqlx::query_as::<_, Farmer>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to fetch farmer ID {id}: {err:?}");
                RepositoryError::from(err)
            })?;

        Ok(farmer)
    }

    async fn create_farmer(&self, req: &CreateFarmerRequest) -> Result<Farmer, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            "INSERT INTO farmers (full_name, phone_number, location, farm_name) \
             VALUES ($1, $2, $3, $4) RETURNING {FARMER_COLUMNS}"
        );
        let farmer = sqlx::query_as::<_, Farmer>(&sql)
            .bind(&req.full_name)
            .bind(&req.phone_number)
            .bind(&req.location)
            .bind(&req.farm_name)
            .fetch_one(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to create farmer {}: {err:?}", req.full_name);
                RepositoryError::from(err)
            })?;

        info!("✅ Created farmer ID {} ({})", farmer.farmer_id, farmer.full_name);
        Ok(farmer)
    }

    async fn update_farmer(
        &self,
        id: i32,
        req: &UpdateFarmerRequest,
    ) -> Result<Option<Farmer>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            "UPDATE farmers SET \
                full_name = COALESCE($2, full_name), \
                phone_number = COALESCE($3, phone_number), \
                location = COALESCE($4, location), \
                farm_name = COALESCE($5, farm_name) \
             WHERE farmer_id = $1 RETURNING {FARMER_COLUMNS}"
        );
        let farmer = sqlx::query_as::<_, Farmer>(&sql)
            .bind(id)
            .bind(&req.full_name)
            .bind(&req.phone_number)
            .bind(&req.location)
            .bind(&req.farm_name)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to update farmer ID {id}: {err:?}");
                RepositoryError::from(err)
            })?;

        if farmer.is_some() {
            info!("🔄 Updated farmer ID {id}");
        }
        Ok(farmer)
    }

    async fn delete_farmer(&self, id: i32) -> Result<bool, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query("DELETE FROM farmers WHERE farmer_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to delete farmer ID {id}: {err:?}");
                RepositoryError::from(err)
            })?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!("🗑️ Deleted farmer ID {id}");
        }
        Ok(deleted)
    }
}
