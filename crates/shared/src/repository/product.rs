use crate::{
    abstract_trait::ProductRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{CreateProductRecord, UpdateProductRequest},
    errors::RepositoryError,
    model::Product,
};
use async_trait::async_trait;
use tracing::{error, info};

const PRODUCT_COLUMNS: &str = "product_id, farmer_id, product_name, category, stock_quantity, \
                               price, description, created_at";

pub struct ProductRepository {
    db: ConnectionPool,
}

impl ProductRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepositoryTrait for ProductRepository {
    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY product_id");
        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to list products: {err:?}");
                RepositoryError::from(err)
            })?;

        info!("✅ Found {} products", products.len());
        Ok(products)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE product_id = $1");
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to fetch product ID {id}: {err:?}");
                RepositoryError::from(err)
            })?;

        Ok(product)
    }

    async fn find_by_farmer(&self, farmer_id: i32) -> Result<Vec<Product>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE farmer_id = $1 ORDER BY product_id"
        );
        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(farmer_id)
            .fetch_all(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to list products of farmer {farmer_id}: {err:?}");
                RepositoryError::from(err)
            })?;

        info!(
            "✅ Found {} products for farmer {farmer_id}",
            products.len()
        );
        Ok(products)
    }

    async fn find_owned(
        &self,
        id: i32,
        farmer_id: i32,
    ) -> Result<Option<Product>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE product_id = $1 AND farmer_id = $2"
        );
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .bind(farmer_id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed ownership check for product {id}, farmer {farmer_id}: {err:?}");
                RepositoryError::from(err)
            })?;

        Ok(product)
    }

    async fn create_product(&self, req: &CreateProductRecord) -> Result<Product, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            "INSERT INTO products (farmer_id, product_name, category, stock_quantity, price, description) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {PRODUCT_COLUMNS}"
        );
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(req.farmer_id)
            .bind(&req.product_name)
            .bind(&req.category)
            .bind(req.stock_quantity)
            .bind(req.price)
            .bind(&req.description)
            .fetch_one(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to create product {}: {err:?}", req.product_name);
                RepositoryError::from(err)
            })?;

        info!(
            "✅ Created product ID {} ({})",
            product.product_id, product.product_name
        );
        Ok(product)
    }

    async fn update_product(
        &self,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<Option<Product>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            "UPDATE products SET \
                product_name = COALESCE($2, product_name), \
                category = COALESCE($3, category), \
                stock_quantity = COALESCE($4, stock_quantity), \
                price = COALESCE($5, price), \
                description = COALESCE($6, description) \
             WHERE product_id = $1 RETURNING {PRODUCT_COLUMNS}"
        );
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .bind(&req.product_name)
            .bind(&req.category)
            .bind(req.stock_quantity)
            .bind(req.price)
            .bind(&req.description)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to update product ID {id}: {err:?}");
                RepositoryError::from(err)
            })?;

        if product.is_some() {
            info!("🔄 Updated product ID {id}");
        }
        Ok(product)
    }

    async fn delete_product(&self, id: i32) -> Result<bool, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query("DELETE FROM products WHERE product_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to delete product ID {id}: {err:?}");
                RepositoryError::from(err)
            })?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!("🗑️ Deleted product ID {id}");
        }
        Ok(deleted)
    }
}
