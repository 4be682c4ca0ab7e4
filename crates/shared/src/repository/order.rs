use crate::{
    abstract_trait::OrderRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{CreateOrderRecord, UpdateOrderRequest},
    errors::RepositoryError,
    model::{Order, OrderWithCustomer, OrderWithProduct},
};
use async_trait::async_trait;
use tracing::{error, info};

const ORDER_COLUMNS: &str =
    "order_id, user_id, product_id, market_id, quantity, total_amount, order_date, status";

const ADMIN_ORDER_SELECT: &str = r#"
    SELECT o.order_id, o.user_id, o.product_id, o.market_id, o.quantity,
           o.total_amount, o.order_date, o.status,
           p.product_name, u.full_name AS customer_name
    FROM orders o
    JOIN products p ON o.product_id = p.product_id
    JOIN users u ON o.user_id = u.user_id
"#;

pub struct OrderRepository {
    db: ConnectionPool,
}

impl OrderRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderRepositoryTrait for OrderRepository {
    async fn create_order(&self, req: &CreateOrderRecord) -> Result<Order, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            "INSERT INTO orders (user_id, product_id, market_id, quantity, total_amount, order_date, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {ORDER_COLUMNS}"
        );
        let order = sqlx::query_as::<_, Order>(&sql)
            .bind(req.user_id)
            .bind(req.product_id)
            .bind(req.market_id)
            .bind(req.quantity)
            .bind(req.total_amount)
            .bind(req.order_date)
            .bind(&req.status)
            .fetch_one(&mut *conn)
            .await
            .map_err(|err| {
                error!(
                    "❌ Failed to create order for user {} on product {}: {err:?}",
                    req.user_id, req.product_id
                );
                RepositoryError::from(err)
            })?;

        info!(
            "✅ Created order ID {} (user {}, total {})",
            order.order_id, order.user_id, order.total_amount
        );
        Ok(order)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Order>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE order_id = $1");
        let order = sqlx::query_as::<_, Order>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to fetch order ID {id}: {err:?}");
                RepositoryError::from(err)
            })?;

        Ok(order)
    }

    async fn find_by_user(&self, user_id: i32) -> Result<Vec<Order>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY order_date DESC"
        );
        let orders = sqlx::query_as::<_, Order>(&sql)
            .bind(user_id)
            .fetch_all(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to list orders of user {user_id}: {err:?}");
                RepositoryError::from(err)
            })?;

        info!("✅ Found {} orders for user {user_id}", orders.len());
        Ok(orders)
    }

    async fn find_by_farmer(
        &self,
        farmer_id: i32,
    ) -> Result<Vec<OrderWithProduct>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let orders = sqlx::query_as::<_, OrderWithProduct>(
            r#"
            SELECT o.order_id, o.user_id, o.product_id, o.market_id, o.quantity,
                   o.total_amount, o.order_date, o.status, p.product_name
            FROM orders o
            JOIN products p ON o.product_id = p.product_id
            WHERE p.farmer_id = $1
            ORDER BY o.order_date DESC
            "#,
        )
        .bind(farmer_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to list orders for farmer {farmer_id}: {err:?}");
            RepositoryError::from(err)
        })?;

        info!("✅ Found {} orders for farmer {farmer_id}", orders.len());
        Ok(orders)
    }

    async fn find_all_with_customer(&self) -> Result<Vec<OrderWithCustomer>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!("{ADMIN_ORDER_SELECT} ORDER BY o.order_date DESC");
        let orders = sqlx::query_as::<_, OrderWithCustomer>(&sql)
            .fetch_all(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to list all orders: {err:?}");
                RepositoryError::from(err)
            })?;

        info!("✅ Found {} orders", orders.len());
        Ok(orders)
    }

    async fn find_by_status_with_customer(
        &self,
        status: &str,
    ) -> Result<Vec<OrderWithCustomer>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!("{ADMIN_ORDER_SELECT} WHERE o.status = $1 ORDER BY o.order_date DESC");
        let orders = sqlx::query_as::<_, OrderWithCustomer>(&sql)
            .bind(status)
            .fetch_all(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to list orders with status {status}: {err:?}");
                RepositoryError::from(err)
            })?;

        info!("✅ Found {} orders with status {status}", orders.len());
        Ok(orders)
    }

    async fn update_order(
        &self,
        id: i32,
        req: &UpdateOrderRequest,
    ) -> Result<Option<Order>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            "UPDATE orders SET \
                status = COALESCE($2, status), \
                quantity = COALESCE($3, quantity), \
                total_amount = COALESCE($4, total_amount) \
             WHERE order_id = $1 RETURNING {ORDER_COLUMNS}"
        );
        let order = sqlx::query_as::<_, Order>(&sql)
            .bind(id)
            .bind(&req.status)
            .bind(req.quantity)
            .bind(req.total_amount)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to update order ID {id}: {err:?}");
                RepositoryError::from(err)
            })?;

        if order.is_some() {
            info!("🔄 Updated order ID {id}");
        }
        Ok(order)
    }

    async fn update_status(&self, id: i32, status: &str) -> Result<bool, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query("UPDATE orders SET status = $1 WHERE order_id = $2")
            .bind(status)
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to set status {status} on order ID {id}: {err:?}");
                RepositoryError::from(err)
            })?;

        let updated = result.rows_affected() > 0;
        if updated {
            info!("🔄 Order ID {id} is now {status}");
        }
        Ok(updated)
    }

    async fn delete_order(&self, id: i32) -> Result<bool, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query("DELETE FROM orders WHERE order_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to delete order ID {id}: {err:?}");
                RepositoryError::from(err)
            })?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!("🗑️ Deleted order ID {id}");
        }
        Ok(deleted)
    }
}
