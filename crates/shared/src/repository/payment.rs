use crate::{
    abstract_trait::PaymentRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{CreatePaymentRecord, UpdatePaymentRequest},
    errors::RepositoryError,
    model::Payment,
};
use async_trait::async_trait;
use tracing::{error, info};

const PAYMENT_COLUMNS: &str =
    "payment_id, order_id, payment_method, reference, payment_date, payment_status";

pub struct PaymentRepository {
    db: ConnectionPool,
}

impl PaymentRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PaymentRepositoryTrait for PaymentRepository {
    async fn find_all(&self) -> Result<Vec<Payment>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!("SELECT {PAYMENT_COLUMNS} FROM payments ORDER BY payment_id");
        let payments = sqlx::query_as::<_, Payment>(&sql)
            .fetch_all(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to list payments: {err:?}");
                RepositoryError::from(err)
            })?;

        info!("✅ Found {} payments", payments.len());
        Ok(payments)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Payment>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!("SELECT {PAYMENT_COLUMNS} FROM payments WHERE payment_id = $1");
        let payment = sqlx::query_as::<_, Payment>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to fetch payment ID {id}: {err:?}");
                RepositoryError::from(err)
            })?;

        Ok(payment)
    }

    async fn find_by_user(&self, user_id: i32) -> Result<Vec<Payment>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let payments = sqlx::query_as::<_, Payment>(
            r#"
            SELECT p.payment_id, p.order_id, p.payment_method, p.reference,
                   p.payment_date, p.payment_status
            FROM payments p
            JOIN orders o ON p.order_id = o.order_id
            WHERE o.user_id = $1
            ORDER BY p.payment_id
            "#,
        )
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to list payments of user {user_id}: {err:?}");
            RepositoryError::from(err)
        })?;

        info!("✅ Found {} payments for user {user_id}", payments.len());
        Ok(payments)
    }

    async fn create_payment(&self, req: &CreatePaymentRecord) -> Result<Payment, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            "INSERT INTO payments (order_id, payment_method, reference, payment_date, payment_status) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {PAYMENT_COLUMNS}"
        );
        let payment = sqlx::query_as::<_, Payment>(&sql)
            .bind(req.order_id)
            .bind(&req.payment_method)
            .bind(&req.reference)
            .bind(req.payment_date)
            .bind(&req.payment_status)
            .fetch_one(&mut *conn)
            .await
            .map_err(|err| {
                error!(
                    "❌ Failed to record payment for order {}: {err:?}",
                    req.order_id
                );
                RepositoryError::from(err)
            })?;

        info!(
            "✅ Recorded payment ID {} for order {}",
            payment.payment_id, payment.order_id
        );
        Ok(payment)
    }

    async fn update_payment(
        &self,
        id: i32,
        req: &UpdatePaymentRequest,
    ) -> Result<Option<Payment>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            "UPDATE payments SET \
                payment_method = COALESCE($2, payment_method), \
                reference = COALESCE($3, reference), \
                payment_date = COALESCE($4, payment_date), \
                payment_status = COALESCE($5, payment_status) \
             WHERE payment_id = $1 RETURNING {PAYMENT_COLUMNS}"
        );
        let payment = sqlx::query_as::<_, Payment>(&sql)
            .bind(id)
            .bind(&req.payment_method)
            .bind(&req.reference)
            .bind(req.payment_date)
            .bind(&req.payment_status)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to update payment ID {id}: {err:?}");
                RepositoryError::from(err)
            })?;

        if payment.is_some() {
            info!("🔄 Updated payment ID {id}");
        }
        Ok(payment)
    }

    async fn delete_payment(&self, id: i32) -> Result<bool, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query("DELETE FROM payments WHERE payment_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to delete payment ID {id}: {err:?}");
                RepositoryError::from(err)
            })?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!("🗑️ Deleted payment ID {id}");
        }
        Ok(deleted)
    }
}
