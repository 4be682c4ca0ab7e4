use crate::{
    abstract_trait::UserRepositoryTrait, config::ConnectionPool,
    domain::requests::RegisterRequest, errors::RepositoryError, model::User,
};
use async_trait::async_trait;
use tracing::{error, info};

const USER_COLUMNS: &str = "user_id, full_name, email, phone, role, password_hash, created_at";

pub struct UserRepository {
    db: ConnectionPool,
}

impl UserRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to look up user by email {email}: {err:?}");
                RepositoryError::from(err)
            })?;

        Ok(user)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to fetch user ID {id}: {err:?}");
                RepositoryError::from(err)
            })?;

        Ok(user)
    }

    async fn find_by_role(&self, role: &str) -> Result<Vec<User>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE role = $1 ORDER BY user_id");
        let users = sqlx::query_as::<_, User>(&sql)
            .bind(role)
            .fetch_all(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to list users with role {role}: {err:?}");
                RepositoryError::from(err)
            })?;

        info!("✅ Found {} users with role {role}", users.len());
        Ok(users)
    }

    async fn create_user(
        &self,
        req: &RegisterRequest,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            "INSERT INTO users (full_name, email, phone, role, password_hash) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(&req.full_name)
            .bind(&req.email)
            .bind(&req.phone)
            .bind(req.role.to_lowercase())
            .bind(password_hash)
            .fetch_one(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to create user {}: {err:?}", req.email);
                RepositoryError::from(err)
            })?;

        info!("✅ Created user ID {} ({})", user.user_id, user.email);
        Ok(user)
    }
}
