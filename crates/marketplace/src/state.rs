use crate::di::{DependenciesInject, Repositories};
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::{DynHashing, DynJwtService},
    config::{Config, ConnectionManager, ConnectionPool, Hashing, JwtConfig},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub jwt_config: DynJwtService,
    pub di_container: DependenciesInject,
    pub registry: Arc<Mutex<Registry>>,
    pub cors_origin: String,
}

impl AppState {
    pub async fn new(config: &Config) -> Result<Self> {
        let pool = ConnectionManager::new_pool(&config.database_url, config.db_max_conn)
            .await
            .context("Failed to connect to Postgres")?;

        if config.run_migrations {
            run_migrations(&pool)
                .await
                .context("Failed to run database migrations")?;
            info!("📦 Database migrations applied");
        }

        let hashing = Arc::new(Hashing::new()) as DynHashing;

        Ok(Self::with_repositories(
            Repositories::postgres(pool),
            hashing,
            &config.jwt_secret,
            &config.cors_origin,
        )
        .await)
    }

    pub async fn with_repositories(
        repos: Repositories,
        hashing: DynHashing,
        jwt_secret: &str,
        cors_origin: &str,
    ) -> Self {
        let jwt_config = Arc::new(JwtConfig::new(jwt_secret)) as DynJwtService;
        let registry = Arc::new(Mutex::new(Registry::default()));

        let di_container =
            DependenciesInject::new(repos, hashing, jwt_config.clone(), registry.clone()).await;

        Self {
            jwt_config,
            di_container,
            registry,
            cors_origin: cors_origin.to_string(),
        }
    }
}

pub async fn run_migrations(pool: &ConnectionPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
