use std::{str::FromStr, sync::Arc};

use anyhow::Context;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let pool = SqlitePoolOptions::new().max_connections(10);
        let db = connect(&config.database_url, pool).await?;
        Ok(Self { db, config })
    }

    /// Fresh in-memory database with migrations applied.
    ///
    /// Each SQLite in-memory connection is its own database, so the pool is
    /// pinned to a single connection.
    pub async fn in_memory() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::for_tests());
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
        let db = connect(&config.database_url, pool).await?;
        migrate(&db).await?;
        Ok(Self { db, config })
    }
}

pub async fn connect(database_url: &str, pool: SqlitePoolOptions) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("parse database url {}", database_url))?
        .foreign_keys(true);
    pool.connect_with(options)
        .await
        .context("connect to database")
}

pub async fn migrate(db: &SqlitePool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations")
        .run(db)
        .await
        .context("run migrations")
}
