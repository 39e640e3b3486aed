use crate::config::DatabaseConfig;
use crate::error::AppResult;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use std::time::Duration;

pub type DbPool = DatabaseConnection;

/// Pooled connections to an in-memory SQLite database are never recycled.
const MEMORY_DB_CONNECTION_LIFETIME: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// An in-memory SQLite database disappears with its last connection.
pub fn is_memory_database(url: &str) -> bool {
    url.starts_with("sqlite:") && (url.contains(":memory:") || url.contains("mode=memory"))
}

pub fn connect_options(config: &DatabaseConfig) -> ConnectOptions {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .sqlx_logging(config.echo)
        .sqlx_logging_level(log::LevelFilter::Info);

    if is_memory_database(&config.url) {
        options
            .min_connections(1)
            .idle_timeout(MEMORY_DB_CONNECTION_LIFETIME)
            .max_lifetime(MEMORY_DB_CONNECTION_LIFETIME);
    }

    options
}

pub async fn create_pool(config: &DatabaseConfig) -> AppResult<DbPool> {
    let pool = Database::connect(connect_options(config)).await?;
    log::info!("Connected to database ({:?})", pool.get_database_backend());

    Ok(pool)
}

pub async fn run_migrations(pool: &DbPool) -> AppResult<()> {
    Migrator::up(pool, None).await?;
    Ok(())
}
