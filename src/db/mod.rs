//! Database access layer

pub mod queries;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::error;

use crate::config::Config;
use crate::error::Result;

/// Open the shared connection pool.
pub async fn connect(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .map_err(|e| {
            error!("Failed to connect to database: {}", e);
            e
        })?;
    Ok(pool)
}
