//! Database connection pool management
//!
//! Uses sqlx MySqlPool with explicit connection limits.

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use sqlx::Connection;

use super::schema;
use crate::config::DatabaseConfig;
use crate::error::{ServerError, ServerResult};

/// Create a MySQL connection pool and verify it with a ping.
///
/// # Errors
///
/// Returns `ServerError::Connect` if no connection can be opened and
/// `ServerError::Ping` if the liveness check fails.
pub async fn connect(config: &DatabaseConfig) -> ServerResult<MySqlPool> {
    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(config.connect_options())
        .await
        .map_err(ServerError::Connect)?;

    let mut conn = pool.acquire().await.map_err(ServerError::Ping)?;
    conn.ping().await.map_err(ServerError::Ping)?;

    tracing::info!(
        host = %config.host,
        port = config.port,
        database = %config.name,
        "Connected to MySQL database"
    );
    Ok(pool)
}

/// Connect and make sure the `users` table exists.
pub async fn init(config: &DatabaseConfig) -> ServerResult<MySqlPool> {
    let pool = connect(config).await?;
    schema::ensure_users_table(&pool)
        .await
        .map_err(ServerError::Schema)?;
    Ok(pool)
}
