//! usercrud-server: users CRUD over HTTP
//!
//! Connects to MySQL, makes sure the `users` table exists and serves
//! five JSON endpoints under `/api/users` behind a CORS policy.

pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod models;

pub use config::{CorsConfig, DatabaseConfig};
pub use error::{ServerError, ServerResult};
pub use http::{run_server, ServerConfig};

/// Connect to the database, then run the HTTP server until shutdown.
///
/// Any failure before the listener is accepting connections is returned
/// to the caller, which is expected to treat it as fatal.
pub async fn serve(db: &DatabaseConfig, config: ServerConfig) -> ServerResult<()> {
    let pool = db::init(db).await?;
    run_server(pool, config).await
}
