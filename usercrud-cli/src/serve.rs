//! Server arguments and startup
//!
//! Every setting can come from a flag or its environment variable.

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Args;

use usercrud_server::config::{
    DEFAULT_ALLOWED_ORIGINS, DEFAULT_DB_HOST, DEFAULT_DB_NAME, DEFAULT_DB_PASSWORD,
    DEFAULT_DB_PORT, DEFAULT_DB_USER, DEFAULT_HOST, DEFAULT_MAX_CONNECTIONS, DEFAULT_PORT,
};
use usercrud_server::{CorsConfig, DatabaseConfig, ServerConfig};

/// Arguments for running the server
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Database host
    #[arg(
        long,
        env = "DB_HOST",
        default_value = DEFAULT_DB_HOST,
        value_parser = or_default(DEFAULT_DB_HOST.to_string())
    )]
    pub db_host: String,

    /// Database port
    #[arg(
        long,
        env = "DB_PORT",
        default_value_t = DEFAULT_DB_PORT,
        value_parser = or_default(DEFAULT_DB_PORT)
    )]
    pub db_port: u16,

    /// Database user
    #[arg(
        long,
        env = "DB_USER",
        default_value = DEFAULT_DB_USER,
        value_parser = or_default(DEFAULT_DB_USER.to_string())
    )]
    pub db_user: String,

    /// Database password
    #[arg(
        long,
        env = "DB_PASSWORD",
        default_value = DEFAULT_DB_PASSWORD,
        value_parser = or_default(DEFAULT_DB_PASSWORD.to_string()),
        hide_env_values = true,
        hide_default_value = true
    )]
    pub db_password: String,

    /// Database name
    #[arg(
        long,
        env = "DB_NAME",
        default_value = DEFAULT_DB_NAME,
        value_parser = or_default(DEFAULT_DB_NAME.to_string())
    )]
    pub db_name: String,

    /// Maximum pooled database connections
    #[arg(
        long,
        env = "DB_MAX_CONNECTIONS",
        default_value_t = DEFAULT_MAX_CONNECTIONS,
        value_parser = or_default(DEFAULT_MAX_CONNECTIONS)
    )]
    pub db_max_connections: u32,

    /// Address to listen on
    #[arg(
        long,
        env = "BIND_HOST",
        default_value = DEFAULT_HOST,
        value_parser = or_default(IpAddr::from([0, 0, 0, 0]))
    )]
    pub host: IpAddr,

    /// HTTP port
    #[arg(
        long,
        short = 'p',
        env = "PORT",
        default_value_t = DEFAULT_PORT,
        value_parser = or_default(DEFAULT_PORT)
    )]
    pub port: u16,

    /// Allowed CORS origin; `*` matches any run of characters (repeatable)
    #[arg(
        long = "cors-origin",
        env = "CORS_ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_values_t = DEFAULT_ALLOWED_ORIGINS.map(String::from)
    )]
    pub cors_origins: Vec<String>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,
}

/// Parse a setting, treating an empty value (e.g. `PORT=`) as unset.
fn or_default<T>(default: T) -> impl Fn(&str) -> Result<T, String> + Clone + Send + Sync + 'static
where
    T: FromStr + Clone + Send + Sync + 'static,
    T::Err: fmt::Display,
{
    move |raw: &str| {
        if raw.trim().is_empty() {
            Ok(default.clone())
        } else {
            raw.parse::<T>().map_err(|e| e.to_string())
        }
    }
}

impl ServeArgs {
    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            host: self.db_host.clone(),
            port: self.db_port,
            user: self.db_user.clone(),
            password: self.db_password.clone(),
            name: self.db_name.clone(),
            max_connections: self.db_max_connections,
        }
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: SocketAddr::new(self.host, self.port),
            cors: CorsConfig {
                allowed_origins: self.cors_origins.clone(),
                permissive: self.cors_permissive,
            },
        }
    }
}

/// Run the HTTP server until shutdown
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let db = args.database_config();
    tracing::debug!(?db, "database configuration");

    usercrud_server::serve(&db, args.server_config())
        .await
        .context("Server error")?;

    Ok(())
}
