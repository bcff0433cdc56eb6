//! Helpers for tests that talk to a live MySQL instance

use crate::config::DatabaseConfig;

/// Database settings from `DB_*` variables, falling back to defaults.
pub(crate) fn config_from_env() -> DatabaseConfig {
    let defaults = DatabaseConfig::default();
    DatabaseConfig {
        host: std::env::var("DB_HOST").unwrap_or(defaults.host),
        port: std::env::var("DB_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port),
        user: std::env::var("DB_USER").unwrap_or(defaults.user),
        password: std::env::var("DB_PASSWORD").unwrap_or(defaults.password),
        name: std::env::var("DB_NAME").unwrap_or(defaults.name),
        max_connections: defaults.max_connections,
    }
}

/// An email address no other test run has used.
pub(crate) fn unique_email(tag: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{}-{}@example.com", tag, nanos)
}
