//! Table creation for the users store

use sqlx::MySqlPool;

/// Create the `users` table if it does not exist yet.
pub async fn ensure_users_table(pool: &MySqlPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INT AUTO_INCREMENT PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            email VARCHAR(255) UNIQUE NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Users table ready");
    Ok(())
}
