//! User repository
//!
//! One statement per operation, no check-then-insert:
//! - create/update rely on the UNIQUE email index and map violations to conflicts
//! - get/delete report a missing row as not found

use async_trait::async_trait;
use sqlx::mysql::MySqlQueryResult;
use sqlx::{Connection, MySqlPool};

use crate::models::{User, UserInput};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("conflict: {field} '{value}' is already in use")]
    Conflict { field: &'static str, value: String },
}

impl DbError {
    pub fn user_not_found(id: i64) -> Self {
        Self::NotFound {
            resource: "user",
            id: id.to_string(),
        }
    }

    pub fn email_taken(email: &str) -> Self {
        Self::Conflict {
            field: "email",
            value: email.to_owned(),
        }
    }

    /// Classify a failed write: unique-key violations become conflicts.
    fn from_write(err: sqlx::Error, email: &str) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => Self::email_taken(email),
            _ => Self::Sqlx(err),
        }
    }
}

/// Storage operations for users (testable)
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All users in storage order. Empty is not an error.
    async fn list(&self) -> Result<Vec<User>, DbError>;

    /// Insert a user; the store assigns the id.
    async fn create(&self, input: UserInput) -> Result<User, DbError>;

    async fn get(&self, id: i64) -> Result<User, DbError>;

    /// Overwrite name and email of an existing user.
    async fn update(&self, id: i64, input: UserInput) -> Result<User, DbError>;

    async fn delete(&self, id: i64) -> Result<(), DbError>;

    /// Liveness check against the backing storage.
    async fn ping(&self) -> Result<(), DbError>;
}

/// MySQL-backed user store
#[derive(Clone)]
pub struct MySqlUserStore {
    pool: MySqlPool,
}

impl MySqlUserStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, id: i64) -> Result<bool, DbError> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }
}

fn inserted_id(result: &MySqlQueryResult) -> Result<i64, DbError> {
    i64::try_from(result.last_insert_id())
        .map_err(|e| DbError::Sqlx(sqlx::Error::Decode(Box::new(e))))
}

#[async_trait]
impl UserStore for MySqlUserStore {
    async fn list(&self) -> Result<Vec<User>, DbError> {
        let users = sqlx::query_as::<_, User>("SELECT id, name, email FROM users")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn create(&self, input: UserInput) -> Result<User, DbError> {
        let result = sqlx::query("INSERT INTO users (name, email) VALUES (?, ?)")
            .bind(&input.name)
            .bind(&input.email)
            .execute(&self.pool)
            .await
            .map_err(|e| DbError::from_write(e, &input.email))?;

        let id = inserted_id(&result)?;
        tracing::debug!(id, "user created");
        Ok(User::from_input(id, input))
    }

    async fn get(&self, id: i64) -> Result<User, DbError> {
        sqlx::query_as::<_, User>("SELECT id, name, email FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::user_not_found(id))
    }

    async fn update(&self, id: i64, input: UserInput) -> Result<User, DbError> {
        let result = sqlx::query("UPDATE users SET name = ?, email = ? WHERE id = ?")
            .bind(&input.name)
            .bind(&input.email)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DbError::from_write(e, &input.email))?;

        // MySQL counts changed rows, so rewriting identical values affects zero
        if result.rows_affected() == 0 && !self.exists(id).await? {
            return Err(DbError::user_not_found(id));
        }

        tracing::debug!(id, "user updated");
        Ok(User::from_input(id, input))
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::user_not_found(id));
        }

        tracing::debug!(id, "user deleted");
        Ok(())
    }

    async fn ping(&self) -> Result<(), DbError> {
        let mut conn = self.pool.acquire().await?;
        conn.ping().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{config_from_env, unique_email};

    // Integration tests - run against a real MySQL
    // cargo test -p usercrud-server -- --ignored

    async fn store() -> MySqlUserStore {
        let pool = crate::db::init(&config_from_env())
            .await
            .expect("database init failed");
        MySqlUserStore::new(pool)
    }

    fn input(name: &str, email: &str) -> UserInput {
        UserInput {
            name: name.into(),
            email: email.into(),
        }
    }

    #[test]
    fn not_found_message() {
        assert_eq!(DbError::user_not_found(42).to_string(), "not found: user '42'");
    }

    #[test]
    fn non_database_write_error_stays_sqlx() {
        let err = DbError::from_write(sqlx::Error::RowNotFound, "a@example.com");
        assert!(matches!(err, DbError::Sqlx(_)));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn ping_live_database() {
        store().await.ping().await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_then_get() {
        let store = store().await;
        let email = unique_email("create");
        let created = store.create(input("Ada", &email)).await.unwrap();

        let fetched = store.get(created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.email, email);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn duplicate_email_conflicts() {
        let store = store().await;
        let email = unique_email("dup");
        let first = store.create(input("First", &email)).await.unwrap();

        let err = store.create(input("Second", &email)).await.unwrap_err();
        assert!(matches!(err, DbError::Conflict { field: "email", .. }));
        assert_eq!(store.get(first.id).await.unwrap().name, "First");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_with_same_values_succeeds() {
        let store = store().await;
        let email = unique_email("same");
        let user = store.create(input("Same", &email)).await.unwrap();

        let updated = store.update(user.id, input("Same", &email)).await.unwrap();
        assert_eq!(updated, user);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn delete_then_get_is_not_found() {
        let store = store().await;
        let user = store
            .create(input("Gone", &unique_email("gone")))
            .await
            .unwrap();

        store.delete(user.id).await.unwrap();
        assert!(matches!(
            store.get(user.id).await.unwrap_err(),
            DbError::NotFound { .. }
        ));
        assert!(matches!(
            store.delete(user.id).await.unwrap_err(),
            DbError::NotFound { .. }
        ));
    }
}
