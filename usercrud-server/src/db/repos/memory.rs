//! In-memory user store for testing
//!
//! Same contract as the MySQL store: ids start at 1 and are never reused,
//! and email is unique across users.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::users::{DbError, UserStore};
use crate::models::{User, UserInput};

#[derive(Default)]
pub struct MemoryUserStore {
    inner: Mutex<Rows>,
}

#[derive(Default)]
struct Rows {
    last_id: i64,
    users: BTreeMap<i64, User>,
}

impl Rows {
    fn email_taken_by_other(&self, email: &str, id: Option<i64>) -> bool {
        self.users
            .values()
            .any(|u| u.email == email && Some(u.id) != id)
    }
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn list(&self) -> Result<Vec<User>, DbError> {
        Ok(self.inner.lock().await.users.values().cloned().collect())
    }

    async fn create(&self, input: UserInput) -> Result<User, DbError> {
        let mut rows = self.inner.lock().await;
        if rows.email_taken_by_other(&input.email, None) {
            return Err(DbError::email_taken(&input.email));
        }

        rows.last_id += 1;
        let user = User::from_input(rows.last_id, input);
        rows.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get(&self, id: i64) -> Result<User, DbError> {
        self.inner
            .lock()
            .await
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| DbError::user_not_found(id))
    }

    async fn update(&self, id: i64, input: UserInput) -> Result<User, DbError> {
        let mut rows = self.inner.lock().await;
        if !rows.users.contains_key(&id) {
            return Err(DbError::user_not_found(id));
        }
        if rows.email_taken_by_other(&input.email, Some(id)) {
            return Err(DbError::email_taken(&input.email));
        }

        let user = User::from_input(id, input);
        rows.users.insert(id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        self.inner
            .lock()
            .await
            .users
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DbError::user_not_found(id))
    }

    async fn ping(&self) -> Result<(), DbError> {
        Ok(())
    }
}
