//! User entity

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored user. `id` is assigned by the database and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Request body for create and update
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserInput {
    pub name: String,
    pub email: String,
}

impl User {
    pub fn from_input(id: i64, input: UserInput) -> Self {
        Self {
            id,
            name: input.name,
            email: input.email,
        }
    }
}
