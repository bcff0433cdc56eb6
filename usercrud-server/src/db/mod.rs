//! Database layer - connection pool, schema and repositories
//!
//! - One pool per process, created at startup and shared by handlers
//! - Every repository operation is a single parameterized statement
//! - Uniqueness is left to the database; violations surface as conflicts

pub mod pool;
pub mod repos;
pub mod schema;

pub use pool::{connect, init};
pub use repos::*;

#[cfg(test)]
pub(crate) mod test_support;
