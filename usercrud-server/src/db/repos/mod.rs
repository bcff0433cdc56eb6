//! Repository implementations for user storage
//!
//! Handlers only see the `UserStore` trait:
//! - `MySqlUserStore` for the running server
//! - `MemoryUserStore` for tests

pub mod memory;
pub mod users;

pub use memory::MemoryUserStore;
pub use users::{DbError, MySqlUserStore, UserStore};
