//! Domain models shared by the repository and HTTP layers

pub mod user;

pub use user::{User, UserInput};
