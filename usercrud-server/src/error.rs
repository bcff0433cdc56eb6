//! Startup and server lifecycle errors

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

pub type ServerResult<T> = Result<T, ServerError>;

/// Fatal errors raised while bringing the server up or running it
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("error connecting to database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("error pinging database: {0}")]
    Ping(#[source] sqlx::Error),

    #[error("error creating users table: {0}")]
    Schema(#[source] sqlx::Error),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
