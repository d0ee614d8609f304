use thiserror::Error;

use crate::auth::JwtError;
use crate::utils::AppError;

/// Startup and serve failures
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JWT configuration error: {0}")]
    Jwt(#[from] JwtError),

    #[error("Failed to prepare work directory: {0}")]
    WorkDir(#[source] std::io::Error),

    #[error("Database initialization failed: {0}")]
    Database(AppError),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
