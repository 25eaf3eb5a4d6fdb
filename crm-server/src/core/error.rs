use thiserror::Error;

use crate::utils::AppError;

/// Failures that stop the server itself; request errors are [`AppError`]s
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        source: std::io::Error,
    },

    #[error("Initialization failed: {0}")]
    Init(#[from] AppError),

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Result alias for server lifecycle operations
pub type Result<T> = std::result::Result<T, ServerError>;
