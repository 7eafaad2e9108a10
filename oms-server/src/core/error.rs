use thiserror::Error;

/// Errors that stop the server from starting or serving
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] shared::error::AppError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for server startup
pub type Result<T> = std::result::Result<T, ServerError>;
