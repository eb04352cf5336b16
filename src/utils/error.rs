// Error handling utilities
// Author: Gabriel Demetrios Lafis

use thiserror::Error;

/// Application error type for start-up: configuration and logging
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for AppError
pub type AppResult<T> = Result<T, AppError>;
