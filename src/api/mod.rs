// API module for exposing the sweeper via HTTP
// Author: Gabriel Demetrios Lafis

mod handlers;
mod models;
mod routes;
mod server;

pub use handlers::*;
pub use models::*;
pub use routes::*;
pub use server::*;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

use crate::data::DataError;
use crate::processing::ProcessingError;
use crate::storage::StorageError;

/// Represents an error in the API module
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Processing(#[from] ProcessingError),

    #[error(transparent)]
    Storage(StorageError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Upload of at least {size} bytes exceeds the limit of {limit} bytes")]
    PayloadTooLarge { size: usize, limit: usize },
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(_) => ApiError::NotFound(err.to_string()),
            other => ApiError::Storage(other),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: String,
}

impl ApiError {
    /// Short machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Data(err) => data_error_kind(err),
            ApiError::Processing(ProcessingError::Data(err)) => data_error_kind(err),
            ApiError::Processing(ProcessingError::InvalidArgument(_)) => "invalid_argument",
            ApiError::Processing(ProcessingError::Render(_)) => "render",
            ApiError::Storage(_) => "storage",
            ApiError::Validation(_) => "validation",
            ApiError::NotFound(_) => "not_found",
            ApiError::PayloadTooLarge { .. } => "payload_too_large",
        }
    }
}

fn data_error_kind(err: &DataError) -> &'static str {
    match err {
        DataError::UnsupportedFormat(_) => "unsupported_format",
        DataError::ParseFailure(_) => "parse_failure",
        DataError::SchemaMismatch { .. } => "schema_mismatch",
        DataError::Io(_) => "io",
        DataError::Export(_) => "export",
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.kind() {
            "unsupported_format" => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "parse_failure" => StatusCode::UNPROCESSABLE_ENTITY,
            "validation" | "invalid_argument" => StatusCode::BAD_REQUEST,
            "not_found" => StatusCode::NOT_FOUND,
            "payload_too_large" => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::warn!("{}", self);
        }

        HttpResponse::build(status).json(ErrorResponse {
            error: self.kind(),
            message: self.to_string(),
        })
    }
}
