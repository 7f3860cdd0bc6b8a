//! Error handler for converting AppError to HTTP responses.
//!
//! Client-fixable errors carry their messages in an `ApiErrors` body.
//! Server-side failures are logged here and answered with a generic message
//! so internal details never reach the client.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::dto::ApiErrors;
use crate::error::AppError;

const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred";
const UNAVAILABLE_MESSAGE: &str = "Database connection unavailable";

impl IntoResponse for AppError {
    /// Converts an AppError into an HTTP response.
    ///
    /// # Status Code Mapping
    /// - NotFound → 404 NOT_FOUND, empty body
    /// - Validation → 400 BAD_REQUEST, one message per field
    /// - DuplicateEmail → 400 BAD_REQUEST, one message
    /// - BadRequest → 400 BAD_REQUEST
    /// - ConnectionPool → 503 SERVICE_UNAVAILABLE
    /// - InvalidArgument, Database, Configuration, Internal → 500
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);

        let body = match &self {
            AppError::NotFound { .. } => return status.into_response(),
            AppError::Validation { errors } => ApiErrors::from_field_errors(errors),
            AppError::DuplicateEmail => ApiErrors::single(self.to_string()),
            AppError::BadRequest { message } => ApiErrors::single(message.clone()),
            AppError::ConnectionPool { source } => {
                tracing::error!(error = %source, "Storage connection unavailable");
                ApiErrors::single(UNAVAILABLE_MESSAGE)
            }
            AppError::InvalidArgument { .. }
            | AppError::Database { .. }
            | AppError::Configuration { .. }
            | AppError::Internal { .. } => {
                tracing::error!(error = ?self, "Request failed with internal error");
                ApiErrors::single(INTERNAL_ERROR_MESSAGE)
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Maps an AppError variant to its corresponding HTTP status code.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Validation { .. }
        | AppError::DuplicateEmail
        | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
        AppError::InvalidArgument { .. }
        | AppError::Database { .. }
        | AppError::Configuration { .. }
        | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
