//! Error handler for converting AppError to HTTP responses.
//!
//! Implements `IntoResponse` for `AppError` so handlers can return
//! `AppResult` directly. Status code mapping:
//!
//! - NotFound → 404
//! - Duplicate, Conflict → 409
//! - Validation, ValidationErrors, BadRequest → 400
//! - CredentialsNotFound, Unauthorized → 401
//! - Database, Configuration, Internal → 500
//! - ConnectionPool → 503
//!
//! Server faults are logged with their source chain; the response body
//! never carries internal details.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match &self {
            AppError::NotFound {
                entity,
                field,
                value,
            } => (
                StatusCode::NOT_FOUND,
                ErrorResponse::not_found_error(entity, field, value),
            ),
            AppError::Duplicate {
                entity,
                field,
                value,
            } => (
                StatusCode::CONFLICT,
                ErrorResponse::duplicate_error(entity, field, value),
            ),
            AppError::Conflict { entity, id } => (
                StatusCode::CONFLICT,
                ErrorResponse::new(
                    "DATA_INTEGRITY_VIOLATION",
                    &format!(
                        "Cannot delete {} with id={}: it is referenced by other resources",
                        entity, id
                    ),
                ),
            ),
            AppError::Validation { field, reason } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::validation_error(field, reason),
            ),
            AppError::ValidationErrors { errors } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("VALIDATION_FAILED", "Request validation failed")
                    .with_details(json!({ "field_errors": errors })),
            ),
            AppError::CredentialsNotFound { email } => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new(
                    "CREDENTIALS_NOT_FOUND",
                    &format!("No credentials found for email '{}'", email),
                ),
            ),
            AppError::Unauthorized { message } => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new("UNAUTHORIZED", message),
            ),
            AppError::BadRequest { message } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("BAD_REQUEST", message),
            ),
            AppError::Database { operation, source } => {
                tracing::error!(operation = %operation, error = ?source, "database fault");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "DATABASE_ERROR",
                        &format!("Database operation failed: {}", operation),
                    ),
                )
            }
            AppError::Configuration { key, source } => {
                tracing::error!(key = %key, error = ?source, "configuration fault");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "CONFIGURATION_ERROR",
                        &format!("Configuration error: {}", key),
                    ),
                )
            }
            AppError::ConnectionPool { source } => {
                tracing::error!(error = ?source, "connection pool fault");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorResponse::new("SERVICE_UNAVAILABLE", "Database connection unavailable"),
                )
            }
            AppError::Internal { source } => {
                tracing::error!(error = ?source, "internal fault");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred"),
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Maps an AppError variant to its corresponding HTTP status code.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Duplicate { .. } => StatusCode::CONFLICT,
        AppError::Conflict { .. } => StatusCode::CONFLICT,
        AppError::Validation { .. } => StatusCode::BAD_REQUEST,
        AppError::ValidationErrors { .. } => StatusCode::BAD_REQUEST,
        AppError::CredentialsNotFound { .. } => StatusCode::UNAUTHORIZED,
        AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
        AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
        AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let error = AppError::not_found("product", 1000);
        assert_eq!(error_to_status_code(&error), StatusCode::NOT_FOUND);
        assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_conflict_maps_to_409_not_404() {
        let error = AppError::Conflict {
            entity: "product".to_string(),
            id: "3".to_string(),
        };
        assert_eq!(error_to_status_code(&error), StatusCode::CONFLICT);
        assert_eq!(error.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_duplicate_maps_to_409() {
        let error = AppError::Duplicate {
            entity: "users".to_string(),
            field: "email".to_string(),
            value: "maria@gmail.com".to_string(),
        };
        assert_eq!(error_to_status_code(&error), StatusCode::CONFLICT);
    }

    #[test]
    fn test_validation_errors_map_to_400() {
        let error = AppError::ValidationErrors { errors: vec![] };
        assert_eq!(error_to_status_code(&error), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_credentials_not_found_maps_to_401() {
        let error = AppError::CredentialsNotFound {
            email: "ghost@example.com".to_string(),
        };
        assert_eq!(error_to_status_code(&error), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_internal_maps_to_500() {
        let error = AppError::Internal {
            source: anyhow::anyhow!("boom"),
        };
        assert_eq!(
            error_to_status_code(&error),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
