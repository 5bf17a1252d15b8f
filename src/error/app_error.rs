use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::error::DatabaseErrorConverter;

/// A single failed validation rule on one request field.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ValidationFieldError {
    pub field: String,
    pub message: String,
}

/// Application-wide error type that represents all possible errors in the system.
///
/// The repository layer translates database failures into these variants at
/// the point where the operation's intent is known; everything else carries
/// its source error for logging without ever serializing it into a response.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found error with entity, field, and value information
    #[error("Resource not found: {entity} with {field}={value}")]
    NotFound {
        entity: String,
        field: String,
        value: String,
    },

    /// Duplicate entry error for unique constraint violations
    #[error("Duplicate entry: {entity}.{field} = '{value}' already exists")]
    Duplicate {
        entity: String,
        field: String,
        value: String,
    },

    /// Deletion blocked because other rows still reference the target row
    #[error("Cannot delete {entity} with id={id}: it is referenced by other resources")]
    Conflict { entity: String, id: String },

    /// Validation error with field-specific details
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Structured list of per-field validation failures for a request payload
    #[error("Request validation failed ({} field error(s))", errors.len())]
    ValidationErrors { errors: Vec<ValidationFieldError> },

    /// Authentication lookup miss: no user with the given email
    #[error("Credentials not found for email '{email}'")]
    CredentialsNotFound { email: String },

    /// Unauthorized access error with authentication message
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Bad request error with descriptive message
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Database operation error with operation context
    #[error("Database operation failed: {operation}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Connection pool error
    #[error("Connection pool error")]
    ConnectionPool {
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Shorthand for the common id-lookup miss.
    pub fn not_found(entity: &str, id: i64) -> Self {
        AppError::NotFound {
            entity: entity.to_string(),
            field: "id".to_string(),
            value: id.to_string(),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(error: diesel::result::Error) -> Self {
        DatabaseErrorConverter::convert_diesel_error(error, "database operation")
    }
}

impl From<bb8::RunError<diesel_async::pooled_connection::PoolError>> for AppError {
    fn from(error: bb8::RunError<diesel_async::pooled_connection::PoolError>) -> Self {
        AppError::ConnectionPool {
            source: anyhow::Error::from(error),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut out = Vec::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("invalid value for {}", field));
                out.push(ValidationFieldError {
                    field: field.to_string(),
                    message,
                });
            }
        }
        AppError::ValidationErrors { errors: out }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_shorthand() {
        let error = AppError::not_found("product", 1000);
        match error {
            AppError::NotFound {
                entity,
                field,
                value,
            } => {
                assert_eq!(entity, "product");
                assert_eq!(field, "id");
                assert_eq!(value, "1000");
            }
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn test_validator_errors_conversion() {
        use validator::Validate;

        #[derive(Validate)]
        struct Probe {
            #[validate(email(message = "Invalid email format"))]
            email: String,
        }

        let probe = Probe {
            email: "not-an-email".to_string(),
        };
        let error: AppError = probe.validate().unwrap_err().into();
        match error {
            AppError::ValidationErrors { errors } => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "email");
                assert_eq!(errors[0].message, "Invalid email format");
            }
            _ => panic!("Expected ValidationErrors, got {:?}", error),
        }
    }

    #[test]
    fn test_conflict_display_names_entity_and_id() {
        let error = AppError::Conflict {
            entity: "category".to_string(),
            id: "2".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("category"));
        assert!(message.contains("id=2"));
        assert!(message.contains("referenced"));
    }
}
