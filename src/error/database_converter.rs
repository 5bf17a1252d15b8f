use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::error::{AppError, ConstraintParser};

/// Translates Diesel errors into `AppError` variants.
///
/// This is the generic translation used by the blanket `From` impl; call
/// sites that know the operation's intent (delete blocked by references,
/// update of a missing row) do their own, more specific translation before
/// this one runs.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error, tagging it with the failing operation.
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info, operation)
            }
            DieselError::NotFound => AppError::NotFound {
                entity: "resource".to_string(),
                field: "id".to_string(),
                value: "unknown".to_string(),
            },
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: Box<dyn diesel::result::DatabaseErrorInformation + Send + Sync>,
        operation: &str,
    ) -> AppError {
        let message = info.message();
        let constraint_name = info.constraint_name();

        match kind {
            DatabaseErrorKind::UniqueViolation => {
                if let Some((entity, field, value)) =
                    ConstraintParser::parse_unique_violation(message, constraint_name)
                {
                    AppError::Duplicate {
                        entity,
                        field,
                        value,
                    }
                } else {
                    AppError::Database {
                        operation: operation.to_string(),
                        source: anyhow::Error::msg(format!(
                            "Unique constraint violation: {}",
                            message
                        )),
                    }
                }
            }
            DatabaseErrorKind::NotNullViolation => {
                if let Some((entity, field)) =
                    ConstraintParser::parse_not_null_violation(message, constraint_name)
                {
                    AppError::Validation {
                        field,
                        reason: format!("Field is required for {}", entity),
                    }
                } else {
                    AppError::Database {
                        operation: operation.to_string(),
                        source: anyhow::Error::msg(format!(
                            "Not null constraint violation: {}",
                            message
                        )),
                    }
                }
            }
            DatabaseErrorKind::ForeignKeyViolation => {
                if let Some((_, field, referenced_value)) =
                    ConstraintParser::parse_foreign_key_violation(message, constraint_name)
                {
                    AppError::Validation {
                        field,
                        reason: format!("Invalid reference: value '{}' not found", referenced_value),
                    }
                } else {
                    AppError::Database {
                        operation: operation.to_string(),
                        source: anyhow::Error::msg(format!(
                            "Foreign key constraint violation: {}",
                            message
                        )),
                    }
                }
            }
            _ => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::msg(format!("Database error: {}", message)),
            },
        }
    }

    /// Returns true when the error is a foreign key violation.
    ///
    /// Delete operations use this to report `Conflict` instead of the
    /// generic translation.
    pub fn is_foreign_key_violation(error: &DieselError) -> bool {
        matches!(
            error,
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockDatabaseErrorInfo {
        message: String,
        constraint_name: Option<String>,
    }

    impl diesel::result::DatabaseErrorInformation for MockDatabaseErrorInfo {
        fn message(&self) -> &str {
            &self.message
        }

        fn details(&self) -> Option<&str> {
            None
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            None
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            self.constraint_name.as_deref()
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind, message: &str, constraint: Option<&str>) -> DieselError {
        DieselError::DatabaseError(
            kind,
            Box::new(MockDatabaseErrorInfo {
                message: message.to_string(),
                constraint_name: constraint.map(String::from),
            }),
        )
    }

    #[test]
    fn test_convert_not_found_error() {
        let result = DatabaseErrorConverter::convert_diesel_error(DieselError::NotFound, "find user");
        match result {
            AppError::NotFound { entity, field, .. } => {
                assert_eq!(entity, "resource");
                assert_eq!(field, "id");
            }
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn test_convert_unique_violation() {
        let error = database_error(
            DatabaseErrorKind::UniqueViolation,
            "duplicate key value violates unique constraint \"users_email_key\"\nDETAIL: Key (email)=(maria@example.com) already exists.",
            Some("users_email_key"),
        );

        let result = DatabaseErrorConverter::convert_diesel_error(error, "insert user");
        match result {
            AppError::Duplicate {
                entity,
                field,
                value,
            } => {
                assert_eq!(entity, "users");
                assert_eq!(field, "email");
                assert_eq!(value, "maria@example.com");
            }
            _ => panic!("Expected Duplicate error, got: {:?}", result),
        }
    }

    #[test]
    fn test_convert_not_null_violation() {
        let error = database_error(
            DatabaseErrorKind::NotNullViolation,
            "null value in column \"name\" violates not-null constraint",
            None,
        );

        let result = DatabaseErrorConverter::convert_diesel_error(error, "insert category");
        match result {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "name");
                assert!(reason.contains("required"));
            }
            _ => panic!("Expected Validation error, got: {:?}", result),
        }
    }

    #[test]
    fn test_convert_foreign_key_violation() {
        let error = database_error(
            DatabaseErrorKind::ForeignKeyViolation,
            "insert or update on table \"product_categories\" violates foreign key constraint \"product_categories_category_id_fkey\"\nDETAIL: Key (category_id)=(99) is not present in table \"categories\".",
            Some("product_categories_category_id_fkey"),
        );

        let result = DatabaseErrorConverter::convert_diesel_error(error, "attach categories");
        match result {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "category_id");
                assert!(reason.contains("99"));
            }
            _ => panic!("Expected Validation error, got: {:?}", result),
        }
    }

    #[test]
    fn test_is_foreign_key_violation() {
        let fk_error = database_error(
            DatabaseErrorKind::ForeignKeyViolation,
            "update or delete on table \"categories\" violates foreign key constraint \"product_categories_category_id_fkey\" on table \"product_categories\"",
            Some("product_categories_category_id_fkey"),
        );
        assert!(DatabaseErrorConverter::is_foreign_key_violation(&fk_error));
        assert!(!DatabaseErrorConverter::is_foreign_key_violation(
            &DieselError::NotFound
        ));
    }
}
