//! Error response DTOs.

use serde::Serialize;
use utoipa::ToSchema;

/// Standard error response format.
///
/// Carries a stable machine-readable code, a human-readable message, and
/// optional structured details. Internal error sources are never included.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    /// Creates a new error response with code and message.
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
            request_id: None,
        }
    }

    /// Adds structured details to the error response.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Adds a request ID to the error response for correlation.
    pub fn with_request_id(mut self, request_id: &str) -> Self {
        self.request_id = Some(request_id.to_string());
        self
    }

    /// Not-found response naming the entity and the missed lookup.
    pub fn not_found_error(entity: &str, field: &str, value: &str) -> Self {
        Self::new(
            "NOT_FOUND",
            &format!("{} with {}={} was not found", entity, field, value),
        )
    }

    /// Duplicate-entry response for unique constraint violations.
    pub fn duplicate_error(entity: &str, field: &str, value: &str) -> Self {
        Self::new(
            "DUPLICATE_ENTRY",
            &format!("{} with {}='{}' already exists", entity, field, value),
        )
    }

    /// Single-field validation failure response.
    pub fn validation_error(field: &str, reason: &str) -> Self {
        Self::new("VALIDATION_ERROR", &format!("{}: {}", field, reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_details_omitted_when_absent() {
        let body = serde_json::to_value(ErrorResponse::new("NOT_FOUND", "gone")).unwrap();
        assert!(body.get("details").is_none());
        assert!(body.get("request_id").is_none());
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[test]
    fn test_with_request_id() {
        let response = ErrorResponse::new("BAD_REQUEST", "nope").with_request_id("req-1");
        let body = serde_json::to_value(response).unwrap();
        assert_eq!(body["request_id"], "req-1");
    }
}
