//! Validated request extractors.
//!
//! Wrappers around axum's `Json` and `Query` extractors that run the
//! payload's `validator` rules before a handler ever sees it. A rule
//! failure produces the structured per-field error list; a malformed
//! payload produces a plain bad-request error.

use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// JSON request body, deserialized and validated.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest {
                message: rejection.body_text(),
            })?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Query string, deserialized and validated.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> AppResult<Self> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest {
                message: rejection.body_text(),
            })?;
        value.validate()?;
        Ok(ValidatedQuery(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, header};
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Debug, Deserialize, Validate)]
    struct TestPayload {
        #[validate(length(min = 1, message = "Name must not be blank"))]
        name: String,
        #[validate(email(message = "Invalid email format"))]
        email: String,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method(Method::POST)
            .uri("/test")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_json_payload() {
        let request = json_request(r#"{"name":"Books","email":"test@example.com"}"#);

        let result = ValidatedJson::<TestPayload>::from_request(request, &()).await;

        assert!(result.is_ok());
        let ValidatedJson(payload) = result.unwrap();
        assert_eq!(payload.name, "Books");
        assert_eq!(payload.email, "test@example.com");
    }

    #[tokio::test]
    async fn test_validation_errors_are_structured() {
        let request = json_request(r#"{"name":"","email":"not-an-email"}"#);

        let result = ValidatedJson::<TestPayload>::from_request(request, &()).await;

        let error = result.unwrap_err();
        match error {
            AppError::ValidationErrors { errors } => {
                assert_eq!(errors.len(), 2);
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert!(fields.contains(&"name"));
                assert!(fields.contains(&"email"));
            }
            _ => panic!("Expected ValidationErrors, got {:?}", error),
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let request = json_request(r#"{"name":"#);

        let result = ValidatedJson::<TestPayload>::from_request(request, &()).await;

        let error = result.unwrap_err();
        match error {
            AppError::BadRequest { message } => assert!(!message.is_empty()),
            _ => panic!("Expected BadRequest, got {:?}", error),
        }
    }

    #[derive(Debug, Deserialize, Validate)]
    struct TestQuery {
        #[validate(range(min = 1, message = "Size must be positive"))]
        size: i64,
    }

    #[tokio::test]
    async fn test_query_validation() {
        let request = Request::builder()
            .method(Method::GET)
            .uri("/test?size=0")
            .body(Body::empty())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let result = ValidatedQuery::<TestQuery>::from_request_parts(&mut parts, &()).await;

        let error = result.unwrap_err();
        match error {
            AppError::ValidationErrors { errors } => {
                assert_eq!(errors[0].field, "size");
            }
            _ => panic!("Expected ValidationErrors, got {:?}", error),
        }
    }
}
