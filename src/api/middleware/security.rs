//! Security gate middleware.
//!
//! A deployment-time policy switch, not an authorization system. The
//! shipped configuration sets `security.permit_all = true`, so every
//! request passes through unauthenticated. Flipping the flag makes the
//! gate reject all requests with 401 until a real token validator is wired
//! in front of it; the credentials lookup in the user service is the hook
//! an authentication collaborator would use.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::AppError;

/// Security policy applied to every request.
#[derive(Debug, Clone, Copy)]
pub struct SecurityPolicy {
    pub permit_all: bool,
}

pub async fn security_gate(policy: SecurityPolicy, request: Request, next: Next) -> Response {
    if !policy.permit_all {
        return AppError::Unauthorized {
            message: "Authentication is required".to_string(),
        }
        .into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Router, middleware};
    use tower::ServiceExt;

    fn gated_router(permit_all: bool) -> Router {
        let policy = SecurityPolicy { permit_all };
        Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(middleware::from_fn(move |request, next| {
                security_gate(policy, request, next)
            }))
    }

    #[tokio::test]
    async fn test_permit_all_passes_requests_through() {
        let response = gated_router(true)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_enforcing_gate_rejects_unauthenticated_requests() {
        let response = gated_router(false)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
