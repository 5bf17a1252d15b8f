//! Router configuration for the API.
//!
//! Centralized route registration and middleware configuration. Resources
//! are mounted at the root, matching the original paths (/categories,
//! /products, /users); the OpenAPI document and Swagger UI sit alongside.

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{
    SecurityPolicy, logging_middleware, request_id_middleware, security_gate,
};
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// Middleware is applied in reverse order of declaration (last added runs
/// first): the request-id middleware runs first so the logging middleware
/// and handlers can pick the id up, then the security gate.
pub fn create_router(state: AppState) -> Router {
    let policy = SecurityPolicy {
        permit_all: state.security.permit_all,
    };

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/categories", handlers::categories::category_routes())
        .nest("/products", handlers::products::product_routes())
        .nest("/users", handlers::users::user_routes())
        .merge(handlers::health::health_routes())
        .split_for_parts();

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(middleware::from_fn(move |request, next| {
            security_gate(policy, request, next)
        }))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .with_state(state)
}
