//! Health check endpoint handlers.
//!
//! Provides liveness and readiness probes for monitoring and load
//! balancers. The readiness check exercises the database pool with a
//! trivial query.

use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use diesel_async::RunQueryDsl;
use serde::Serialize;
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::HEALTH_TAG;
use crate::state::AppState;

/// Health check response structure.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub database: ComponentHealth,
}

/// Health status enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Individual component health information.
#[derive(Debug, Serialize, ToSchema)]
pub struct ComponentHealth {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub response_time_ms: u64,
}

/// Creates health check routes.
pub fn health_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(health_check))
        .routes(routes!(readiness_check))
        .routes(routes!(liveness_check))
}

/// GET /health - Health check including database connectivity
#[utoipa::path(
    get,
    path = "/health",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse)
    )
)]
async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let database = check_database(&state).await;
    let status = database.status;

    let response = HealthResponse {
        status,
        version: crate::pkg_version().to_string(),
        database,
    };

    match status {
        HealthStatus::Healthy => Ok(Json(response)),
        HealthStatus::Unhealthy => Err((StatusCode::SERVICE_UNAVAILABLE, Json(response))),
    }
}

/// GET /health/ready - Readiness probe
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service is ready"),
        (status = 503, description = "Service is not ready")
    )
)]
async fn readiness_check(State(state): State<AppState>) -> StatusCode {
    match check_database(&state).await.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// GET /health/live - Liveness probe
#[utoipa::path(
    get,
    path = "/health/live",
    tag = HEALTH_TAG,
    responses((status = 200, description = "Service is alive"))
)]
async fn liveness_check() -> StatusCode {
    StatusCode::OK
}

async fn check_database(state: &AppState) -> ComponentHealth {
    let start = Instant::now();
    let result = async {
        let mut conn = state.db_pool.get().await?;
        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map_err(crate::error::AppError::from)?;
        Ok::<_, crate::error::AppError>(())
    }
    .await;
    let response_time_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(()) => ComponentHealth {
            status: HealthStatus::Healthy,
            message: None,
            response_time_ms,
        },
        Err(e) => ComponentHealth {
            status: HealthStatus::Unhealthy,
            message: Some(e.to_string()),
            response_time_ms,
        },
    }
}
