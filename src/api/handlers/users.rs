//! User CRUD request handlers.

use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::Json;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::USER_TAG;
use crate::api::dto::{
    CreateUserRequest, PageQuery, PagedResponse, UpdateUserRequest, UserResponse,
};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::{ValidatedJson, ValidatedQuery};

/// Creates user-related routes.
pub fn user_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_users, create_user))
        .routes(routes!(get_user, update_user, delete_user))
}

/// GET /users - List users by page, roles included
#[utoipa::path(
    get,
    path = "/",
    tag = USER_TAG,
    params(PageQuery),
    responses(
        (status = 200, description = "One page of users", body = PagedResponse<UserResponse>),
        (status = 400, description = "Invalid paging or sort parameters")
    )
)]
async fn list_users(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<PageQuery>,
) -> AppResult<Json<PagedResponse<UserResponse>>> {
    let (items, total) = state
        .services
        .users
        .list_users(
            query.offset(),
            query.limit(),
            &query.order_by,
            query.direction.into(),
        )
        .await?;
    let data = items
        .into_iter()
        .map(|(user, roles)| UserResponse::from_parts(user, roles))
        .collect();
    Ok(Json(PagedResponse::new(data, &query, total as u64)))
}

/// GET /users/{id} - Get user by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = USER_TAG,
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<UserResponse>> {
    let (user, roles) = state.services.users.get_user(id).await?;
    Ok(Json(UserResponse::from_parts(user, roles)))
}

/// POST /users - Create a new user
///
/// The password in the request body is write-only: it is hashed before
/// persisting and never appears in any response.
#[utoipa::path(
    post,
    path = "/",
    tag = USER_TAG,
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid request body"),
        (status = 404, description = "Referenced role does not exist"),
        (status = 409, description = "Email already registered")
    )
)]
async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<impl axum::response::IntoResponse> {
    let role_ids = payload.role_ids();
    let (user, roles) = state
        .services
        .users
        .create_user(
            payload.first_name,
            payload.last_name,
            payload.email,
            payload.password,
            role_ids,
        )
        .await?;
    let dto = UserResponse::from_parts(user, roles);
    let location = format!("/users/{}", dto.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(dto),
    ))
}

/// PUT /users/{id} - Update user by id
///
/// Overwrites the profile fields and replaces the role set; the password
/// is not part of the update contract.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = USER_TAG,
    params(("id" = i64, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 404, description = "User or referenced role not found")
    )
)]
async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    let (changes, role_ids) = payload.into_user_changes();
    let (user, roles) = state
        .services
        .users
        .update_user(id, changes, role_ids)
        .await?;
    Ok(Json(UserResponse::from_parts(user, roles)))
}

/// DELETE /users/{id} - Delete user by id
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = USER_TAG,
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found"),
        (status = 409, description = "User still referenced by other rows")
    )
)]
async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.users.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
