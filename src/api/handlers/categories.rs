//! Category CRUD request handlers.

use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::Json;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::CATEGORY_TAG;
use crate::api::dto::{
    CategoryResponse, CreateCategoryRequest, PageQuery, PagedResponse, UpdateCategoryRequest,
};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::{ValidatedJson, ValidatedQuery};

/// Creates category-related routes.
pub fn category_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_categories, create_category))
        .routes(routes!(get_category, update_category, delete_category))
}

/// GET /categories - List categories by page
#[utoipa::path(
    get,
    path = "/",
    tag = CATEGORY_TAG,
    params(PageQuery),
    responses(
        (status = 200, description = "One page of categories", body = PagedResponse<CategoryResponse>),
        (status = 400, description = "Invalid paging or sort parameters")
    )
)]
async fn list_categories(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<PageQuery>,
) -> AppResult<Json<PagedResponse<CategoryResponse>>> {
    let (items, total) = state
        .services
        .categories
        .list_categories(
            query.offset(),
            query.limit(),
            &query.order_by,
            query.direction.into(),
        )
        .await?;
    let data = items.into_iter().map(CategoryResponse::from).collect();
    Ok(Json(PagedResponse::new(data, &query, total as u64)))
}

/// GET /categories/{id} - Get category by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = CATEGORY_TAG,
    params(("id" = i64, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category found", body = CategoryResponse),
        (status = 404, description = "Category not found")
    )
)]
async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<CategoryResponse>> {
    let category = state.services.categories.get_category(id).await?;
    Ok(Json(CategoryResponse::from(category)))
}

/// POST /categories - Create a new category
#[utoipa::path(
    post,
    path = "/",
    tag = CATEGORY_TAG,
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Invalid request body")
    )
)]
async fn create_category(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateCategoryRequest>,
) -> AppResult<impl axum::response::IntoResponse> {
    let category = state
        .services
        .categories
        .create_category(payload.name)
        .await?;
    let dto = CategoryResponse::from(category);
    let location = format!("/categories/{}", dto.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(dto),
    ))
}

/// PUT /categories/{id} - Update category by id
#[utoipa::path(
    put,
    path = "/{id}",
    tag = CATEGORY_TAG,
    params(("id" = i64, Path, description = "Category id")),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 404, description = "Category not found")
    )
)]
async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateCategoryRequest>,
) -> AppResult<Json<CategoryResponse>> {
    let category = state
        .services
        .categories
        .update_category(id, payload.name)
        .await?;
    Ok(Json(CategoryResponse::from(category)))
}

/// DELETE /categories/{id} - Delete category by id
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = CATEGORY_TAG,
    params(("id" = i64, Path, description = "Category id")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category still referenced by products")
    )
)]
async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.categories.delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
