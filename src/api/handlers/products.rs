//! Product CRUD request handlers.

use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::Json;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::PRODUCT_TAG;
use crate::api::dto::{PageQuery, PagedResponse, ProductRequest, ProductResponse};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::{ValidatedJson, ValidatedQuery};

/// Creates product-related routes.
pub fn product_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_products, create_product))
        .routes(routes!(get_product, update_product, delete_product))
}

/// GET /products - List products by page, categories included
#[utoipa::path(
    get,
    path = "/",
    tag = PRODUCT_TAG,
    params(PageQuery),
    responses(
        (status = 200, description = "One page of products", body = PagedResponse<ProductResponse>),
        (status = 400, description = "Invalid paging or sort parameters")
    )
)]
async fn list_products(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<PageQuery>,
) -> AppResult<Json<PagedResponse<ProductResponse>>> {
    let (items, total) = state
        .services
        .products
        .list_products(
            query.offset(),
            query.limit(),
            &query.order_by,
            query.direction.into(),
        )
        .await?;
    let data = items
        .into_iter()
        .map(|(product, categories)| ProductResponse::from_parts(product, categories))
        .collect();
    Ok(Json(PagedResponse::new(data, &query, total as u64)))
}

/// GET /products/{id} - Get product by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = PRODUCT_TAG,
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 404, description = "Product not found")
    )
)]
async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ProductResponse>> {
    let (product, categories) = state.services.products.get_product(id).await?;
    Ok(Json(ProductResponse::from_parts(product, categories)))
}

/// POST /products - Create a new product
///
/// Referenced category ids must exist; a missing one fails the whole
/// request with 404 and nothing is persisted.
#[utoipa::path(
    post,
    path = "/",
    tag = PRODUCT_TAG,
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid request body"),
        (status = 404, description = "Referenced category does not exist")
    )
)]
async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ProductRequest>,
) -> AppResult<impl axum::response::IntoResponse> {
    let (new_product, category_ids) = payload.into_new_product();
    let (product, categories) = state
        .services
        .products
        .create_product(new_product, category_ids)
        .await?;
    let dto = ProductResponse::from_parts(product, categories);
    let location = format!("/products/{}", dto.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(dto),
    ))
}

/// PUT /products/{id} - Update product by id
///
/// Overwrites every field and replaces the category set with the one in
/// the request body.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = PRODUCT_TAG,
    params(("id" = i64, Path, description = "Product id")),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 404, description = "Product or referenced category not found")
    )
)]
async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<ProductRequest>,
) -> AppResult<Json<ProductResponse>> {
    let (changes, category_ids) = payload.into_product_changes();
    let (product, categories) = state
        .services
        .products
        .update_product(id, changes, category_ids)
        .await?;
    Ok(Json(ProductResponse::from_parts(product, categories)))
}

/// DELETE /products/{id} - Delete product by id
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = PRODUCT_TAG,
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Product still referenced by other rows")
    )
)]
async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.products.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
