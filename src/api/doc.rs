use utoipa::OpenApi;

pub const CATEGORY_TAG: &str = "Categories";
pub const PRODUCT_TAG: &str = "Products";
pub const USER_TAG: &str = "Users";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog",
        description = "A REST catalog service for products, categories, and users",
    ),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
        )
    ),
    tags(
        (name = CATEGORY_TAG, description = "Category management endpoints"),
        (name = PRODUCT_TAG, description = "Product management endpoints"),
        (name = USER_TAG, description = "User management endpoints"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;
