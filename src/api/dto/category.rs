//! Category-related DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::Category;

// ============================================================================
// Request DTOs
// ============================================================================

/// Request body for creating a category.
///
/// Requests carry no id: the store assigns one.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 255, message = "Name must not be blank"))]
    #[schema(min_length = 1, max_length = 255, example = "Books")]
    pub name: String,
}

/// Request body for updating a category. Every mapped field is overwritten.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1, max = 255, message = "Name must not be blank"))]
    pub name: String,
}

/// Reference to an existing category by id, used when attaching categories
/// to a product.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CategoryRef {
    pub id: i64,
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Response body for category data.
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_response_exposes_id_and_name_only() {
        let category = Category {
            id: 2,
            name: "Eletronics".to_string(),
            created_at: Utc::now(),
            updated_at: None,
        };

        let body = serde_json::to_value(CategoryResponse::from(category)).unwrap();
        assert_eq!(body, serde_json::json!({"id": 2, "name": "Eletronics"}));
    }
}
