//! Product-related DTOs for API requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{NewProduct, Product, ProductChanges};

use super::category::{CategoryRef, CategoryResponse};

// ============================================================================
// Request DTOs
// ============================================================================

/// Request body for creating or updating a product.
///
/// The same shape serves both verbs: an update overwrites every mapped
/// field and replaces the category set with the one given here.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ProductRequest {
    #[validate(length(min = 1, max = 255, message = "Name must not be blank"))]
    #[schema(min_length = 1, max_length = 255, example = "Phone")]
    pub name: String,
    pub description: String,
    #[validate(range(min = 0.01, message = "Price must be positive"))]
    #[schema(example = 800.0)]
    pub price: f64,
    #[serde(default)]
    pub img_url: String,
    pub date: DateTime<Utc>,
    /// Categories referenced by id; each must exist.
    #[serde(default)]
    pub categories: Vec<CategoryRef>,
}

impl ProductRequest {
    /// Splits the request into the insertable model and the category ids.
    pub fn into_new_product(self) -> (NewProduct, Vec<i64>) {
        let category_ids = self.categories.iter().map(|c| c.id).collect();
        (
            NewProduct {
                name: self.name,
                description: self.description,
                price: self.price,
                img_url: self.img_url,
                date: self.date,
            },
            category_ids,
        )
    }

    /// Splits the request into the full-overwrite changeset and the
    /// category ids.
    pub fn into_product_changes(self) -> (ProductChanges, Vec<i64>) {
        let category_ids = self.categories.iter().map(|c| c.id).collect();
        (
            ProductChanges {
                name: self.name,
                description: self.description,
                price: self.price,
                img_url: self.img_url,
                date: self.date,
            },
            category_ids,
        )
    }
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Response body for product data, including the category set.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub img_url: String,
    pub date: DateTime<Utc>,
    pub categories: Vec<CategoryResponse>,
}

impl ProductResponse {
    /// Builds the response from a product and its loaded category set.
    pub fn from_parts(product: Product, categories: Vec<crate::models::Category>) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            img_url: product.img_url,
            date: product.date,
            categories: categories.into_iter().map(CategoryResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use chrono::TimeZone;

    fn sample_product() -> Product {
        Product {
            id: 1,
            name: "Phone".to_string(),
            description: "Good Phone".to_string(),
            price: 800.0,
            img_url: "https://img.com/img.png".to_string(),
            date: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_response_includes_category_set() {
        let category = Category {
            id: 2,
            name: "Eletronics".to_string(),
            created_at: Utc::now(),
            updated_at: None,
        };

        let response = ProductResponse::from_parts(sample_product(), vec![category]);
        let body = serde_json::to_value(response).unwrap();

        assert_eq!(body["id"], 1);
        assert_eq!(body["price"], 800.0);
        assert_eq!(
            body["categories"],
            serde_json::json!([{"id": 2, "name": "Eletronics"}])
        );
    }

    #[test]
    fn test_request_splits_category_ids() {
        let request: ProductRequest = serde_json::from_value(serde_json::json!({
            "name": "Phone",
            "description": "Good Phone",
            "price": 800.0,
            "date": "2024-06-01T12:00:00Z",
            "categories": [{"id": 2}, {"id": 3}]
        }))
        .unwrap();

        let (new_product, category_ids) = request.into_new_product();
        assert_eq!(new_product.name, "Phone");
        assert_eq!(category_ids, vec![2, 3]);
    }

    #[test]
    fn test_request_rejects_non_positive_price() {
        use validator::Validate;

        let request: ProductRequest = serde_json::from_value(serde_json::json!({
            "name": "Phone",
            "description": "Good Phone",
            "price": 0.0,
            "date": "2024-06-01T12:00:00Z"
        }))
        .unwrap();

        assert!(request.validate().is_err());
    }
}
