//! Product service for business logic operations.

use crate::error::{AppError, AppResult};
use crate::models::{NewProduct, ProductChanges};
use crate::repositories::{ProductRepository, ProductWithCategories, SortDirection};

/// Product service wrapping the `ProductRepository`.
#[derive(Clone)]
pub struct ProductService {
    repo: ProductRepository,
}

impl ProductService {
    pub fn new(repo: ProductRepository) -> Self {
        Self { repo }
    }

    /// Lists one page of products with their category sets.
    pub async fn list_products(
        &self,
        offset: i64,
        limit: i64,
        order_by: &str,
        direction: SortDirection,
    ) -> AppResult<(Vec<ProductWithCategories>, i64)> {
        self.repo.list_paged(offset, limit, order_by, direction).await
    }

    /// Gets a product with its category set by id, or `NotFound`.
    pub async fn get_product(&self, id: i64) -> AppResult<ProductWithCategories> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("product", id))
    }

    /// Creates a product and attaches the referenced categories.
    ///
    /// A category id with no matching row fails the whole operation with
    /// `NotFound`; nothing is persisted in that case.
    pub async fn create_product(
        &self,
        new_product: NewProduct,
        category_ids: Vec<i64>,
    ) -> AppResult<ProductWithCategories> {
        self.repo.insert(new_product, category_ids).await
    }

    /// Overwrites every mapped product field and wholesale-replaces the
    /// category set; the old set is never merged into the new one.
    pub async fn update_product(
        &self,
        id: i64,
        changes: ProductChanges,
        category_ids: Vec<i64>,
    ) -> AppResult<ProductWithCategories> {
        self.repo.update(id, changes, category_ids).await
    }

    /// Deletes a product after an existence check; join rows disappear with
    /// the product row.
    pub async fn delete_product(&self, id: i64) -> AppResult<()> {
        if !self.repo.exists(id).await? {
            return Err(AppError::not_found("product", id));
        }
        self.repo.delete(id).await
    }
}
