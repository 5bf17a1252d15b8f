//! Category service for business logic operations.

use crate::error::{AppError, AppResult};
use crate::models::Category;
use crate::repositories::{CategoryRepository, SortDirection};

/// Category service wrapping the `CategoryRepository`.
///
/// Cloning is cheap since the repository's pool uses `Arc` internally.
#[derive(Clone)]
pub struct CategoryService {
    repo: CategoryRepository,
}

impl CategoryService {
    pub fn new(repo: CategoryRepository) -> Self {
        Self { repo }
    }

    /// Lists one page of categories, sorted at the store level.
    ///
    /// Returns the page slice and the total unfiltered row count. No bound
    /// is placed on the page size here; oversized values pass through.
    pub async fn list_categories(
        &self,
        offset: i64,
        limit: i64,
        order_by: &str,
        direction: SortDirection,
    ) -> AppResult<(Vec<Category>, i64)> {
        self.repo.list_paged(offset, limit, order_by, direction).await
    }

    /// Gets a category by id, or `NotFound`.
    pub async fn get_category(&self, id: i64) -> AppResult<Category> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("category", id))
    }

    /// Creates a new category; the store assigns the id and the creation
    /// timestamp.
    pub async fn create_category(&self, name: String) -> AppResult<Category> {
        self.repo.insert(name).await
    }

    /// Overwrites the category's mapped fields. Missing id fails with
    /// `NotFound` when the update statement affects no row.
    pub async fn update_category(&self, id: i64, name: String) -> AppResult<Category> {
        self.repo.update(id, name).await
    }

    /// Deletes a category.
    ///
    /// Existence is checked first so a missing id is `NotFound`; a delete
    /// blocked by referencing products is reported as `Conflict` by the
    /// repository, keeping the two failures distinct.
    pub async fn delete_category(&self, id: i64) -> AppResult<()> {
        if !self.repo.exists(id).await? {
            return Err(AppError::not_found("category", id));
        }
        self.repo.delete(id).await
    }
}
