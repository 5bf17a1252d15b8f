//! Category repository for async database operations.

use chrono::Utc;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult, DatabaseErrorConverter};
use crate::models::{Category, CategoryChanges, NewCategory};
use crate::repositories::{SortDirection, unsortable_field};
use crate::schema::categories;

/// Category repository holding an async connection pool.
///
/// Since `AsyncDbPool` (bb8::Pool) internally uses `Arc`, cloning is cheap.
#[derive(Clone)]
pub struct CategoryRepository {
    pool: AsyncDbPool,
}

impl CategoryRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Loads one page of categories plus the unfiltered row count.
    ///
    /// Sorting happens in SQL; `order_by` must name a sortable column.
    /// The page and count queries share one transaction so the metadata
    /// matches the slice.
    pub async fn list_paged(
        &self,
        offset: i64,
        limit: i64,
        order_by: &str,
        direction: SortDirection,
    ) -> AppResult<(Vec<Category>, i64)> {
        let mut query = categories::table
            .select(Category::as_select())
            .into_boxed();
        query = match (order_by, direction) {
            ("id", SortDirection::Asc) => query.order(categories::id.asc()),
            ("id", SortDirection::Desc) => query.order(categories::id.desc()),
            ("name", SortDirection::Asc) => query.order(categories::name.asc()),
            ("name", SortDirection::Desc) => query.order(categories::name.desc()),
            _ => return Err(unsortable_field(order_by)),
        };

        let mut conn = self.pool.get().await?;
        conn.transaction::<_, AppError, _>(|conn| {
            async move {
                let items = query.offset(offset).limit(limit).load(conn).await?;
                let total = categories::table.count().get_result(conn).await?;
                Ok((items, total))
            }
            .scope_boxed()
        })
        .await
    }

    pub async fn find_by_id(&self, category_id: i64) -> AppResult<Option<Category>> {
        let mut conn = self.pool.get().await?;

        categories::table
            .find(category_id)
            .select(Category::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Inserts a new category, stamping `created_at` just before the write.
    pub async fn insert(&self, name: String) -> AppResult<Category> {
        let new_category = NewCategory {
            name,
            created_at: Utc::now(),
        };
        let mut conn = self.pool.get().await?;

        diesel::insert_into(categories::table)
            .values(&new_category)
            .returning(Category::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Overwrites the category's name and stamps `updated_at`.
    ///
    /// A single UPDATE .. RETURNING statement; zero affected rows surfaces
    /// as Diesel's NotFound, rewritten here with the requested id.
    pub async fn update(&self, category_id: i64, name: String) -> AppResult<Category> {
        let changes = CategoryChanges {
            name,
            updated_at: Utc::now(),
        };
        let mut conn = self.pool.get().await?;

        diesel::update(categories::table.find(category_id))
            .set(&changes)
            .returning(Category::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| match e {
                diesel::result::Error::NotFound => AppError::not_found("category", category_id),
                other => AppError::from(other),
            })
    }

    pub async fn exists(&self, category_id: i64) -> AppResult<bool> {
        let mut conn = self.pool.get().await?;

        diesel::select(exists(categories::table.find(category_id)))
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Deletes a category.
    ///
    /// A foreign key violation means a product still references this
    /// category; that is a Conflict, not a NotFound and not a server fault.
    pub async fn delete(&self, category_id: i64) -> AppResult<()> {
        let mut conn = self.pool.get().await?;

        diesel::delete(categories::table.find(category_id))
            .execute(&mut conn)
            .await
            .map_err(|e| {
                if DatabaseErrorConverter::is_foreign_key_violation(&e) {
                    AppError::Conflict {
                        entity: "category".to_string(),
                        id: category_id.to_string(),
                    }
                } else {
                    AppError::from(e)
                }
            })?;

        Ok(())
    }
}
