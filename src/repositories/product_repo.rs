//! Product repository for async database operations.
//!
//! Products own the many-to-many link to categories: insert and update
//! rewrite the `product_categories` join rows inside the same transaction
//! as the product row itself.

use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult, DatabaseErrorConverter};
use crate::models::{Category, NewProduct, NewProductCategory, Product, ProductCategory, ProductChanges};
use crate::repositories::{SortDirection, unsortable_field};
use crate::schema::{categories, product_categories, products};

/// A product together with its full category set.
pub type ProductWithCategories = (Product, Vec<Category>);

/// Product repository holding an async connection pool.
#[derive(Clone)]
pub struct ProductRepository {
    pool: AsyncDbPool,
}

impl ProductRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Loads one page of products with their categories, plus the unfiltered
    /// row count. Page slice, count, and relation load share one transaction
    /// so the result is a consistent snapshot.
    pub async fn list_paged(
        &self,
        offset: i64,
        limit: i64,
        order_by: &str,
        direction: SortDirection,
    ) -> AppResult<(Vec<ProductWithCategories>, i64)> {
        let mut query = products::table.select(Product::as_select()).into_boxed();
        query = match (order_by, direction) {
            ("id", SortDirection::Asc) => query.order(products::id.asc()),
            ("id", SortDirection::Desc) => query.order(products::id.desc()),
            ("name", SortDirection::Asc) => query.order(products::name.asc()),
            ("name", SortDirection::Desc) => query.order(products::name.desc()),
            ("price", SortDirection::Asc) => query.order(products::price.asc()),
            ("price", SortDirection::Desc) => query.order(products::price.desc()),
            ("date", SortDirection::Asc) => query.order(products::date.asc()),
            ("date", SortDirection::Desc) => query.order(products::date.desc()),
            _ => return Err(unsortable_field(order_by)),
        };

        let mut conn = self.pool.get().await?;
        conn.transaction::<_, AppError, _>(|conn| {
            async move {
                let items: Vec<Product> = query.offset(offset).limit(limit).load(conn).await?;
                let total: i64 = products::table.count().get_result(conn).await?;
                let with_categories = load_categories(conn, items).await?;
                Ok((with_categories, total))
            }
            .scope_boxed()
        })
        .await
    }

    pub async fn find_by_id(&self, product_id: i64) -> AppResult<Option<ProductWithCategories>> {
        let mut conn = self.pool.get().await?;

        let product = products::table
            .find(product_id)
            .select(Product::as_select())
            .first::<Product>(&mut conn)
            .await
            .optional()?;

        match product {
            Some(product) => {
                let mut loaded = load_categories(&mut conn, vec![product]).await?;
                Ok(loaded.pop())
            }
            None => Ok(None),
        }
    }

    /// Inserts a product and attaches its categories in one unit of work.
    ///
    /// Category ids are resolved by an id-only lookup; a missing id aborts
    /// the whole transaction with NotFound.
    pub async fn insert(
        &self,
        new_product: NewProduct,
        category_ids: Vec<i64>,
    ) -> AppResult<ProductWithCategories> {
        let mut conn = self.pool.get().await?;
        conn.transaction::<_, AppError, _>(|conn| {
            async move {
                let product: Product = diesel::insert_into(products::table)
                    .values(&new_product)
                    .returning(Product::as_returning())
                    .get_result(conn)
                    .await?;
                let attached = attach_categories(conn, product.id, category_ids).await?;
                Ok((product, attached))
            }
            .scope_boxed()
        })
        .await
    }

    /// Overwrites every product column and wholesale-replaces the category
    /// set (clear then re-attach), all in one transaction.
    ///
    /// The UPDATE statement itself reports a missing id as zero affected
    /// rows; no existence pre-read is made.
    pub async fn update(
        &self,
        product_id: i64,
        changes: ProductChanges,
        category_ids: Vec<i64>,
    ) -> AppResult<ProductWithCategories> {
        let mut conn = self.pool.get().await?;
        conn.transaction::<_, AppError, _>(|conn| {
            async move {
                let product: Product = diesel::update(products::table.find(product_id))
                    .set(&changes)
                    .returning(Product::as_returning())
                    .get_result(conn)
                    .await
                    .map_err(|e| match e {
                        diesel::result::Error::NotFound => {
                            AppError::not_found("product", product_id)
                        }
                        other => AppError::from(other),
                    })?;

                diesel::delete(
                    product_categories::table
                        .filter(product_categories::product_id.eq(product_id)),
                )
                .execute(conn)
                .await?;

                let attached = attach_categories(conn, product_id, category_ids).await?;
                Ok((product, attached))
            }
            .scope_boxed()
        })
        .await
    }

    pub async fn exists(&self, product_id: i64) -> AppResult<bool> {
        let mut conn = self.pool.get().await?;

        diesel::select(exists(products::table.find(product_id)))
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Deletes a product; its own join rows go with it via ON DELETE CASCADE.
    pub async fn delete(&self, product_id: i64) -> AppResult<()> {
        let mut conn = self.pool.get().await?;

        diesel::delete(products::table.find(product_id))
            .execute(&mut conn)
            .await
            .map_err(|e| {
                if DatabaseErrorConverter::is_foreign_key_violation(&e) {
                    AppError::Conflict {
                        entity: "product".to_string(),
                        id: product_id.to_string(),
                    }
                } else {
                    AppError::from(e)
                }
            })?;

        Ok(())
    }
}

/// Loads the category set for each product via the join table.
async fn load_categories(
    conn: &mut AsyncPgConnection,
    items: Vec<Product>,
) -> AppResult<Vec<ProductWithCategories>> {
    let rows: Vec<(ProductCategory, Category)> = ProductCategory::belonging_to(&items)
        .inner_join(categories::table)
        .select((ProductCategory::as_select(), Category::as_select()))
        .order(categories::id.asc())
        .load(conn)
        .await?;

    let grouped = rows.grouped_by(&items);
    Ok(items
        .into_iter()
        .zip(grouped)
        .map(|(product, links)| {
            let cats = links.into_iter().map(|(_, category)| category).collect();
            (product, cats)
        })
        .collect())
}

/// Resolves category ids (id-only lookup, no full rows), writes the join
/// rows, and loads the attached categories for the response projection.
async fn attach_categories(
    conn: &mut AsyncPgConnection,
    product_id: i64,
    category_ids: Vec<i64>,
) -> AppResult<Vec<Category>> {
    let mut ids = category_ids;
    ids.sort_unstable();
    ids.dedup();

    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let found: Vec<i64> = categories::table
        .select(categories::id)
        .filter(categories::id.eq_any(&ids))
        .load(conn)
        .await?;
    if let Some(missing) = ids.iter().copied().find(|id| !found.contains(id)) {
        return Err(AppError::not_found("category", missing));
    }

    let links: Vec<NewProductCategory> = ids
        .iter()
        .map(|&category_id| NewProductCategory {
            product_id,
            category_id,
        })
        .collect();
    diesel::insert_into(product_categories::table)
        .values(&links)
        .execute(conn)
        .await?;

    categories::table
        .filter(categories::id.eq_any(&ids))
        .select(Category::as_select())
        .order(categories::id.asc())
        .load(conn)
        .await
        .map_err(AppError::from)
}
