//! Repository layer for data access operations.
//!
//! All SQL lives here: pagination, store-level sorting, CRUD statements,
//! and the join-table rewrites for the many-to-many relationships. Each
//! repository owns its error translation for the cases where the operation's
//! intent matters (missing update target, delete blocked by references).

mod category_repo;
mod product_repo;
mod user_repo;

pub use category_repo::CategoryRepository;
pub use product_repo::{ProductRepository, ProductWithCategories};
pub use user_repo::{UserRepository, UserWithRoles};

use crate::db::AsyncDbPool;

/// Sort direction for paginated listing, applied at the store level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Rejection for an `order_by` value that names no sortable column.
///
/// Unknown sort fields are refused up front instead of being forwarded to
/// the database as raw SQL.
pub(crate) fn unsortable_field(order_by: &str) -> crate::error::AppError {
    crate::error::AppError::Validation {
        field: "order_by".to_string(),
        reason: format!("'{}' is not a sortable field", order_by),
    }
}

/// Aggregates all repositories for convenient access.
///
/// Since `AsyncDbPool` uses `Arc` internally, cloning is cheap.
#[derive(Clone)]
pub struct Repositories {
    pub categories: CategoryRepository,
    pub products: ProductRepository,
    pub users: UserRepository,
}

impl Repositories {
    /// Creates a new Repositories instance with all repositories initialized.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            categories: CategoryRepository::new(pool.clone()),
            products: ProductRepository::new(pool.clone()),
            users: UserRepository::new(pool),
        }
    }
}
