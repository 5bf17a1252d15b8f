//! Service layer for business logic operations.
//!
//! Services encapsulate the per-entity CRUD contract and coordinate
//! between repositories and handlers.

mod category_service;
mod product_service;
mod user_service;

pub use category_service::CategoryService;
pub use product_service::ProductService;
pub use user_service::{UserCredentials, UserService};

use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning is cheap since the underlying pool uses `Arc` internally.
#[derive(Clone)]
pub struct Services {
    pub categories: CategoryService,
    pub products: ProductService,
    pub users: UserService,
}

impl Services {
    /// Creates a new Services instance from Repositories.
    pub fn new(repos: Repositories) -> Self {
        Self {
            categories: CategoryService::new(repos.categories),
            products: ProductService::new(repos.products),
            users: UserService::new(repos.users),
        }
    }
}
