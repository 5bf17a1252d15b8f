//! User service for business logic operations.
//!
//! On top of the CRUD contract, users carry the password-hashing rule
//! (plaintext goes in, only an argon2 hash ever reaches the store) and the
//! credentials lookup used by an external authentication collaborator.

use crate::error::{AppError, AppResult};
use crate::models::{NewUser, UserChanges};
use crate::repositories::{SortDirection, UserRepository, UserWithRoles};
use crate::utils::password::hash_password;

/// Credential record for the authentication collaborator: the stored hash
/// plus the granted authority labels. Not a response DTO; never serialized.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub authorities: Vec<String>,
}

/// User service wrapping the `UserRepository`.
#[derive(Clone)]
pub struct UserService {
    repo: UserRepository,
}

impl UserService {
    pub fn new(repo: UserRepository) -> Self {
        Self { repo }
    }

    /// Lists one page of users with their role sets.
    pub async fn list_users(
        &self,
        offset: i64,
        limit: i64,
        order_by: &str,
        direction: SortDirection,
    ) -> AppResult<(Vec<UserWithRoles>, i64)> {
        self.repo.list_paged(offset, limit, order_by, direction).await
    }

    /// Gets a user with their role set by id, or `NotFound`.
    pub async fn get_user(&self, id: i64) -> AppResult<UserWithRoles> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("user", id))
    }

    /// Creates a user, hashing the plaintext password before anything is
    /// persisted. The plaintext is consumed here and never logged.
    ///
    /// A role id with no matching row fails with `NotFound`; a duplicate
    /// email fails with `Duplicate`.
    pub async fn create_user(
        &self,
        first_name: String,
        last_name: String,
        email: String,
        password: String,
        role_ids: Vec<i64>,
    ) -> AppResult<UserWithRoles> {
        let password = hash_password(&password)?;
        let new_user = NewUser {
            first_name,
            last_name,
            email,
            password,
        };
        self.repo.insert(new_user, role_ids).await
    }

    /// Overwrites the user's profile fields and wholesale-replaces the role
    /// set. The password is not part of the update contract.
    pub async fn update_user(
        &self,
        id: i64,
        changes: UserChanges,
        role_ids: Vec<i64>,
    ) -> AppResult<UserWithRoles> {
        self.repo.update(id, changes, role_ids).await
    }

    /// Deletes a user after an existence check.
    pub async fn delete_user(&self, id: i64) -> AppResult<()> {
        if !self.repo.exists(id).await? {
            return Err(AppError::not_found("user", id));
        }
        self.repo.delete(id).await
    }

    /// Authentication lookup by email.
    ///
    /// Returns the credential record for the authentication collaborator;
    /// a miss is a distinct `CredentialsNotFound` failure. This never
    /// creates a user as a side effect.
    pub async fn load_user_by_email(&self, email: &str) -> AppResult<UserCredentials> {
        match self.repo.find_by_email(email).await? {
            Some((user, user_roles)) => {
                tracing::debug!(user_id = user.id, "credentials lookup hit");
                Ok(UserCredentials {
                    id: user.id,
                    email: user.email,
                    password_hash: user.password,
                    authorities: user_roles.into_iter().map(|r| r.authority).collect(),
                })
            }
            None => {
                tracing::warn!("credentials lookup miss");
                Err(AppError::CredentialsNotFound {
                    email: email.to_string(),
                })
            }
        }
    }
}
