//! User repository for async database operations.
//!
//! Users own the many-to-many link to roles; insert and update rewrite the
//! `user_roles` join rows inside the same transaction as the user row.

use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult, DatabaseErrorConverter};
use crate::models::{NewUser, NewUserRole, Role, User, UserChanges, UserRole};
use crate::repositories::{SortDirection, unsortable_field};
use crate::schema::{roles, user_roles, users};

/// A user together with their full role set.
pub type UserWithRoles = (User, Vec<Role>);

/// User repository holding an async connection pool.
#[derive(Clone)]
pub struct UserRepository {
    pool: AsyncDbPool,
}

impl UserRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Loads one page of users with their roles, plus the unfiltered row
    /// count, in one transaction.
    pub async fn list_paged(
        &self,
        offset: i64,
        limit: i64,
        order_by: &str,
        direction: SortDirection,
    ) -> AppResult<(Vec<UserWithRoles>, i64)> {
        let mut query = users::table.select(User::as_select()).into_boxed();
        query = match (order_by, direction) {
            ("id", SortDirection::Asc) => query.order(users::id.asc()),
            ("id", SortDirection::Desc) => query.order(users::id.desc()),
            ("first_name", SortDirection::Asc) => query.order(users::first_name.asc()),
            ("first_name", SortDirection::Desc) => query.order(users::first_name.desc()),
            ("last_name", SortDirection::Asc) => query.order(users::last_name.asc()),
            ("last_name", SortDirection::Desc) => query.order(users::last_name.desc()),
            ("email", SortDirection::Asc) => query.order(users::email.asc()),
            ("email", SortDirection::Desc) => query.order(users::email.desc()),
            _ => return Err(unsortable_field(order_by)),
        };

        let mut conn = self.pool.get().await?;
        conn.transaction::<_, AppError, _>(|conn| {
            async move {
                let items: Vec<User> = query.offset(offset).limit(limit).load(conn).await?;
                let total: i64 = users::table.count().get_result(conn).await?;
                let with_roles = load_roles(conn, items).await?;
                Ok((with_roles, total))
            }
            .scope_boxed()
        })
        .await
    }

    pub async fn find_by_id(&self, user_id: i64) -> AppResult<Option<UserWithRoles>> {
        let mut conn = self.pool.get().await?;

        let user = users::table
            .find(user_id)
            .select(User::as_select())
            .first::<User>(&mut conn)
            .await
            .optional()?;

        match user {
            Some(user) => {
                let mut loaded = load_roles(&mut conn, vec![user]).await?;
                Ok(loaded.pop())
            }
            None => Ok(None),
        }
    }

    /// Finds a user by email, for the authentication lookup. Returns the
    /// user with their role set; never creates anything.
    pub async fn find_by_email(&self, user_email: &str) -> AppResult<Option<UserWithRoles>> {
        let mut conn = self.pool.get().await?;

        let user = users::table
            .filter(users::email.eq(user_email))
            .select(User::as_select())
            .first::<User>(&mut conn)
            .await
            .optional()?;

        match user {
            Some(user) => {
                let mut loaded = load_roles(&mut conn, vec![user]).await?;
                Ok(loaded.pop())
            }
            None => Ok(None),
        }
    }

    /// Inserts a user and attaches their roles in one unit of work.
    ///
    /// `new_user.password` must already be hashed; this layer never sees
    /// plaintext. Role ids are resolved by an id-only lookup; a missing id
    /// aborts the transaction with NotFound. A duplicate email surfaces as
    /// a unique violation and is translated to Duplicate.
    pub async fn insert(&self, new_user: NewUser, role_ids: Vec<i64>) -> AppResult<UserWithRoles> {
        let mut conn = self.pool.get().await?;
        conn.transaction::<_, AppError, _>(|conn| {
            async move {
                let user: User = diesel::insert_into(users::table)
                    .values(&new_user)
                    .returning(User::as_returning())
                    .get_result(conn)
                    .await?;
                let attached = attach_roles(conn, user.id, role_ids).await?;
                Ok((user, attached))
            }
            .scope_boxed()
        })
        .await
    }

    /// Overwrites the user's profile columns and wholesale-replaces the
    /// role set in one transaction. The password column is not touched.
    pub async fn update(
        &self,
        user_id: i64,
        changes: UserChanges,
        role_ids: Vec<i64>,
    ) -> AppResult<UserWithRoles> {
        let mut conn = self.pool.get().await?;
        conn.transaction::<_, AppError, _>(|conn| {
            async move {
                let user: User = diesel::update(users::table.find(user_id))
                    .set(&changes)
                    .returning(User::as_returning())
                    .get_result(conn)
                    .await
                    .map_err(|e| match e {
                        diesel::result::Error::NotFound => AppError::not_found("user", user_id),
                        other => AppError::from(other),
                    })?;

                diesel::delete(user_roles::table.filter(user_roles::user_id.eq(user_id)))
                    .execute(conn)
                    .await?;

                let attached = attach_roles(conn, user_id, role_ids).await?;
                Ok((user, attached))
            }
            .scope_boxed()
        })
        .await
    }

    pub async fn exists(&self, user_id: i64) -> AppResult<bool> {
        let mut conn = self.pool.get().await?;

        diesel::select(exists(users::table.find(user_id)))
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Deletes a user; their join rows go with them via ON DELETE CASCADE.
    pub async fn delete(&self, user_id: i64) -> AppResult<()> {
        let mut conn = self.pool.get().await?;

        diesel::delete(users::table.find(user_id))
            .execute(&mut conn)
            .await
            .map_err(|e| {
                if DatabaseErrorConverter::is_foreign_key_violation(&e) {
                    AppError::Conflict {
                        entity: "user".to_string(),
                        id: user_id.to_string(),
                    }
                } else {
                    AppError::from(e)
                }
            })?;

        Ok(())
    }
}

/// Loads the role set for each user via the join table.
async fn load_roles(
    conn: &mut AsyncPgConnection,
    items: Vec<User>,
) -> AppResult<Vec<UserWithRoles>> {
    let rows: Vec<(UserRole, Role)> = UserRole::belonging_to(&items)
        .inner_join(roles::table)
        .select((UserRole::as_select(), Role::as_select()))
        .order(roles::id.asc())
        .load(conn)
        .await?;

    let grouped = rows.grouped_by(&items);
    Ok(items
        .into_iter()
        .zip(grouped)
        .map(|(user, links)| {
            let user_role_set = links.into_iter().map(|(_, role)| role).collect();
            (user, user_role_set)
        })
        .collect())
}

/// Resolves role ids (id-only lookup), writes the join rows, and loads the
/// attached roles for the response projection.
async fn attach_roles(
    conn: &mut AsyncPgConnection,
    user_id: i64,
    role_ids: Vec<i64>,
) -> AppResult<Vec<Role>> {
    let mut ids = role_ids;
    ids.sort_unstable();
    ids.dedup();

    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let found: Vec<i64> = roles::table
        .select(roles::id)
        .filter(roles::id.eq_any(&ids))
        .load(conn)
        .await?;
    if let Some(missing) = ids.iter().copied().find(|id| !found.contains(id)) {
        return Err(AppError::not_found("role", missing));
    }

    let links: Vec<NewUserRole> = ids
        .iter()
        .map(|&role_id| NewUserRole { user_id, role_id })
        .collect();
    diesel::insert_into(user_roles::table)
        .values(&links)
        .execute(conn)
        .await?;

    roles::table
        .filter(roles::id.eq_any(&ids))
        .select(Role::as_select())
        .order(roles::id.asc())
        .load(conn)
        .await
        .map_err(AppError::from)
}
