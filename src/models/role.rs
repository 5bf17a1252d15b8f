use diesel::prelude::*;

use super::User;

/// Role model, a named authority such as `ROLE_OPERATOR`.
#[derive(Debug, Clone, PartialEq, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::roles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Role {
    pub id: i64,
    pub authority: String,
}

/// Join-table row linking a user to a role.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::user_roles)]
#[diesel(primary_key(user_id, role_id))]
#[diesel(belongs_to(User))]
#[diesel(belongs_to(Role))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRole {
    pub user_id: i64,
    pub role_id: i64,
}

/// Insertable join-table row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::user_roles)]
pub struct NewUserRole {
    pub user_id: i64,
    pub role_id: i64,
}
