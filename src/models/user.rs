use diesel::prelude::*;

/// User model for reading from the database.
///
/// `password` holds the argon2 PHC hash string, never plaintext. The hash
/// stays inside the service layer; response DTOs are built without it.
#[derive(Debug, Clone, PartialEq, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// NewUser model for inserting new records. `password` is already hashed.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Changeset for user updates.
///
/// There is no password field: updates overwrite the profile columns only.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = crate::schema::users)]
pub struct UserChanges {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}
