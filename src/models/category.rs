use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Category model for reading from the database.
/// Derives Queryable for SELECT operations and Selectable for type-safe column selection.
#[derive(Debug, Clone, PartialEq, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// NewCategory model for inserting new records.
///
/// `created_at` is stamped by the repository immediately before the insert;
/// `updated_at` stays NULL until the first update.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::categories)]
pub struct NewCategory {
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Changeset for category updates.
///
/// Fields are not optional: an update overwrites every mapped column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = crate::schema::categories)]
pub struct CategoryChanges {
    pub name: String,
    pub updated_at: DateTime<Utc>,
}
