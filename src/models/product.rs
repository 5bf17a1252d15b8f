use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::Category;

/// Product model for reading from the database.
#[derive(Debug, Clone, PartialEq, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub img_url: String,
    pub date: DateTime<Utc>,
}

/// NewProduct model for inserting new records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub img_url: String,
    pub date: DateTime<Utc>,
}

/// Changeset for product updates. Every mapped column is overwritten.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = crate::schema::products)]
pub struct ProductChanges {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub img_url: String,
    pub date: DateTime<Utc>,
}

/// Join-table row linking a product to a category.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::product_categories)]
#[diesel(primary_key(product_id, category_id))]
#[diesel(belongs_to(Product))]
#[diesel(belongs_to(Category))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductCategory {
    pub product_id: i64,
    pub category_id: i64,
}

/// Insertable join-table row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::product_categories)]
pub struct NewProductCategory {
    pub product_id: i64,
    pub category_id: i64,
}
