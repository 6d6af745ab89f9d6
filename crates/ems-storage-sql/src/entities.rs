//! Database entity types for `SQLx`.
//!
//! These types map directly to database rows and are converted
//! to domain models in [`crate::convert`].

use chrono::NaiveDateTime;
use sqlx::FromRow;

/// Database row for employees.
#[derive(Debug, Clone, FromRow)]
pub struct EmployeeRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub role: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
