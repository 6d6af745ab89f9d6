//! SQL storage error types.

use ems_storage::StorageError;
use sqlx::Error as SqlxError;

/// Extended result code for `SQLITE_CONSTRAINT_UNIQUE`.
const SQLITE_CONSTRAINT_UNIQUE: &str = "2067";

/// Converts a `SQLx` error to a storage error.
#[allow(clippy::needless_pass_by_value)]
pub fn from_sqlx_error(err: SqlxError) -> StorageError {
    match err {
        SqlxError::RowNotFound => StorageError::Internal("Row not found".to_string()),
        SqlxError::Database(db_err) => {
            if is_unique_violation(&*db_err) {
                duplicate_of(db_err.message())
            } else {
                StorageError::Query(db_err.to_string())
            }
        }
        SqlxError::PoolTimedOut => StorageError::Connection("Connection timeout".to_string()),
        SqlxError::PoolClosed => StorageError::Connection("Store is closed".to_string()),
        SqlxError::ColumnDecode { index, source } => {
            StorageError::InvalidData(format!("column {index}: {source}"))
        }
        _ => StorageError::Internal(err.to_string()),
    }
}

/// Converts a `SQLx` error raised while writing an email, reporting
/// unique violations as a duplicate of that email.
pub fn from_sqlx_write_error(err: SqlxError, email: &str) -> StorageError {
    match &err {
        SqlxError::Database(db_err) if is_unique_violation(&**db_err) => {
            StorageError::duplicate("Employee", "email", email)
        }
        _ => from_sqlx_error(err),
    }
}

/// Builds a duplicate error from a message such as
/// `UNIQUE constraint failed: employees.email`.
///
/// The conflicting value is not part of the message, so the constraint
/// target stands in for it.
fn duplicate_of(message: &str) -> StorageError {
    let target = message.rsplit(": ").next().unwrap_or(message).trim();
    let field = if target.ends_with(".email") { "email" } else { "key" };
    StorageError::duplicate("Employee", field, target)
}

fn is_unique_violation(db_err: &dyn sqlx::error::DatabaseError) -> bool {
    db_err.is_unique_violation()
        || db_err
            .code()
            .is_some_and(|c| c == SQLITE_CONSTRAINT_UNIQUE)
}

/// Creates a not found error for an employee ID.
pub const fn not_found(id: i64) -> StorageError {
    StorageError::not_found("Employee", id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{SqliteStore, StoreConfig};

    #[test]
    fn unique_message_names_the_column() {
        let err = duplicate_of("UNIQUE constraint failed: employees.email");
        assert!(err.is_duplicate());
        assert!(matches!(
            err,
            StorageError::Duplicate { field: "email", ref value, .. } if value == "employees.email"
        ));
    }

    #[tokio::test]
    async fn unique_violation_maps_to_duplicate() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::open(&StoreConfig::new(dir.path().join("errors.sqlite")))
            .await
            .unwrap();

        let err = sqlx::query("INSERT INTO employees (name, email, password) VALUES (?, ?, ?)")
            .bind("Second Admin")
            .bind("admin@company.com")
            .bind("pw")
            .execute(store.pool())
            .await
            .map_err(from_sqlx_error)
            .unwrap_err();
        assert!(err.is_duplicate(), "{err}");
        assert!(matches!(err, StorageError::Duplicate { field: "email", .. }));

        let err = sqlx::query("SELECT nope FROM employees")
            .execute(store.pool())
            .await
            .map_err(from_sqlx_error)
            .unwrap_err();
        assert!(matches!(err, StorageError::Query(_)));

        store.close().await;
    }
}
