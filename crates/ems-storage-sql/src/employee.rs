//! SQLite implementation of the employee storage provider.

use async_trait::async_trait;
use ems_model::{Employee, EmployeeUpdate, NewEmployee};
use ems_storage::{EmployeeProvider, EmployeeSearchCriteria, StorageError, StorageResult};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::entities::EmployeeRow;
use crate::error::{from_sqlx_error, from_sqlx_write_error, not_found};

/// SQLite employee storage provider.
#[derive(Debug, Clone)]
pub struct SqliteEmployeeProvider {
    pool: SqlitePool,
}

impl SqliteEmployeeProvider {
    /// Creates a new SQLite employee provider.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Builds a `LIKE` pattern matching `value` anywhere, with wildcards escaped.
fn contains_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl EmployeeProvider for SqliteEmployeeProvider {
    async fn create(&self, employee: &NewEmployee) -> StorageResult<i64> {
        if self.count_by_email(&employee.email).await? > 0 {
            return Err(StorageError::duplicate("Employee", "email", &employee.email));
        }

        let result = sqlx::query(
            r"INSERT INTO employees (name, email, password, phone, department, role)
            VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&employee.name)
        .bind(&employee.email)
        .bind(&employee.password)
        .bind(&employee.phone)
        .bind(&employee.department)
        .bind(&employee.role)
        .execute(&self.pool)
        .await
        .map_err(|e| from_sqlx_write_error(e, &employee.email))?;

        Ok(result.last_insert_rowid())
    }

    async fn update(&self, id: i64, update: &EmployeeUpdate) -> StorageResult<()> {
        let result = sqlx::query(
            r"UPDATE employees SET
                name = ?, email = ?, phone = ?, department = ?, role = ?,
                updated_at = strftime('%Y-%m-%d %H:%M:%f', 'now')
            WHERE id = ?",
        )
        .bind(&update.name)
        .bind(&update.email)
        .bind(&update.phone)
        .bind(&update.department)
        .bind(&update.role)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| from_sqlx_write_error(e, &update.email))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }

    async fn update_password(&self, id: i64, password: &str) -> StorageResult<()> {
        let result = sqlx::query(
            r"UPDATE employees SET
                password = ?, updated_at = strftime('%Y-%m-%d %H:%M:%f', 'now')
            WHERE id = ?",
        )
        .bind(password)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(from_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }

    async fn delete(&self, id: i64) -> StorageResult<()> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(from_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }

    async fn get_by_id(&self, id: i64) -> StorageResult<Option<Employee>> {
        let row: Option<EmployeeRow> = sqlx::query_as("SELECT * FROM employees WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(from_sqlx_error)?;

        Ok(row.map(Employee::from))
    }

    async fn get_by_email(&self, email: &str) -> StorageResult<Option<Employee>> {
        let row: Option<EmployeeRow> = sqlx::query_as("SELECT * FROM employees WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(from_sqlx_error)?;

        Ok(row.map(Employee::from))
    }

    async fn count_by_email(&self, email: &str) -> StorageResult<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM employees WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(from_sqlx_error)?;

        #[allow(clippy::cast_sign_loss)]
        Ok(count as u64)
    }

    async fn search(&self, criteria: &EmployeeSearchCriteria) -> StorageResult<Vec<Employee>> {
        let mut query: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new("SELECT * FROM employees WHERE 1=1");

        for (column, value) in criteria.filters() {
            query
                .push(" AND ")
                .push(column)
                .push(" LIKE ")
                .push_bind(contains_pattern(value))
                .push(r" ESCAPE '\'");
        }
        query.push(" ORDER BY created_at DESC, id DESC");

        let rows: Vec<EmployeeRow> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(from_sqlx_error)?;

        Ok(rows.into_iter().map(Employee::from).collect())
    }

    async fn count(&self) -> StorageResult<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM employees")
            .fetch_one(&self.pool)
            .await
            .map_err(from_sqlx_error)?;

        #[allow(clippy::cast_sign_loss)]
        Ok(count as u64)
    }

    async fn distinct_roles(&self) -> StorageResult<Vec<String>> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT DISTINCT role FROM employees ORDER BY role")
                .fetch_all(&self.pool)
                .await
                .map_err(from_sqlx_error)?;

        Ok(rows.into_iter().map(|(role,)| role).collect())
    }
}

#[cfg(test)]
mod tests {
    use ems_model::roles;

    use super::*;
    use crate::pool::{SqliteStore, StoreConfig};

    async fn open_store() -> (tempfile::TempDir, SqliteStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::open(&StoreConfig::new(dir.path().join("employees.sqlite")))
            .await
            .unwrap();
        (dir, store)
    }

    #[test]
    fn pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("IT"), "%IT%");
        assert_eq!(contains_pattern("50%_off"), r"%50\%\_off%");
        assert_eq!(contains_pattern(r"a\b"), r"%a\\b%");
    }

    #[tokio::test]
    async fn create_then_read_back() {
        let (_dir, store) = open_store().await;
        let employees = store.employees();

        let request = NewEmployee::new("Grace Hopper", "grace@company.com", "cobol", roles::ADMIN)
            .with_department("Research");
        let id = employees.create(&request).await.unwrap();

        let employee = employees.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(employee.id, id);
        assert_eq!(employee.email, "grace@company.com");
        assert_eq!(employee.password, "cobol");
        assert_eq!(employee.department.as_deref(), Some("Research"));
        assert_eq!(employee.phone, None);
        assert!(employee.created_at <= employee.updated_at);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let (_dir, store) = open_store().await;
        let employees = store.employees();
        let before = employees.count().await.unwrap();

        let request = NewEmployee::new("Impostor", "sarah@company.com", "pw", roles::HR);
        let err = employees.create(&request).await.unwrap_err();

        assert!(err.is_duplicate());
        assert_eq!(employees.count().await.unwrap(), before);
        assert_eq!(employees.count_by_email("sarah@company.com").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn unique_index_backs_the_email_check() {
        let (_dir, store) = open_store().await;
        let employees = store.employees();

        let sarah = employees
            .get_by_email("sarah@company.com")
            .await
            .unwrap()
            .unwrap();
        let admin = employees
            .get_by_email("admin@company.com")
            .await
            .unwrap()
            .unwrap();

        let mut update = EmployeeUpdate::from_existing(&admin);
        update.email = sarah.email.clone();
        let err = employees.update(admin.id, &update).await.unwrap_err();
        assert!(err.is_duplicate());
    }

    #[tokio::test]
    async fn search_filters_and_orders() {
        let (_dir, store) = open_store().await;
        let employees = store.employees();

        let it = employees
            .search(&EmployeeSearchCriteria::new().department("it"))
            .await
            .unwrap();
        assert!(!it.is_empty());
        assert!(it
            .iter()
            .all(|e| e.department.as_deref().is_some_and(|d| d.eq_ignore_ascii_case("IT"))));
        assert!(it.windows(2).all(|w| w[0].created_at >= w[1].created_at));

        let none = employees
            .search(&EmployeeSearchCriteria::new().name("%"))
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn update_and_delete_missing_rows() {
        let (_dir, store) = open_store().await;
        let employees = store.employees();

        let update = EmployeeUpdate {
            name: "Nobody".to_string(),
            email: "nobody@company.com".to_string(),
            role: roles::EMPLOYEE.to_string(),
            ..Default::default()
        };
        assert!(employees.update(9_999, &update).await.unwrap_err().is_not_found());
        assert!(employees
            .update_password(9_999, "pw")
            .await
            .unwrap_err()
            .is_not_found());
        assert!(employees.delete(9_999).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn distinct_roles_are_sorted() {
        let (_dir, store) = open_store().await;

        let roles = store.employees().distinct_roles().await.unwrap();
        assert_eq!(roles, vec!["ADMIN", "EMPLOYEE", "HR", "MANAGER"]);
    }
}
