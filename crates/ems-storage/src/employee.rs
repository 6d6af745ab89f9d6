//! Employee storage provider trait.

use async_trait::async_trait;
use ems_model::{Employee, EmployeeUpdate, NewEmployee};

use crate::error::StorageResult;

/// Provider for employee storage operations.
///
/// Implementations must be thread-safe.
#[async_trait]
pub trait EmployeeProvider: Send + Sync {
    /// Creates a new employee and returns its generated ID.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::Duplicate` if an employee with the same email exists.
    async fn create(&self, employee: &NewEmployee) -> StorageResult<i64>;

    /// Replaces the profile fields of an existing employee.
    ///
    /// The password is not touched; see [`EmployeeProvider::update_password`].
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::NotFound` if the employee doesn't exist.
    async fn update(&self, id: i64, update: &EmployeeUpdate) -> StorageResult<()>;

    /// Replaces the stored password of an employee.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::NotFound` if the employee doesn't exist.
    async fn update_password(&self, id: i64, password: &str) -> StorageResult<()>;

    /// Deletes an employee by ID.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::NotFound` if the employee doesn't exist.
    async fn delete(&self, id: i64) -> StorageResult<()>;

    /// Gets an employee by ID.
    async fn get_by_id(&self, id: i64) -> StorageResult<Option<Employee>>;

    /// Gets an employee by exact email.
    async fn get_by_email(&self, email: &str) -> StorageResult<Option<Employee>>;

    /// Counts employees with the exact email.
    async fn count_by_email(&self, email: &str) -> StorageResult<u64>;

    /// Searches for employees matching criteria, most recently created first.
    async fn search(&self, criteria: &EmployeeSearchCriteria) -> StorageResult<Vec<Employee>>;

    /// Counts all employees.
    async fn count(&self) -> StorageResult<u64>;

    /// Lists the distinct role labels in use.
    async fn distinct_roles(&self) -> StorageResult<Vec<String>>;
}

/// Search criteria for employees.
///
/// Every filter is an optional substring match; present filters are
/// combined conjunctively. Blank filters are treated as absent.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EmployeeSearchCriteria {
    /// Filter by name (substring).
    pub name: Option<String>,
    /// Filter by email (substring).
    pub email: Option<String>,
    /// Filter by department (substring).
    pub department: Option<String>,
    /// Filter by role (substring).
    pub role: Option<String>,
}

impl EmployeeSearchCriteria {
    /// Creates empty search criteria (matches every employee).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            name: None,
            email: None,
            department: None,
            role: None,
        }
    }

    /// Filters by name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Filters by email.
    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Filters by department.
    #[must_use]
    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Filters by role.
    #[must_use]
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Returns the effective filters as `(column, value)` pairs.
    ///
    /// Blank values are skipped.
    #[must_use]
    pub fn filters(&self) -> Vec<(&'static str, &str)> {
        [
            ("name", self.name.as_deref()),
            ("email", self.email.as_deref()),
            ("department", self.department.as_deref()),
            ("role", self.role.as_deref()),
        ]
        .into_iter()
        .filter_map(|(column, value)| {
            value
                .filter(|v| !v.trim().is_empty())
                .map(|v| (column, v))
        })
        .collect()
    }

    /// Checks if no effective filter is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters().is_empty()
    }

    /// Checks whether an employee satisfies every filter.
    ///
    /// Matching is ASCII case-insensitive, like SQL `LIKE` on SQLite.
    #[must_use]
    pub fn matches(&self, employee: &Employee) -> bool {
        self.filters().into_iter().all(|(column, needle)| {
            let haystack = match column {
                "name" => Some(employee.name.as_str()),
                "email" => Some(employee.email.as_str()),
                "department" => employee.department.as_deref(),
                _ => Some(employee.role.as_str()),
            };
            haystack.is_some_and(|h| {
                h.to_ascii_lowercase()
                    .contains(&needle.to_ascii_lowercase())
            })
        })
    }
}
