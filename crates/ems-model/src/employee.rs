//! Employee domain model.
//!
//! Employees are the only entity in the system. They double as the
//! identities looked up by the user storage provider, so the record
//! carries its stored password alongside the profile fields.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// An employee record as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    // === Identity ===
    /// Store-generated identifier.
    pub id: i64,
    /// Full name.
    pub name: String,
    /// Email address, unique across employees.
    pub email: String,

    // === Credentials ===
    /// Stored password (plain text, bcrypt or Argon2 PHC string).
    #[serde(default, skip_serializing)]
    pub password: String,

    // === Profile ===
    /// Phone number.
    pub phone: Option<String>,
    /// Department name.
    pub department: Option<String>,
    /// Role label (see [`roles`]).
    pub role: String,

    // === Timestamps ===
    /// When the row was created.
    pub created_at: NaiveDateTime,
    /// When the row was last updated.
    pub updated_at: NaiveDateTime,
}

impl Employee {
    /// Gets the first token of the employee's name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }

    /// Gets everything after the first token of the name, single-spaced.
    ///
    /// Returns an empty string for single-word names.
    #[must_use]
    pub fn last_name(&self) -> String {
        self.name
            .split_whitespace()
            .skip(1)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Checks whether a non-empty password is stored.
    #[must_use]
    pub fn has_password(&self) -> bool {
        !self.password.is_empty()
    }
}

/// A field-level validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldViolation {
    /// Name of the offending field.
    pub field: &'static str,
    /// Human-readable message.
    pub message: &'static str,
}

impl FieldViolation {
    const fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Data for a new employee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    /// Full name (required).
    pub name: String,
    /// Email address (required, unique).
    pub email: String,
    /// Password, stored as given (required).
    pub password: String,
    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Department name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Role label (required).
    pub role: String,
}

impl NewEmployee {
    /// Creates a new employee request with the required fields.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            phone: None,
            department: None,
            role: role.into(),
        }
    }

    /// Sets the phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Sets the department.
    #[must_use]
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Validates required fields and the email format.
    ///
    /// Returns every violation found, in field order.
    #[must_use]
    pub fn validate(&self) -> Vec<FieldViolation> {
        let mut violations = profile_violations(&self.name, &self.email, &self.role);
        if is_blank(&self.password) {
            violations.push(FieldViolation::new("password", "Password is required"));
        }
        violations
    }
}

/// Replacement data for an existing employee.
///
/// The password is only changed when present and non-blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdate {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// New password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Department name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Role label.
    pub role: String,
}

impl EmployeeUpdate {
    /// Creates an update that copies the current values of `employee`.
    #[must_use]
    pub fn from_existing(employee: &Employee) -> Self {
        Self {
            name: employee.name.clone(),
            email: employee.email.clone(),
            password: None,
            phone: employee.phone.clone(),
            department: employee.department.clone(),
            role: employee.role.clone(),
        }
    }

    /// Returns the new password if one was supplied.
    #[must_use]
    pub fn new_password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !is_blank(p))
    }

    /// Validates required fields and the email format.
    #[must_use]
    pub fn validate(&self) -> Vec<FieldViolation> {
        profile_violations(&self.name, &self.email, &self.role)
    }
}

fn profile_violations(name: &str, email: &str, role: &str) -> Vec<FieldViolation> {
    let mut violations = Vec::new();
    if is_blank(name) {
        violations.push(FieldViolation::new("name", "Name is required"));
    }
    if is_blank(email) {
        violations.push(FieldViolation::new("email", "Email is required"));
    } else if !looks_like_email(email) {
        violations.push(FieldViolation::new("email", "Invalid email format"));
    }
    if is_blank(role) {
        violations.push(FieldViolation::new("role", "Role is required"));
    }
    violations
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
}

/// Well-known employee role labels.
///
/// The set is open: any other label is accepted and treated as the most
/// restrictive role when mapped to permissions.
pub mod roles {
    /// Full administrative access.
    pub const ADMIN: &str = "ADMIN";
    /// Can read, create and update employees.
    pub const MANAGER: &str = "MANAGER";
    /// Can read, create, update and delete employees.
    pub const HR: &str = "HR";
    /// Read-only access.
    pub const EMPLOYEE: &str = "EMPLOYEE";
}
