//! Federated user view of an employee.

use std::fmt;

use ems_model::{Employee, Permission};
use serde::{Deserialize, Serialize};

use crate::roles::map_role_to_permissions;

/// Identifier of a user held by a storage provider.
///
/// Federated ids have the form `f:{component_id}:{external_id}`; anything
/// else is taken to be the external id itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageId {
    component_id: Option<String>,
    external_id: String,
}

impl StorageId {
    /// Creates a federated storage id.
    #[must_use]
    pub fn new(component_id: impl Into<String>, external_id: impl Into<String>) -> Self {
        Self {
            component_id: Some(component_id.into()),
            external_id: external_id.into(),
        }
    }

    /// Parses a storage id.
    #[must_use]
    pub fn parse(id: &str) -> Self {
        if let Some(rest) = id.strip_prefix("f:") {
            if let Some((component, external)) = rest.split_once(':') {
                return Self::new(component, external);
            }
        }
        Self {
            component_id: None,
            external_id: id.to_string(),
        }
    }

    /// Gets the provider component id, if federated.
    #[must_use]
    pub fn component_id(&self) -> Option<&str> {
        self.component_id.as_deref()
    }

    /// Gets the id inside the external store (the employee email).
    #[must_use]
    pub fn external_id(&self) -> &str {
        &self.external_id
    }
}

impl fmt::Display for StorageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.component_id {
            Some(component) => write!(f, "f:{component}:{}", self.external_id),
            None => f.write_str(&self.external_id),
        }
    }
}

/// Attribute bundle exposed for an authenticated employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAttributes {
    /// Username (the email).
    pub username: String,
    /// Email address.
    pub email: String,
    /// First token of the name.
    pub first_name: String,
    /// Remaining tokens of the name.
    pub last_name: String,
    /// Department.
    pub department: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Mapped permissions.
    pub roles: Vec<String>,
}

/// An employee adapted to the identity server's user model.
#[derive(Debug, Clone)]
pub struct EmployeeUser {
    employee: Employee,
    storage_id: StorageId,
    permissions: Vec<Permission>,
}

impl EmployeeUser {
    /// Adapts an employee owned by the provider component `component_id`.
    #[must_use]
    pub fn new(employee: Employee, component_id: &str) -> Self {
        let storage_id = StorageId::new(component_id, employee.email.clone());
        let permissions = map_role_to_permissions(&employee.role);
        Self {
            employee,
            storage_id,
            permissions,
        }
    }

    /// Gets the storage id.
    #[must_use]
    pub const fn storage_id(&self) -> &StorageId {
        &self.storage_id
    }

    /// Gets the username. Employees log in with their email.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.employee.email
    }

    /// Gets the email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.employee.email
    }

    /// Gets the first name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.employee.first_name()
    }

    /// Gets the last name.
    #[must_use]
    pub fn last_name(&self) -> String {
        self.employee.last_name()
    }

    /// Gets the realm permissions mapped from the employee role.
    #[must_use]
    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    /// Gets the underlying employee.
    #[must_use]
    pub const fn employee(&self) -> &Employee {
        &self.employee
    }

    /// Builds the attribute bundle.
    #[must_use]
    pub fn attributes(&self) -> UserAttributes {
        UserAttributes {
            username: self.username().to_string(),
            email: self.email().to_string(),
            first_name: self.first_name().to_string(),
            last_name: self.last_name(),
            department: self.employee.department.clone(),
            phone: self.employee.phone.clone(),
            roles: self.permissions.iter().map(ToString::to_string).collect(),
        }
    }
}
