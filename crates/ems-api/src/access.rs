//! Endpoint authorization.
//!
//! Each endpoint accepts a fixed set of permissions; a caller holding any
//! one of them is let through.

use std::fmt;

use ems_auth::{map_role_to_permissions, TokenClaims};
use ems_model::Permission;

use crate::error::{ApiError, ApiResult};

/// Employee API endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `GET /api/employees/{id}`
    GetEmployee,
    /// `GET /api/employees/search`
    SearchEmployees,
    /// `POST /api/employees/add`
    CreateEmployee,
    /// `POST /api/employees/add-Multiple`
    CreateEmployees,
    /// `POST /api/employees/bulk-upload`
    UploadEmployees,
    /// `PUT /api/employees/update/{id}`
    UpdateEmployee,
    /// `DELETE /api/employees/delete/{id}`
    DeleteEmployee,
}

impl Endpoint {
    /// Returns the permissions that grant access (any one suffices).
    #[must_use]
    pub const fn allowed_permissions(&self) -> &'static [Permission] {
        match self {
            Self::GetEmployee | Self::SearchEmployees => &[
                Permission::ReadEmployees,
                Permission::FullAccess,
                Permission::ClientRead,
            ],
            Self::CreateEmployee => &[
                Permission::CreateEmployees,
                Permission::FullAccess,
                Permission::ClientWrite,
            ],
            Self::CreateEmployees | Self::UploadEmployees => {
                &[Permission::FullAccess, Permission::ClientWrite]
            }
            Self::UpdateEmployee => &[
                Permission::UpdateEmployees,
                Permission::FullAccess,
                Permission::ClientWrite,
            ],
            Self::DeleteEmployee => &[
                Permission::DeleteEmployees,
                Permission::FullAccess,
                Permission::ClientWrite,
            ],
        }
    }

    /// Returns the HTTP method and path.
    #[must_use]
    pub const fn route(&self) -> &'static str {
        match self {
            Self::GetEmployee => "GET /api/employees/{id}",
            Self::SearchEmployees => "GET /api/employees/search",
            Self::CreateEmployee => "POST /api/employees/add",
            Self::CreateEmployees => "POST /api/employees/add-Multiple",
            Self::UploadEmployees => "POST /api/employees/bulk-upload",
            Self::UpdateEmployee => "PUT /api/employees/update/{id}",
            Self::DeleteEmployee => "DELETE /api/employees/delete/{id}",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.route())
    }
}

/// The caller of an API operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    username: String,
    permissions: Vec<Permission>,
}

impl Principal {
    /// Creates a principal with explicit permissions.
    #[must_use]
    pub fn new(username: impl Into<String>, permissions: Vec<Permission>) -> Self {
        Self {
            username: username.into(),
            permissions,
        }
    }

    /// Creates a principal holding the realm permissions of an employee role.
    #[must_use]
    pub fn from_role(username: impl Into<String>, role: &str) -> Self {
        Self::new(username, map_role_to_permissions(role))
    }

    /// Creates a principal from token claims, realm and client roles included.
    #[must_use]
    pub fn from_claims(claims: &TokenClaims) -> Self {
        Self::new(claims.sub.clone(), claims.permissions())
    }

    /// Creates an unrestricted principal for internal callers.
    #[must_use]
    pub fn system() -> Self {
        Self::new("system", vec![Permission::FullAccess])
    }

    /// Gets the username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Gets the granted permissions.
    #[must_use]
    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    /// Checks if the principal holds a specific permission.
    #[must_use]
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }

    /// Checks if the principal holds any of the specified permissions.
    #[must_use]
    pub fn has_any_permission(&self, permissions: &[Permission]) -> bool {
        permissions.iter().any(|p| self.has_permission(*p))
    }

    /// Ensures the principal may call `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Forbidden` if no allowed permission is held.
    pub fn authorize(&self, endpoint: Endpoint) -> ApiResult<()> {
        let allowed = endpoint.allowed_permissions();
        if self.has_any_permission(allowed) {
            return Ok(());
        }

        tracing::warn!(user = %self.username, %endpoint, "Access denied");
        let names: Vec<_> = allowed.iter().map(Permission::as_str).collect();
        Err(ApiError::Forbidden(format!(
            "Missing required permission (one of): {}",
            names.join(", ")
        )))
    }
}
