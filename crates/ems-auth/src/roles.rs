//! Employee role to permission mapping.

use ems_model::{roles, Permission};

/// Maps an employee role to the realm-level permissions it grants.
///
/// Matching is case-insensitive. Unknown roles get read-only access, so
/// the result is never empty.
#[must_use]
pub fn map_role_to_permissions(role: &str) -> Vec<Permission> {
    let role = role.trim();
    if role.eq_ignore_ascii_case(roles::ADMIN) {
        vec![Permission::FullAccess]
    } else if role.eq_ignore_ascii_case(roles::MANAGER) {
        vec![
            Permission::ReadEmployees,
            Permission::CreateEmployees,
            Permission::UpdateEmployees,
        ]
    } else if role.eq_ignore_ascii_case(roles::HR) {
        vec![
            Permission::ReadEmployees,
            Permission::CreateEmployees,
            Permission::UpdateEmployees,
            Permission::DeleteEmployees,
        ]
    } else {
        vec![Permission::ReadEmployees]
    }
}

/// Client-level permissions granted to the API client.
#[must_use]
pub fn client_permissions() -> Vec<Permission> {
    vec![Permission::ClientRead, Permission::ClientWrite]
}
