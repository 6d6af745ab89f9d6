//! Permission labels.
//!
//! Permissions are the role names granted to a principal after its
//! employee role has been mapped. Realm-level permissions come from the
//! employee role; client-level permissions are granted to the API client.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A permission label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    /// Unrestricted access.
    FullAccess,
    /// Read employee records.
    ReadEmployees,
    /// Create employee records.
    CreateEmployees,
    /// Update employee records.
    UpdateEmployees,
    /// Delete employee records.
    DeleteEmployees,
    /// Client-level read access.
    ClientRead,
    /// Client-level write access.
    ClientWrite,
}

impl Permission {
    /// All permissions, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::FullAccess,
        Self::ReadEmployees,
        Self::CreateEmployees,
        Self::UpdateEmployees,
        Self::DeleteEmployees,
        Self::ClientRead,
        Self::ClientWrite,
    ];

    /// Returns the label for this permission.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FullAccess => "FULL_ACCESS",
            Self::ReadEmployees => "READ_EMPLOYEES",
            Self::CreateEmployees => "CREATE_EMPLOYEES",
            Self::UpdateEmployees => "UPDATE_EMPLOYEES",
            Self::DeleteEmployees => "DELETE_EMPLOYEES",
            Self::ClientRead => "CLIENT_READ",
            Self::ClientWrite => "CLIENT_WRITE",
        }
    }

    /// Checks if this is a client-level permission.
    #[must_use]
    pub const fn is_client_level(&self) -> bool {
        matches!(self, Self::ClientRead | Self::ClientWrite)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown permission: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_parse_back() {
        for permission in Permission::ALL {
            assert_eq!(permission.as_str().parse::<Permission>(), Ok(permission));
        }
        assert_eq!("read_employees".parse(), Ok(Permission::ReadEmployees));
        assert!("SUPERUSER".parse::<Permission>().is_err());
    }

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_string(&Permission::DeleteEmployees).unwrap();
        assert_eq!(json, "\"DELETE_EMPLOYEES\"");
    }
}
