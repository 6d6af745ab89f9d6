//! Mock access token claims.
//!
//! The claims mirror the shape of a Keycloak access token: realm roles
//! under `realm_access` and per-client roles under `resource_access`.
//! Nothing is signed; the claims are only rendered for inspection.

use std::collections::BTreeMap;

use ems_model::Permission;
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, AuthResult};
use crate::roles::client_permissions;

/// Client that the mock tokens are issued for.
pub const DEFAULT_CLIENT_ID: &str = "employee-api-client";

/// Bearer token handed out by the simulated login endpoint.
pub const MOCK_BEARER_TOKEN: &str = "Bearer eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCJ9...";

/// Access token claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (the employee email).
    pub sub: String,
    /// Email address.
    pub email: String,
    /// Full name.
    pub name: String,
    /// Realm-level roles.
    pub realm_access: RealmAccess,
    /// Client-level roles, keyed by client id.
    pub resource_access: BTreeMap<String, ResourceAccess>,
}

/// Realm access claim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealmAccess {
    /// Realm role names.
    pub roles: Vec<String>,
}

/// Resource (client) access claim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceAccess {
    /// Client role names.
    pub roles: Vec<String>,
}

impl TokenClaims {
    /// Creates claims for a subject with no roles.
    #[must_use]
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        let email = email.into();
        Self {
            sub: email.clone(),
            email,
            name: name.into(),
            realm_access: RealmAccess::default(),
            resource_access: BTreeMap::new(),
        }
    }

    /// Sets the realm roles.
    #[must_use]
    pub fn with_realm_roles(mut self, permissions: &[Permission]) -> Self {
        self.realm_access.roles = labels(permissions);
        self
    }

    /// Adds roles for a client.
    #[must_use]
    pub fn with_client_roles(
        mut self,
        client_id: impl Into<String>,
        permissions: &[Permission],
    ) -> Self {
        self.resource_access.insert(
            client_id.into(),
            ResourceAccess {
                roles: labels(permissions),
            },
        );
        self
    }

    /// Adds the standard client-level roles for `client_id`.
    #[must_use]
    pub fn with_default_client_roles(self, client_id: impl Into<String>) -> Self {
        self.with_client_roles(client_id, &client_permissions())
    }

    /// Checks if the realm or any client grants `role`.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.realm_access.roles.iter().any(|r| r == role)
            || self
                .resource_access
                .values()
                .any(|access| access.roles.iter().any(|r| r == role))
    }

    /// Collects every granted permission, realm and client level.
    ///
    /// Unknown role names are ignored.
    #[must_use]
    pub fn permissions(&self) -> Vec<Permission> {
        let mut permissions: Vec<Permission> = self
            .realm_access
            .roles
            .iter()
            .chain(self.resource_access.values().flat_map(|a| a.roles.iter()))
            .filter_map(|role| role.parse().ok())
            .collect();
        permissions.sort_unstable();
        permissions.dedup();
        permissions
    }

    /// Renders the claims as JSON indented by four spaces.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_pretty_json(&self) -> AuthResult<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        String::from_utf8(buf).map_err(|e| AuthError::Internal(e.to_string()))
    }
}

fn labels(permissions: &[Permission]) -> Vec<String> {
    permissions.iter().map(ToString::to_string).collect()
}
