//! # ems-auth
//!
//! Authentication side of the employee management simulator.
//!
//! This crate plays the part of a Keycloak user storage provider backed by
//! the employee store: it looks employees up by email, validates their
//! credentials, maps employee roles to permissions and assembles the
//! attribute bundle and mock token claims a real identity server would
//! issue.
//!
//! ## Features
//!
//! - Type-safe login flow state machine
//! - Plain, bcrypt and Argon2id stored password support
//! - Static role to permission mapping
//!
//! ## Example
//!
//! ```ignore
//! use ems_auth::{EmployeeUserStorageProvider, ProviderConfig};
//!
//! let provider = EmployeeUserStorageProvider::new(store.employees(), ProviderConfig::default());
//! let session = provider.authenticate("user2@company.com", "password123").await?;
//! println!("{}", session.claims.to_pretty_json()?);
//! ```

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod claims;
pub mod error;
pub mod flow;
pub mod password;
pub mod provider;
pub mod roles;
pub mod user;

pub use claims::{RealmAccess, ResourceAccess, TokenClaims, DEFAULT_CLIENT_ID, MOCK_BEARER_TOKEN};
pub use error::{AuthError, AuthResult};
pub use flow::{states, AuthenticatedSession, LoginFlow};
pub use password::{
    HashedPasswordMode, PasswordHasherService, PasswordPolicy, PasswordValidator, StoredPassword,
};
pub use provider::{
    CredentialValidator, EmployeeUserStorageProvider, EmployeeUserStorageProviderFactory,
    ProviderConfig, UserStorageProvider,
};
pub use roles::{client_permissions, map_role_to_permissions};
pub use user::{EmployeeUser, StorageId, UserAttributes};
