//! Employee user storage provider.
//!
//! Federates employees into the identity server: users are looked up by
//! email in the employee store, their passwords are validated in place and
//! their roles are mapped to permissions on the fly. Nothing is imported
//! or cached.

use ems_model::{Employee, Permission};
use ems_storage::EmployeeProvider;

use crate::claims::DEFAULT_CLIENT_ID;
use crate::error::AuthResult;
use crate::flow::{AuthenticatedSession, LoginFlow};
use crate::password::{HashedPasswordMode, PasswordValidator};
use crate::roles::map_role_to_permissions;
use crate::user::{EmployeeUser, StorageId};

/// Provider identifier registered with the identity server.
pub const PROVIDER_ID: &str = "employee-user-storage";

/// Help text shown for the provider.
pub const PROVIDER_HELP_TEXT: &str =
    "Employee User Storage Provider - Authenticates users against SQLite employee database";

/// The only credential type the provider validates.
pub const PASSWORD_CREDENTIAL_TYPE: &str = "password";

// ============================================================================
// Provider Traits
// ============================================================================

/// Trait for user lookup in an external store.
#[allow(async_fn_in_trait)]
pub trait UserStorageProvider: Send + Sync {
    /// Returns the provider identifier.
    fn provider_id(&self) -> &'static str;

    /// Gets a user by storage id (`f:{component}:{email}` or a bare email).
    async fn get_user_by_id(&self, id: &str) -> AuthResult<Option<EmployeeUser>>;

    /// Gets a user by username.
    async fn get_user_by_username(&self, username: &str) -> AuthResult<Option<EmployeeUser>>;

    /// Gets a user by email.
    async fn get_user_by_email(&self, email: &str) -> AuthResult<Option<EmployeeUser>>;
}

/// Trait for validating credentials held by an external store.
#[allow(async_fn_in_trait)]
pub trait CredentialValidator: Send + Sync {
    /// Checks if the credential type is handled.
    fn supports_credential_type(&self, credential_type: &str) -> bool;

    /// Checks if the user has a credential of the given type.
    async fn is_configured_for(
        &self,
        user: &EmployeeUser,
        credential_type: &str,
    ) -> AuthResult<bool>;

    /// Validates a credential for the user.
    ///
    /// Unsupported credential types are never valid.
    async fn is_valid(
        &self,
        user: &EmployeeUser,
        credential_type: &str,
        challenge: &str,
    ) -> AuthResult<bool>;
}

// ============================================================================
// Employee Provider
// ============================================================================

/// Provider configuration.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Component id used in storage ids.
    pub component_id: String,
    /// How bcrypt-hashed passwords are validated.
    pub password_mode: HashedPasswordMode,
    /// Client the token claims are issued for.
    pub client_id: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            component_id: PROVIDER_ID.to_string(),
            password_mode: HashedPasswordMode::default(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
        }
    }
}

impl ProviderConfig {
    /// Sets the bcrypt validation mode.
    #[must_use]
    pub const fn password_mode(mut self, mode: HashedPasswordMode) -> Self {
        self.password_mode = mode;
        self
    }

    /// Sets the client id.
    #[must_use]
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }
}

/// User storage provider backed by the employee store.
#[derive(Debug, Clone)]
pub struct EmployeeUserStorageProvider<P> {
    employees: P,
    config: ProviderConfig,
    validator: PasswordValidator,
}

impl<P: EmployeeProvider> EmployeeUserStorageProvider<P> {
    /// Creates a provider over an employee store.
    #[must_use]
    pub fn new(employees: P, config: ProviderConfig) -> Self {
        let validator = PasswordValidator::new(config.password_mode);
        Self {
            employees,
            config,
            validator,
        }
    }

    /// Gets the provider configuration.
    #[must_use]
    pub const fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Gets the underlying employee store.
    #[must_use]
    pub const fn employees(&self) -> &P {
        &self.employees
    }

    /// Finds an employee by exact email, password included.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn find_by_email(&self, email: &str) -> AuthResult<Option<Employee>> {
        tracing::debug!(email, "Looking up employee");
        Ok(self.employees.get_by_email(email).await?)
    }

    /// Counts employees with the exact email.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn count_by_email(&self, email: &str) -> AuthResult<u64> {
        Ok(self.employees.count_by_email(email).await?)
    }

    /// Checks a candidate password for the employee with `email`.
    ///
    /// Unknown emails never validate.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn validate_password(&self, email: &str, candidate: &str) -> AuthResult<bool> {
        let Some(employee) = self.find_by_email(email).await? else {
            tracing::debug!(email, "Password check for unknown employee");
            return Ok(false);
        };
        Ok(self
            .validator
            .matches(&employee.email, &employee.password, candidate))
    }

    /// Lists every role in use with the permissions it maps to.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn role_mappings(&self) -> AuthResult<Vec<(String, Vec<Permission>)>> {
        let roles = self.employees.distinct_roles().await?;
        Ok(roles
            .into_iter()
            .map(|role| {
                let permissions = map_role_to_permissions(&role);
                (role, permissions)
            })
            .collect())
    }

    /// Runs the login flow: lookup, password check, role mapping, claims.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` or `AuthError::InvalidCredentials`
    /// when the login is refused, or a storage error.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> AuthResult<AuthenticatedSession> {
        let flow = LoginFlow::new(email);
        let user = self.get_user_by_email(email).await?;

        let identified = match flow.identify(user) {
            Ok(identified) => identified,
            Err(failed) => {
                tracing::warn!(email, error = %failed.error(), "Login refused");
                return Err(failed.into_error());
            }
        };

        let employee = identified.user().employee();
        let matches = self
            .validator
            .matches(&employee.email, &employee.password, password);

        match identified.verify(matches) {
            Ok(authenticated) => {
                let session = authenticated.complete(&self.config.client_id);
                tracing::info!(
                    email,
                    session_id = %session.session_id,
                    "Login successful"
                );
                Ok(session)
            }
            Err(failed) => {
                tracing::warn!(email, error = %failed.error(), "Login refused");
                Err(failed.into_error())
            }
        }
    }

    fn adapt(&self, employee: Option<Employee>) -> Option<EmployeeUser> {
        employee.map(|e| EmployeeUser::new(e, &self.config.component_id))
    }
}

impl<P: EmployeeProvider> UserStorageProvider for EmployeeUserStorageProvider<P> {
    fn provider_id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_user_by_id(&self, id: &str) -> AuthResult<Option<EmployeeUser>> {
        let storage_id = StorageId::parse(id);
        self.get_user_by_email(storage_id.external_id()).await
    }

    async fn get_user_by_username(&self, username: &str) -> AuthResult<Option<EmployeeUser>> {
        self.get_user_by_email(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> AuthResult<Option<EmployeeUser>> {
        let employee = self.find_by_email(email).await?;
        Ok(self.adapt(employee))
    }
}

impl<P: EmployeeProvider> CredentialValidator for EmployeeUserStorageProvider<P> {
    fn supports_credential_type(&self, credential_type: &str) -> bool {
        credential_type == PASSWORD_CREDENTIAL_TYPE
    }

    async fn is_configured_for(
        &self,
        user: &EmployeeUser,
        credential_type: &str,
    ) -> AuthResult<bool> {
        if !self.supports_credential_type(credential_type) {
            return Ok(false);
        }
        let employee = self.find_by_email(user.email()).await?;
        Ok(employee.is_some_and(|e| e.has_password()))
    }

    async fn is_valid(
        &self,
        user: &EmployeeUser,
        credential_type: &str,
        challenge: &str,
    ) -> AuthResult<bool> {
        if !self.supports_credential_type(credential_type) {
            tracing::debug!(credential_type, "Unsupported credential type");
            return Ok(false);
        }

        let valid = self.validate_password(user.email(), challenge).await?;
        if valid {
            tracing::info!(email = user.email(), "Credential validated");
        } else {
            tracing::warn!(email = user.email(), "Credential rejected");
        }
        Ok(valid)
    }
}

// ============================================================================
// Factory
// ============================================================================

/// Factory creating employee user storage providers.
#[derive(Debug, Clone, Default)]
pub struct EmployeeUserStorageProviderFactory {
    config: ProviderConfig,
}

impl EmployeeUserStorageProviderFactory {
    /// Creates a factory handing `config` to every provider.
    #[must_use]
    pub const fn new(config: ProviderConfig) -> Self {
        Self { config }
    }

    /// Returns the provider identifier.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    /// Returns the provider help text.
    #[must_use]
    pub const fn help_text(&self) -> &'static str {
        PROVIDER_HELP_TEXT
    }

    /// Creates a provider over an employee store.
    #[must_use]
    pub fn create<P: EmployeeProvider>(&self, employees: P) -> EmployeeUserStorageProvider<P> {
        EmployeeUserStorageProvider::new(employees, self.config.clone())
    }
}
