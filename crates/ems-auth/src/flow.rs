//! Login flow state machine.
//!
//! Type-safe state machine for the provider login flow, ensuring the
//! steps run in order: identify the employee, verify the password, then
//! issue the attribute bundle and token claims.

use uuid::Uuid;

use crate::claims::TokenClaims;
use crate::error::AuthError;
use crate::user::{EmployeeUser, UserAttributes};

/// Login flow states.
pub mod states {
    use crate::error::AuthError;
    use crate::user::EmployeeUser;

    /// Initial state - only the login email is known.
    #[derive(Debug, Clone, Copy)]
    pub struct Initial;

    /// Identified state - the employee was found.
    #[derive(Debug, Clone)]
    pub struct Identified {
        pub(crate) user: EmployeeUser,
    }

    /// Authenticated state - the password matched.
    #[derive(Debug, Clone)]
    pub struct Authenticated {
        pub(crate) user: EmployeeUser,
    }

    /// Failed state - the flow stopped.
    #[derive(Debug)]
    pub struct Failed {
        pub(crate) error: AuthError,
    }
}

/// Login flow context.
///
/// The generic parameter `S` represents the current state.
#[derive(Debug)]
pub struct LoginFlow<S> {
    session_id: Uuid,
    email: String,
    state: S,
}

impl<S> LoginFlow<S> {
    /// Gets the session ID for this flow.
    #[must_use]
    pub const fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Gets the login email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    fn advance<T>(self, state: T) -> LoginFlow<T> {
        LoginFlow {
            session_id: self.session_id,
            email: self.email,
            state,
        }
    }

    fn fail(self, error: AuthError) -> LoginFlow<states::Failed> {
        self.advance(states::Failed { error })
    }
}

impl LoginFlow<states::Initial> {
    /// Starts a login flow for `email`.
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            session_id: Uuid::now_v7(),
            email: email.into(),
            state: states::Initial,
        }
    }

    /// Records the lookup result.
    ///
    /// # Errors
    ///
    /// Fails the flow with `AuthError::UserNotFound` if no employee was found.
    pub fn identify(
        self,
        user: Option<EmployeeUser>,
    ) -> Result<LoginFlow<states::Identified>, LoginFlow<states::Failed>> {
        match user {
            Some(user) => Ok(self.advance(states::Identified { user })),
            None => Err(self.fail(AuthError::UserNotFound)),
        }
    }
}

impl LoginFlow<states::Identified> {
    /// Gets the identified user.
    #[must_use]
    pub const fn user(&self) -> &EmployeeUser {
        &self.state.user
    }

    /// Records the password check result.
    ///
    /// # Errors
    ///
    /// Fails the flow with `AuthError::InvalidCredentials` if the password did not match.
    pub fn verify(
        self,
        password_matches: bool,
    ) -> Result<LoginFlow<states::Authenticated>, LoginFlow<states::Failed>> {
        if password_matches {
            let LoginFlow {
                session_id,
                email,
                state: states::Identified { user },
            } = self;
            Ok(LoginFlow {
                session_id,
                email,
                state: states::Authenticated { user },
            })
        } else {
            Err(self.fail(AuthError::InvalidCredentials))
        }
    }
}

impl LoginFlow<states::Authenticated> {
    /// Gets the authenticated user.
    #[must_use]
    pub const fn user(&self) -> &EmployeeUser {
        &self.state.user
    }

    /// Completes the flow, issuing attributes and claims for `client_id`.
    #[must_use]
    pub fn complete(self, client_id: &str) -> AuthenticatedSession {
        let user = self.state.user;
        let claims = TokenClaims::new(user.email(), &user.employee().name)
            .with_realm_roles(user.permissions())
            .with_default_client_roles(client_id);

        AuthenticatedSession {
            session_id: self.session_id,
            attributes: user.attributes(),
            claims,
            user,
        }
    }
}

impl LoginFlow<states::Failed> {
    /// Gets the failure reason.
    #[must_use]
    pub const fn error(&self) -> &AuthError {
        &self.state.error
    }

    /// Consumes the flow, returning the failure reason.
    #[must_use]
    pub fn into_error(self) -> AuthError {
        self.state.error
    }
}

/// Outcome of a successful login.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    /// Session ID of the flow.
    pub session_id: Uuid,
    /// The authenticated user.
    pub user: EmployeeUser,
    /// Attribute bundle.
    pub attributes: UserAttributes,
    /// Mock access token claims.
    pub claims: TokenClaims,
}
