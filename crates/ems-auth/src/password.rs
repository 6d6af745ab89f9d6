//! Stored password classification, verification and hashing.
//!
//! Employee rows may hold a password in one of three shapes:
//! - plain text, compared verbatim
//! - a bcrypt hash (`$2a$`, `$2b$`, `$2y$`)
//! - an Argon2 PHC string (`$argon2id$...`), written by `ems employee create --hash`
//!
//! Bcrypt hashes are either checked for real or, in the default
//! [`HashedPasswordMode::Simulated`] mode, accepted only for one
//! well-known demonstration account.

use std::fmt;
use std::str::FromStr;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, AuthResult};

/// Email of the account accepted by simulated bcrypt validation.
pub const SIMULATED_EMAIL: &str = "user2@company.com";

/// Password accepted for [`SIMULATED_EMAIL`] by simulated bcrypt validation.
pub const SIMULATED_PASSWORD: &str = "password123";

/// How bcrypt-hashed stored passwords are validated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashedPasswordMode {
    /// Accept only the hard-coded demonstration pair.
    #[default]
    Simulated,
    /// Run a real bcrypt verification.
    Bcrypt,
}

impl HashedPasswordMode {
    /// Returns the mode name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Simulated => "simulated",
            Self::Bcrypt => "bcrypt",
        }
    }
}

impl fmt::Display for HashedPasswordMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashedPasswordMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "simulated" => Ok(Self::Simulated),
            "bcrypt" => Ok(Self::Bcrypt),
            other => Err(format!(
                "unknown password mode: {other}. Supported: simulated, bcrypt"
            )),
        }
    }
}

/// A stored password, classified by its format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoredPassword<'a> {
    /// A bcrypt hash.
    Bcrypt(&'a str),
    /// An Argon2 PHC string.
    Argon2(&'a str),
    /// Plain text.
    Plain(&'a str),
}

impl<'a> StoredPassword<'a> {
    /// Classifies a stored password by its prefix.
    #[must_use]
    pub fn classify(stored: &'a str) -> Self {
        if stored.starts_with("$argon2") {
            Self::Argon2(stored)
        } else if stored.starts_with("$2") {
            Self::Bcrypt(stored)
        } else {
            Self::Plain(stored)
        }
    }

    /// Checks if the password is stored hashed.
    #[must_use]
    pub const fn is_hashed(&self) -> bool {
        !matches!(self, Self::Plain(_))
    }
}

/// Checks candidate passwords against stored ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordValidator {
    mode: HashedPasswordMode,
}

impl PasswordValidator {
    /// Creates a validator using the given bcrypt mode.
    #[must_use]
    pub const fn new(mode: HashedPasswordMode) -> Self {
        Self { mode }
    }

    /// Gets the bcrypt mode.
    #[must_use]
    pub const fn mode(&self) -> HashedPasswordMode {
        self.mode
    }

    /// Checks whether `candidate` matches the password stored for `email`.
    ///
    /// Malformed hashes never match.
    #[must_use]
    pub fn matches(&self, email: &str, stored: &str, candidate: &str) -> bool {
        match StoredPassword::classify(stored) {
            StoredPassword::Bcrypt(hash) => match self.mode {
                HashedPasswordMode::Simulated => {
                    email == SIMULATED_EMAIL && candidate == SIMULATED_PASSWORD
                }
                HashedPasswordMode::Bcrypt => bcrypt::verify(candidate, hash).unwrap_or(false),
            },
            StoredPassword::Argon2(hash) => PasswordHasherService::with_defaults()
                .verify(candidate, hash)
                .is_ok(),
            StoredPassword::Plain(plain) => plain == candidate,
        }
    }
}

/// Argon2 hashing configuration.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    /// Memory cost in KiB.
    pub memory_cost: u32,
    /// Time cost (iterations).
    pub time_cost: u32,
    /// Parallelism factor.
    pub parallelism: u32,
    /// Output hash length.
    pub hash_length: u32,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        // OWASP recommended settings for Argon2id
        Self {
            memory_cost: 19 * 1024,
            time_cost: 2,
            parallelism: 1,
            hash_length: 32,
        }
    }
}

impl PasswordPolicy {
    /// Creates a new password policy with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the memory cost in KiB.
    #[must_use]
    pub const fn memory_cost(mut self, kib: u32) -> Self {
        self.memory_cost = kib;
        self
    }

    /// Sets the time cost (iterations).
    #[must_use]
    pub const fn time_cost(mut self, iterations: u32) -> Self {
        self.time_cost = iterations;
        self
    }

    fn build_params(&self) -> Result<Params, argon2::Error> {
        Params::new(
            self.memory_cost,
            self.time_cost,
            self.parallelism,
            Some(self.hash_length as usize),
        )
    }
}

/// Password hasher using Argon2id.
#[derive(Debug, Clone)]
pub struct PasswordHasherService {
    policy: PasswordPolicy,
}

impl PasswordHasherService {
    /// Creates a new password hasher with the given policy.
    #[must_use]
    pub const fn new(policy: PasswordPolicy) -> Self {
        Self { policy }
    }

    /// Creates a new password hasher with default policy.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(PasswordPolicy::default())
    }

    /// Hashes a password into a PHC string.
    ///
    /// # Errors
    ///
    /// Returns an error if hashing fails.
    pub fn hash(&self, password: &str) -> AuthResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let params = self
            .policy
            .build_params()
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    /// Verifies a password against a PHC string.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if verification fails.
    pub fn verify(&self, password: &str, hash: &str) -> AuthResult<()> {
        let parsed = PasswordHash::new(hash).map_err(|e| AuthError::Internal(e.to_string()))?;

        // The parameters are read from the PHC string, not the policy.
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| AuthError::InvalidCredentials)
    }
}
