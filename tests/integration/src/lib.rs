//! Shared fixtures for the end-to-end tests.
//!
//! Every [`TestEnv`] owns a fresh SQLite file in a temporary directory,
//! migrated and seeded exactly as `ems` would open it.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

use ems_api::{EmployeeService, Principal};
use ems_auth::{
    EmployeeUserStorageProvider, EmployeeUserStorageProviderFactory, HashedPasswordMode,
    ProviderConfig,
};
use ems_storage_sql::{SqliteEmployeeProvider, SqliteStore, StoreConfig};
use tempfile::TempDir;

/// Test environment over a throwaway database.
pub struct TestEnv {
    /// Keeps the database directory alive.
    _dir: TempDir,
    /// The open store.
    pub store: SqliteStore,
}

impl TestEnv {
    /// Creates a new environment with a migrated, seeded database.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or the store cannot be created.
    pub async fn new() -> anyhow::Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("ems_api=debug,ems_auth=debug,sqlx=warn")
            .with_test_writer()
            .try_init();

        let dir = tempfile::tempdir()?;
        let store = SqliteStore::open(&StoreConfig::new(dir.path().join("test_db.sqlite"))).await?;
        Ok(Self { _dir: dir, store })
    }

    /// Creates the employee service.
    #[must_use]
    pub fn service(&self) -> EmployeeService<SqliteEmployeeProvider> {
        EmployeeService::new(self.store.employees())
    }

    /// Creates a user storage provider validating hashes in `mode`.
    #[must_use]
    pub fn provider(
        &self,
        mode: HashedPasswordMode,
    ) -> EmployeeUserStorageProvider<SqliteEmployeeProvider> {
        EmployeeUserStorageProviderFactory::new(ProviderConfig::default().password_mode(mode))
            .create(self.store.employees())
    }

    /// Returns a caller with full access.
    #[must_use]
    pub fn admin() -> Principal {
        Principal::from_role("admin@company.com", "ADMIN")
    }

    /// Closes the store.
    pub async fn close(self) {
        self.store.close().await;
    }
}
