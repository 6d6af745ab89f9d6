//! Command implementations.

pub mod auth;
pub mod config;
pub mod employee;
pub mod simulate;

pub use auth::run_auth;
pub use config::run_config;
pub use employee::run_employee;
pub use simulate::run_simulate;

use std::path::PathBuf;

use ems_api::{EmployeeService, Principal};
use ems_auth::{EmployeeUserStorageProvider, EmployeeUserStorageProviderFactory, ProviderConfig};
use ems_storage_sql::{SqliteEmployeeProvider, SqliteStore, StoreConfig};

use crate::cli::Cli;
use crate::config::OutputFormat;
use crate::CliConfig;

/// Username recorded for calls made from the command line.
const CLI_USERNAME: &str = "ems-cli";

/// Settings shared by every command, resolved from flags and config.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// SQLite database file.
    pub database: PathBuf,
    /// Output format.
    pub output: OutputFormat,
    /// Caller used for service authorization.
    pub caller: Principal,
    /// Configuration handed to the user storage provider.
    pub provider_config: ProviderConfig,
}

impl CommandContext {
    /// Resolves the context; flags take precedence over the config file.
    #[must_use]
    pub fn new(cli: &Cli, config: &CliConfig) -> Self {
        let provider_config = ProviderConfig::default()
            .password_mode(config.effective_password_mode(cli.password_mode))
            .client_id(config.client_id.clone());

        Self {
            database: config.effective_database(cli.database.as_deref()),
            output: config.effective_output(cli.output),
            caller: Principal::from_role(CLI_USERNAME, &cli.as_role),
            provider_config,
        }
    }

    /// Opens the store, applying migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated.
    pub async fn open_store(&self) -> crate::CliResult<SqliteStore> {
        tracing::debug!(path = %self.database.display(), "Opening employee store");
        Ok(SqliteStore::open(&StoreConfig::new(&self.database)).await?)
    }

    /// Creates the employee service over `store`.
    #[must_use]
    pub fn service(&self, store: &SqliteStore) -> EmployeeService<SqliteEmployeeProvider> {
        EmployeeService::new(store.employees())
    }

    /// Creates the user storage provider over `store`.
    #[must_use]
    pub fn provider(
        &self,
        store: &SqliteStore,
    ) -> EmployeeUserStorageProvider<SqliteEmployeeProvider> {
        EmployeeUserStorageProviderFactory::new(self.provider_config.clone())
            .create(store.employees())
    }
}
