//! Database connection management.
//!
//! A [`SqliteStore`] owns exactly one SQLite connection for its lifetime.
//! It is opened with [`SqliteStore::open`] and released with
//! [`SqliteStore::close`]; dropping the store also releases the connection.

use std::path::{Path, PathBuf};
use std::time::Duration;

use ems_storage::{StorageError, StorageResult};
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::employee::SqliteEmployeeProvider;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Default database file, relative to the working directory.
pub const DEFAULT_DATABASE_PATH: &str = "test_db.sqlite";

/// Store configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the SQLite database file.
    pub path: PathBuf,
    /// Create the file if it does not exist.
    pub create_if_missing: bool,
    /// How long to wait on a locked database.
    pub busy_timeout: Duration,
    /// How long to wait for the connection.
    pub connect_timeout: Duration,
    /// Apply embedded migrations on open.
    pub run_migrations: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATABASE_PATH),
            create_if_missing: true,
            busy_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(30),
            run_migrations: true,
        }
    }
}

impl StoreConfig {
    /// Creates a new store configuration for the given file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Sets whether a missing file is created.
    #[must_use]
    pub const fn create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }

    /// Sets the busy timeout.
    #[must_use]
    pub const fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Sets whether migrations run on open.
    #[must_use]
    pub const fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }
}

/// Creates a single-connection SQLite pool.
///
/// # Errors
///
/// Returns an error if the database cannot be opened.
pub async fn create_pool(config: &StoreConfig) -> StorageResult<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(&config.path)
        .create_if_missing(config.create_if_missing)
        .busy_timeout(config.busy_timeout);

    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .acquire_timeout(config.connect_timeout)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .map_err(|e| StorageError::Connection(format!("{}: {e}", config.path.display())))
}

/// Applies the embedded schema and seed migrations.
///
/// # Errors
///
/// Returns an error if a migration fails.
pub async fn run_migrations(pool: &SqlitePool) -> StorageResult<()> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| StorageError::Migration(e.to_string()))
}

/// An open employee store.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
    path: PathBuf,
}

impl SqliteStore {
    /// Opens the store described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated.
    pub async fn open(config: &StoreConfig) -> StorageResult<Self> {
        let pool = create_pool(config).await?;
        if config.run_migrations {
            run_migrations(&pool).await?;
        }
        tracing::debug!(path = %config.path.display(), "Employee store opened");

        Ok(Self {
            pool,
            path: config.path.clone(),
        })
    }

    /// Returns an employee provider backed by this store.
    #[must_use]
    pub fn employees(&self) -> SqliteEmployeeProvider {
        SqliteEmployeeProvider::new(self.pool.clone())
    }

    /// Gets the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Gets the database file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Closes the store, waiting for the connection to be released.
    pub async fn close(self) {
        self.pool.close().await;
        tracing::debug!(path = %self.path.display(), "Employee store closed");
    }
}
