//! CLI configuration.

use std::path::{Path, PathBuf};

use ems_auth::{HashedPasswordMode, DEFAULT_CLIENT_ID};
use ems_storage_sql::pool::DEFAULT_DATABASE_PATH;
use serde::{Deserialize, Serialize};

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Output format.
    #[serde(default)]
    pub output_format: OutputFormat,

    /// How bcrypt-hashed passwords are validated.
    #[serde(default)]
    pub password_mode: HashedPasswordMode,

    /// Client the mock tokens are issued for.
    #[serde(default = "default_client_id")]
    pub client_id: String,
}

fn default_database_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATABASE_PATH)
}

fn default_client_id() -> String {
    DEFAULT_CLIENT_ID.to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            output_format: OutputFormat::default(),
            password_mode: HashedPasswordMode::default(),
            client_id: default_client_id(),
        }
    }
}

impl CliConfig {
    /// Loads configuration from the default file.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> crate::CliResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> crate::CliResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| crate::CliError::Config(format!("failed to parse config: {e}")))
    }

    /// Saves configuration to the default file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self) -> crate::CliResult<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves configuration to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, path: &Path) -> crate::CliResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::CliError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Gets the configuration file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn config_path() -> crate::CliResult<PathBuf> {
        let home = dirs_next::home_dir().ok_or_else(|| {
            crate::CliError::Config("could not determine home directory".to_string())
        })?;
        Ok(home.join(".ems").join("ems.toml"))
    }

    /// Gets the effective database path (from args or config).
    #[must_use]
    pub fn effective_database(&self, arg_database: Option<&Path>) -> PathBuf {
        arg_database.map_or_else(|| self.database_path.clone(), Path::to_path_buf)
    }

    /// Gets the effective output format (from args or config).
    #[must_use]
    pub fn effective_output(&self, arg_output: Option<OutputFormat>) -> OutputFormat {
        arg_output.unwrap_or(self.output_format)
    }

    /// Gets the effective password mode (from args or config).
    #[must_use]
    pub fn effective_password_mode(&self, arg_mode: Option<HashedPasswordMode>) -> HashedPasswordMode {
        arg_mode.unwrap_or(self.password_mode)
    }

    /// Sets a configuration value by key.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown keys or invalid values.
    pub fn set(&mut self, key: &str, value: &str) -> crate::CliResult<()> {
        match key {
            "database_path" | "database" => {
                self.database_path = PathBuf::from(value);
            }
            "output_format" | "output" => {
                self.output_format = match value.to_lowercase().as_str() {
                    "table" => OutputFormat::Table,
                    "json" => OutputFormat::Json,
                    "yaml" => OutputFormat::Yaml,
                    "quiet" => OutputFormat::Quiet,
                    _ => {
                        return Err(crate::CliError::InvalidArgument(format!(
                            "Unknown output format: {value}. Supported: table, json, yaml, quiet"
                        )));
                    }
                };
            }
            "password_mode" => {
                self.password_mode = value.parse().map_err(crate::CliError::InvalidArgument)?;
            }
            "client_id" => {
                if value.trim().is_empty() {
                    return Err(crate::CliError::InvalidArgument(
                        "client_id must not be empty".to_string(),
                    ));
                }
                self.client_id = value.to_string();
            }
            _ => {
                return Err(crate::CliError::InvalidArgument(format!(
                    "Unknown configuration key: {key}. Known keys: database_path, output_format, password_mode, client_id"
                )));
            }
        }
        Ok(())
    }
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON format.
    Json,
    /// YAML format.
    Yaml,
    /// Quiet (minimal output).
    Quiet,
}
