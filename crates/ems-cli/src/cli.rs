//! CLI argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ems_auth::HashedPasswordMode;

use crate::config::OutputFormat;

/// Employee management simulator.
#[derive(Debug, Parser)]
#[command(name = "ems")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// SQLite database file (overrides config).
    #[arg(short, long, env = "EMS_DATABASE", global = true)]
    pub database: Option<PathBuf>,

    /// Output format (overrides config).
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Employee role whose permissions are used for API calls.
    #[arg(long, default_value = "ADMIN", global = true)]
    pub as_role: String,

    /// How bcrypt-hashed passwords are validated: simulated or bcrypt (overrides config).
    #[arg(long, env = "EMS_PASSWORD_MODE", global = true)]
    pub password_mode: Option<HashedPasswordMode>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the demonstration simulations.
    #[command(subcommand)]
    Simulate(SimulateCommand),

    /// Employee management through the service layer.
    #[command(subcommand)]
    Employee(EmployeeCommand),

    /// Credential checks through the user storage provider.
    #[command(subcommand)]
    Auth(AuthCommand),

    /// Configuration management.
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Simulation commands.
#[derive(Debug, Subcommand)]
pub enum SimulateCommand {
    /// Simulate the employee REST API.
    Api,

    /// Simulate the identity server user storage provider.
    Provider,

    /// Run both simulations.
    All,
}

/// Employee commands.
#[derive(Debug, Subcommand)]
pub enum EmployeeCommand {
    /// Get an employee by ID.
    Get {
        /// Employee ID.
        id: i64,
    },

    /// Search employees (substring filters, combined).
    Search {
        /// Filter by name.
        #[arg(long)]
        name: Option<String>,

        /// Filter by email.
        #[arg(long)]
        email: Option<String>,

        /// Filter by department.
        #[arg(long)]
        department: Option<String>,

        /// Filter by role.
        #[arg(long)]
        role: Option<String>,
    },

    /// Create a new employee.
    Create {
        /// Full name.
        #[arg(long)]
        name: String,

        /// Email address.
        #[arg(long)]
        email: String,

        /// Password.
        #[arg(long)]
        password: String,

        /// Phone number.
        #[arg(long)]
        phone: Option<String>,

        /// Department.
        #[arg(long)]
        department: Option<String>,

        /// Role label.
        #[arg(long, default_value = "EMPLOYEE")]
        role: String,

        /// Store an Argon2id hash instead of the password itself.
        #[arg(long)]
        hash: bool,
    },

    /// Update an employee. Omitted fields keep their value.
    Update {
        /// Employee ID.
        id: i64,

        /// New name.
        #[arg(long)]
        name: Option<String>,

        /// New email.
        #[arg(long)]
        email: Option<String>,

        /// New password.
        #[arg(long)]
        password: Option<String>,

        /// New phone number.
        #[arg(long)]
        phone: Option<String>,

        /// New department.
        #[arg(long)]
        department: Option<String>,

        /// New role label.
        #[arg(long)]
        role: Option<String>,

        /// Store an Argon2id hash of the new password.
        #[arg(long)]
        hash: bool,
    },

    /// Delete an employee.
    Delete {
        /// Employee ID.
        id: i64,

        /// Skip confirmation.
        #[arg(long)]
        force: bool,
    },

    /// Import employees from a CSV file.
    ///
    /// The first row is a header; columns are name, email, department,
    /// phone, password and role. Existing emails are skipped.
    Import {
        /// CSV file to read.
        file: PathBuf,
    },

    /// Count employees.
    Count,
}

/// Authentication commands.
#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Check a password for an employee.
    Validate {
        /// Login email.
        email: String,

        /// Candidate password.
        password: String,
    },

    /// Run the login flow and show the issued attributes and claims.
    Login {
        /// Login email.
        email: String,

        /// Password.
        password: String,
    },

    /// Show role to permission mappings.
    Roles {
        /// Role to map (defaults to every role in use).
        role: Option<String>,
    },
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,

    /// Set a configuration value.
    Set {
        /// Configuration key.
        key: String,

        /// Configuration value.
        value: String,
    },

    /// Print the configuration file path.
    Path,
}
