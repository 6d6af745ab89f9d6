//! Configuration management commands.

use crate::cli::ConfigCommand;
use crate::output::{info, success};
use crate::CliConfig;

/// Runs a config command.
///
/// # Errors
///
/// Returns an error for unknown keys, invalid values, or when the file
/// cannot be written.
pub fn run_config(cmd: ConfigCommand, config: &mut CliConfig) -> crate::CliResult<()> {
    match cmd {
        ConfigCommand::Show => show_config(config),
        ConfigCommand::Set { key, value } => {
            config.set(&key, &value)?;
            config.save()?;
            success(&format!("Set {key} = {value}"));
            Ok(())
        }
        ConfigCommand::Path => {
            println!("{}", CliConfig::config_path()?.display());
            Ok(())
        }
    }
}

/// Shows the current configuration.
fn show_config(config: &CliConfig) -> crate::CliResult<()> {
    let config_path = CliConfig::config_path()?;

    info(&format!("Configuration file: {}", config_path.display()));
    println!();
    println!("database_path: {}", config.database_path.display());
    println!("output_format: {:?}", config.output_format);
    println!("password_mode: {}", config.password_mode);
    println!("client_id: {}", config.client_id);

    Ok(())
}
