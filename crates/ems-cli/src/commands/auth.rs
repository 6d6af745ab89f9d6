//! Authentication commands.

use ems_auth::{
    map_role_to_permissions, AuthError, AuthenticatedSession, EmployeeUserStorageProvider,
};
use ems_model::Permission;
use ems_storage::EmployeeProvider;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::AuthCommand;
use crate::config::OutputFormat;
use crate::output::{info, output, output_single, success};

use super::CommandContext;

/// Role mapping table row.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct RoleRow {
    /// Employee role label.
    #[tabled(rename = "Role")]
    pub role: String,
    /// Permissions granted by the role.
    #[tabled(rename = "Permissions")]
    pub permissions: String,
}

impl RoleRow {
    fn new(role: impl Into<String>, permissions: &[Permission]) -> Self {
        let names: Vec<_> = permissions.iter().map(Permission::as_str).collect();
        Self {
            role: role.into(),
            permissions: names.join(", "),
        }
    }
}

/// Runs an auth command.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or the credentials are
/// refused.
pub async fn run_auth(cmd: AuthCommand, ctx: &CommandContext) -> crate::CliResult<()> {
    let store = ctx.open_store().await?;
    let result = execute(cmd, ctx.output, &ctx.provider(&store)).await;
    store.close().await;
    result
}

async fn execute<P: EmployeeProvider>(
    cmd: AuthCommand,
    format: OutputFormat,
    provider: &EmployeeUserStorageProvider<P>,
) -> crate::CliResult<()> {
    match cmd {
        AuthCommand::Validate { email, password } => {
            if provider.validate_password(&email, &password).await? {
                success(&format!("Password valid for {email}"));
                Ok(())
            } else {
                Err(AuthError::InvalidCredentials.into())
            }
        }
        AuthCommand::Login { email, password } => {
            let session = provider.authenticate(&email, &password).await?;
            print_session(&session, format)
        }
        AuthCommand::Roles { role } => {
            let rows: Vec<RoleRow> = match role {
                Some(role) => vec![RoleRow::new(&role, &map_role_to_permissions(&role))],
                None => provider
                    .role_mappings()
                    .await?
                    .into_iter()
                    .map(|(role, permissions)| RoleRow::new(role, &permissions))
                    .collect(),
            };
            output(&rows, format)
        }
    }
}

fn print_session(session: &AuthenticatedSession, format: OutputFormat) -> crate::CliResult<()> {
    match format {
        OutputFormat::Quiet => println!("{}", session.session_id),
        OutputFormat::Json => {
            let json = serde_json::json!({
                "sessionId": session.session_id,
                "storageId": session.user.storage_id().to_string(),
                "attributes": session.attributes,
                "claims": session.claims,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Table | OutputFormat::Yaml => {
            success("Authentication Successful");
            info(&format!("Storage ID: {}", session.user.storage_id()));
            println!();
            println!("User Attributes:");
            output_single(&session.attributes, format)?;
            println!();
            println!("Token Claims:");
            println!("{}", session.claims.to_pretty_json()?);
        }
    }
    Ok(())
}
