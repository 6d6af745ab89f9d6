//! Employee management commands.

use std::fs::File;

use ems_api::{EmployeeResponse, EmployeeService};
use ems_auth::PasswordHasherService;
use ems_model::{EmployeeUpdate, NewEmployee};
use ems_storage::{EmployeeProvider, EmployeeSearchCriteria};

use crate::cli::EmployeeCommand;
use crate::config::OutputFormat;
use crate::output::{confirm, info, output_employees, output_single, success};

use super::CommandContext;

/// Runs an employee command.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or the operation is
/// refused by the service.
pub async fn run_employee(cmd: EmployeeCommand, ctx: &CommandContext) -> crate::CliResult<()> {
    let store = ctx.open_store().await?;
    let result = execute(cmd, ctx, &ctx.service(&store)).await;
    store.close().await;
    result
}

async fn execute<P: EmployeeProvider>(
    cmd: EmployeeCommand,
    ctx: &CommandContext,
    service: &EmployeeService<P>,
) -> crate::CliResult<()> {
    let caller = &ctx.caller;
    let format = ctx.output;

    match cmd {
        EmployeeCommand::Get { id } => {
            let employee = service.get_by_id(caller, id).await?;
            output_single(&employee, format)
        }
        EmployeeCommand::Search {
            name,
            email,
            department,
            role,
        } => {
            let criteria = EmployeeSearchCriteria {
                name,
                email,
                department,
                role,
            };
            let employees = service.search(caller, &criteria).await?;
            output_employees(&employees, format)
        }
        EmployeeCommand::Create {
            name,
            email,
            password,
            phone,
            department,
            role,
            hash,
        } => {
            let password = if hash {
                PasswordHasherService::with_defaults().hash(&password)?
            } else {
                password
            };
            let request = NewEmployee {
                name,
                email,
                password,
                phone,
                department,
                role,
            };

            let created = service.create(caller, &request).await?;
            if format == OutputFormat::Quiet {
                println!("{}", created.id);
                return Ok(());
            }
            success(&format!("Employee created successfully with id {}", created.id));
            output_single(&created, format)
        }
        EmployeeCommand::Update {
            id,
            name,
            email,
            password,
            phone,
            department,
            role,
            hash,
        } => {
            let current = service.get_by_id(caller, id).await?;
            let changes = ProfileChanges {
                name,
                email,
                password,
                phone,
                department,
                role,
            };
            let update = changes.apply(&current, hash)?;

            let updated = service.update(caller, id, &update).await?;
            if format != OutputFormat::Quiet {
                success("Update employee information");
                output_single(&updated, format)?;
            }
            Ok(())
        }
        EmployeeCommand::Import { file } => {
            let reader = File::open(&file)?;
            let created = service.bulk_upload(caller, reader).await?;
            if format == OutputFormat::Quiet {
                println!("{}", created.len());
                return Ok(());
            }
            success(&format!(
                "Imported {} employees from {}",
                created.len(),
                file.display()
            ));
            output_employees(&created, format)
        }
        EmployeeCommand::Delete { id, force } => {
            if !force && !confirm(&format!("Delete employee {id}?"))? {
                return Err(crate::CliError::Cancelled);
            }
            service.delete(caller, id).await?;
            success(&format!("Employee deleted successfully with id {id}"));
            Ok(())
        }
        EmployeeCommand::Count => {
            let count = service.count(caller).await?;
            match format {
                OutputFormat::Table => info(&format!("{count} employees")),
                OutputFormat::Quiet => println!("{count}"),
                OutputFormat::Json | OutputFormat::Yaml => {
                    output_single(&serde_json::json!({ "count": count }), format)?;
                }
            }
            Ok(())
        }
    }
}

/// Field changes given to `employee update`; `None` keeps the current value.
#[derive(Debug, Default)]
struct ProfileChanges {
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    phone: Option<String>,
    department: Option<String>,
    role: Option<String>,
}

impl ProfileChanges {
    /// Merges the changes over `current`.
    ///
    /// A blank password is dropped before hashing, so it never replaces the
    /// stored one.
    fn apply(self, current: &EmployeeResponse, hash: bool) -> crate::CliResult<EmployeeUpdate> {
        let password = match self.password.filter(|p| !p.trim().is_empty()) {
            Some(password) if hash => Some(PasswordHasherService::with_defaults().hash(&password)?),
            other => other,
        };

        Ok(EmployeeUpdate {
            name: self.name.unwrap_or_else(|| current.name.clone()),
            email: self.email.unwrap_or_else(|| current.email.clone()),
            password,
            phone: self.phone.or_else(|| current.phone.clone()),
            department: self.department.or_else(|| current.department.clone()),
            role: self.role.unwrap_or_else(|| current.role.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use ems_api::{ApiError, Principal};
    use ems_storage_sql::{SqliteStore, StoreConfig};

    use super::*;
    use crate::{Cli, CliConfig, CliError};

    async fn current(id: i64) -> EmployeeResponse {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::open(&StoreConfig::new(dir.path().join("cli.sqlite")))
            .await
            .unwrap();
        let employee = EmployeeService::new(store.employees())
            .get_by_id(&Principal::system(), id)
            .await
            .unwrap();
        store.close().await;
        employee
    }

    #[tokio::test]
    async fn omitted_fields_keep_their_value() {
        let david = current(4).await;
        let changes = ProfileChanges {
            department: Some("Platform".to_string()),
            role: Some("HR".to_string()),
            ..ProfileChanges::default()
        };

        let update = changes.apply(&david, false).unwrap();
        assert_eq!(update.name, "David Chen");
        assert_eq!(update.email, "david@company.com");
        assert_eq!(update.phone, david.phone);
        assert_eq!(update.department.as_deref(), Some("Platform"));
        assert_eq!(update.role, "HR");
        assert_eq!(update.password, None);
    }

    #[tokio::test]
    async fn blank_password_is_not_hashed() {
        let david = current(4).await;

        for hash in [false, true] {
            let changes = ProfileChanges {
                password: Some("   ".to_string()),
                ..ProfileChanges::default()
            };
            let update = changes.apply(&david, hash).unwrap();
            assert_eq!(update.password, None);
            assert_eq!(update.new_password(), None);
        }

        let changes = ProfileChanges {
            password: Some("n3w-pass".to_string()),
            ..ProfileChanges::default()
        };
        let update = changes.apply(&david, true).unwrap();
        let stored = update.new_password().unwrap();
        assert!(stored.starts_with("$argon2id$"));
        PasswordHasherService::with_defaults()
            .verify("n3w-pass", stored)
            .unwrap();
    }

    #[tokio::test]
    async fn update_is_authorized_before_the_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cli.sqlite");
        let cli = Cli::try_parse_from([
            "ems",
            "--database",
            path.to_str().unwrap(),
            "--as-role",
            "EMPLOYEE",
            "--output",
            "quiet",
            "employee",
            "count",
        ])
        .unwrap();
        let ctx = CommandContext::new(&cli, &CliConfig::default());
        let store = ctx.open_store().await.unwrap();

        let cmd = EmployeeCommand::Update {
            id: 9_999,
            name: Some("Nobody".to_string()),
            email: None,
            password: None,
            phone: None,
            department: None,
            role: None,
            hash: false,
        };
        let err = execute(cmd, &ctx, &ctx.service(&store)).await.unwrap_err();
        assert!(matches!(err, CliError::Api(ApiError::Forbidden(_))));

        store.close().await;
    }
}
