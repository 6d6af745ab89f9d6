//! Simulation commands.

use crate::cli::SimulateCommand;
use crate::output::print_report;
use crate::simulate::{api, provider, SimulationReport};

use super::CommandContext;

/// Runs a simulate command.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or a report cannot be
/// printed. Failing steps are part of the report, not errors.
pub async fn run_simulate(cmd: SimulateCommand, ctx: &CommandContext) -> crate::CliResult<()> {
    let store = ctx.open_store().await?;

    let mut reports: Vec<SimulationReport> = Vec::with_capacity(2);
    if matches!(cmd, SimulateCommand::Api | SimulateCommand::All) {
        reports.push(api::run(&ctx.service(&store), &ctx.caller).await);
    }
    if matches!(cmd, SimulateCommand::Provider | SimulateCommand::All) {
        reports.push(provider::run(&ctx.provider(&store)).await);
    }
    store.close().await;

    for (index, report) in reports.iter().enumerate() {
        if index > 0 {
            println!();
        }
        print_report(report, ctx.output)?;
        if !report.passed() {
            tracing::warn!(title = %report.title, failures = ?report.failures(), "Simulation had failing steps");
        }
    }
    Ok(())
}
