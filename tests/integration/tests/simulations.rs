//! Simulation tests.

use clap::Parser;
use ems_auth::HashedPasswordMode;
use ems_cli::commands::CommandContext;
use ems_cli::simulate::{api, provider};
use ems_cli::{Cli, CliConfig};
use ems_integration_tests::TestEnv;

#[tokio::test]
async fn both_simulations_pass_on_a_fresh_database() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    let api_report = api::run(&env.service(), &TestEnv::admin()).await;
    assert!(api_report.passed(), "failed: {:?}", api_report.failures());

    // The provider run sees the employee the API run created.
    let provider_report = provider::run(&env.provider(HashedPasswordMode::Simulated)).await;
    assert!(provider_report.passed(), "failed: {:?}", provider_report.failures());

    let text = provider_report.render();
    assert!(text.starts_with(provider::TITLE));
    assert!(text.contains("📋 Test 4: Role Mapping for All Users"));
    assert!(text.contains("HR → [READ_EMPLOYEES, CREATE_EMPLOYEES, UPDATE_EMPLOYEES, DELETE_EMPLOYEES]"));
    assert!(text.contains("Authentication Successful"));

    env.close().await;
    Ok(())
}

#[tokio::test]
async fn steps_keep_running_after_a_failure() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let reader = ems_api::Principal::from_role("emily@company.com", "EMPLOYEE");

    let report = api::run(&env.service(), &reader).await;
    assert_eq!(report.steps.len(), 6);
    assert_eq!(
        report.failures(),
        vec![
            "POST /api/employees/add",
            "POST /api/employees/add (Duplicate Email)"
        ]
    );
    assert_eq!(report.steps[5].status, Some(200));

    env.close().await;
    Ok(())
}

#[tokio::test]
async fn report_serializes_for_json_output() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    let report = provider::run(&env.provider(HashedPasswordMode::Simulated)).await;
    let json = serde_json::to_value(&report)?;
    assert_eq!(json["steps"].as_array().map(Vec::len), Some(5));
    assert_eq!(json["steps"][0]["title"], "User Lookup by Email");
    assert_eq!(json["steps"][0]["lines"][0]["kind"], "check");

    env.close().await;
    Ok(())
}

#[tokio::test]
async fn context_opens_the_configured_database() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("cli.sqlite");
    let cli = Cli::try_parse_from([
        "ems",
        "--database",
        path.to_str().expect("utf-8 temp path"),
        "--as-role",
        "HR",
        "simulate",
        "api",
    ])?;

    let ctx = CommandContext::new(&cli, &CliConfig::default());
    let store = ctx.open_store().await?;
    assert_eq!(store.path(), path.as_path());

    let report = api::run(&ctx.service(&store), &ctx.caller).await;
    assert!(report.passed(), "failed: {:?}", report.failures());
    store.close().await;

    // Reopening keeps the rows and does not seed twice.
    let store = ctx.open_store().await?;
    let count = ctx.service(&store).count(&ctx.caller).await?;
    assert_eq!(count, 6);
    store.close().await;
    Ok(())
}
