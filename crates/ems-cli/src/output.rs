//! Output formatting utilities.

use colored::Colorize;
use ems_api::EmployeeResponse;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::config::OutputFormat;
use crate::simulate::SimulationReport;

/// Prints a success message.
pub fn success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Prints an error message.
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Prints a warning message.
pub fn warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), message);
}

/// Prints an info message.
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Employee table row.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct EmployeeRow {
    /// Employee ID.
    #[tabled(rename = "ID")]
    pub id: i64,
    /// Full name.
    #[tabled(rename = "Name")]
    pub name: String,
    /// Email address.
    #[tabled(rename = "Email")]
    pub email: String,
    /// Department.
    #[tabled(rename = "Department")]
    pub department: String,
    /// Role label.
    #[tabled(rename = "Role")]
    pub role: String,
    /// Phone number.
    #[tabled(rename = "Phone")]
    pub phone: String,
}

impl From<&EmployeeResponse> for EmployeeRow {
    fn from(employee: &EmployeeResponse) -> Self {
        Self {
            id: employee.id,
            name: employee.name.clone(),
            email: employee.email.clone(),
            department: employee.department.clone().unwrap_or_else(|| "-".to_string()),
            role: employee.role.clone(),
            phone: employee.phone.clone().unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Outputs data in the specified format.
pub fn output<T: Tabled + Serialize>(data: &[T], format: OutputFormat) -> crate::CliResult<()> {
    match format {
        OutputFormat::Table => {
            if data.is_empty() {
                info("No results found.");
            } else {
                let table = Table::new(data).with(Style::rounded()).to_string();
                println!("{table}");
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(data)?;
            println!("{json}");
        }
        OutputFormat::Yaml => {
            for item in data {
                let json = serde_json::to_value(item)?;
                print_yaml_value(&json, 0);
                println!();
            }
        }
        OutputFormat::Quiet => {}
    }
    Ok(())
}

/// Outputs employees, printing only their IDs in quiet mode.
pub fn output_employees(
    employees: &[EmployeeResponse],
    format: OutputFormat,
) -> crate::CliResult<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(employees)?);
            Ok(())
        }
        OutputFormat::Quiet => {
            for employee in employees {
                println!("{}", employee.id);
            }
            Ok(())
        }
        OutputFormat::Table | OutputFormat::Yaml => {
            let rows: Vec<EmployeeRow> = employees.iter().map(EmployeeRow::from).collect();
            output(&rows, format)
        }
    }
}

/// Outputs a single item.
pub fn output_single<T: Serialize>(item: &T, format: OutputFormat) -> crate::CliResult<()> {
    match format {
        OutputFormat::Table | OutputFormat::Yaml => {
            let json = serde_json::to_value(item)?;
            print_yaml_value(&json, 0);
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(item)?;
            println!("{json}");
        }
        OutputFormat::Quiet => {}
    }
    Ok(())
}

/// Outputs a simulation report.
///
/// Table output prints the console transcript; quiet output prints
/// nothing but failures.
pub fn print_report(report: &SimulationReport, format: OutputFormat) -> crate::CliResult<()> {
    match format {
        OutputFormat::Table => print!("{}", report.render()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Yaml => print_yaml_value(&serde_json::to_value(report)?, 0),
        OutputFormat::Quiet => {
            for title in report.failures() {
                warning(&format!("Step failed: {title}"));
            }
        }
    }
    Ok(())
}

/// Prints a JSON value as YAML-like output.
pub fn print_yaml_value(value: &serde_json::Value, indent: usize) {
    let prefix = "  ".repeat(indent);

    match value {
        serde_json::Value::Null => println!("{prefix}null"),
        serde_json::Value::Bool(b) => println!("{prefix}{b}"),
        serde_json::Value::Number(n) => println!("{prefix}{n}"),
        serde_json::Value::String(s) => println!("{prefix}{s}"),
        serde_json::Value::Array(arr) => {
            for item in arr {
                if item.is_object() || item.is_array() {
                    println!("{prefix}-");
                    print_yaml_value(item, indent + 1);
                } else {
                    print!("{prefix}- ");
                    print_yaml_value(item, 0);
                }
            }
        }
        serde_json::Value::Object(map) => {
            for (key, val) in map {
                if val.is_object() || val.is_array() {
                    println!("{prefix}{key}:");
                    print_yaml_value(val, indent + 1);
                } else {
                    print!("{prefix}{key}: ");
                    print_yaml_value(val, 0);
                }
            }
        }
    }
}

/// Prompts for confirmation.
pub fn confirm(message: &str) -> crate::CliResult<bool> {
    print!("{message} [y/N]: ");
    std::io::Write::flush(&mut std::io::stdout())?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;

    Ok(input.trim().eq_ignore_ascii_case("y") || input.trim().eq_ignore_ascii_case("yes"))
}
