//! Demonstration simulations.
//!
//! Each simulation runs a fixed sequence of calls against an open store
//! and records what happened in a [`SimulationReport`]. A failing step is
//! recorded and the sequence carries on.

pub mod api;
pub mod provider;

use std::fmt::Write as _;

use http::StatusCode;
use serde::Serialize;

/// Width of the rule under a report title.
const RULE_WIDTH: usize = 60;

/// One printed line of a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum Line {
    /// An expected outcome.
    Check(String),
    /// An unexpected or failed outcome.
    Cross(String),
    /// An indented detail.
    Detail(String),
    /// Verbatim text, such as a JSON payload.
    Raw(String),
}

impl Line {
    fn render(&self, out: &mut String) {
        // Writing to a String cannot fail.
        let _ = match self {
            Self::Check(text) => writeln!(out, "✅ {text}"),
            Self::Cross(text) => writeln!(out, "❌ {text}"),
            Self::Detail(text) => writeln!(out, "   {text}"),
            Self::Raw(text) => writeln!(out, "{text}"),
        };
    }
}

/// One numbered step of a simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    /// Step title, e.g. the simulated request line.
    pub title: String,
    /// Simulated HTTP status, when the step mimics a request.
    pub status: Option<u16>,
    /// Whether every outcome matched expectations.
    pub passed: bool,
    /// Printed lines.
    pub lines: Vec<Line>,
}

impl Step {
    /// Creates an empty, passing step.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            status: None,
            passed: true,
            lines: Vec::new(),
        }
    }

    /// Records a simulated HTTP status.
    ///
    /// `expected` marks whether this status is the outcome the step wanted.
    pub fn status(&mut self, status: StatusCode, expected: bool) -> &mut Self {
        self.status = Some(status.as_u16());
        let text = format!(
            "Status: {} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or_default()
        );
        if expected {
            self.check(text)
        } else {
            self.cross(text)
        }
    }

    /// Adds an expected outcome.
    pub fn check(&mut self, text: impl Into<String>) -> &mut Self {
        self.lines.push(Line::Check(text.into()));
        self
    }

    /// Adds a failed outcome and marks the step failed.
    pub fn cross(&mut self, text: impl Into<String>) -> &mut Self {
        self.passed = false;
        self.lines.push(Line::Cross(text.into()));
        self
    }

    /// Adds an indented detail.
    pub fn detail(&mut self, text: impl Into<String>) -> &mut Self {
        self.lines.push(Line::Detail(text.into()));
        self
    }

    /// Adds verbatim text.
    pub fn raw(&mut self, text: impl Into<String>) -> &mut Self {
        self.lines.push(Line::Raw(text.into()));
        self
    }

    /// Marks the step failed without adding a line.
    pub fn fail(&mut self) -> &mut Self {
        self.passed = false;
        self
    }
}

/// The outcome of a simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationReport {
    /// Report title.
    pub title: String,
    /// Steps in execution order.
    pub steps: Vec<Step>,
}

impl SimulationReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            steps: Vec::new(),
        }
    }

    /// Appends a step.
    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// Checks whether every step passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.steps.iter().all(|s| s.passed)
    }

    /// Gets the titles of failed steps.
    #[must_use]
    pub fn failures(&self) -> Vec<&str> {
        self.steps
            .iter()
            .filter(|s| !s.passed)
            .map(|s| s.title.as_str())
            .collect()
    }

    /// Renders the report as console text.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title);
        let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));

        for (index, step) in self.steps.iter().enumerate() {
            let _ = writeln!(out, "\n📋 Test {}: {}", index + 1, step.title);
            for line in &step.lines {
                line.render(&mut out);
            }
        }
        out
    }
}

/// Formats a list the way the simulations print role lists.
pub(crate) fn bracketed<T: std::fmt::Display>(items: &[T]) -> String {
    let items: Vec<String> = items.iter().map(ToString::to_string).collect();
    format!("[{}]", items.join(", "))
}

/// Formats an optional field, printing `-` when absent.
pub(crate) fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

/// Pretty-prints a value as JSON with a two-space indent.
pub(crate) fn pretty_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("<unserializable: {e}>"))
}
