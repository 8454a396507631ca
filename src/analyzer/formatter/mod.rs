//! Output formatters for the missing-variable report.
//!
//! - Text - human readable listing (default)
//! - JSON - machine-readable output
//! - GitHub - GitHub Actions annotations

pub mod github;
pub mod json;
pub mod text;

use crate::analyzer::report::MissingReport;
use crate::analyzer::types::ReportGrouping;
use serde::{Deserialize, Serialize};

/// Output format for the report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human readable text (default)
    #[default]
    Text,
    /// JSON for machine processing
    Json,
    /// GitHub Actions workflow annotations
    Github,
}

impl OutputFormat {
    /// Whether the rendered report belongs on stdout rather than stderr.
    pub fn is_machine_readable(&self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Render a report in the requested format.
pub fn format_report(
    report: &MissingReport,
    format: OutputFormat,
    grouping: ReportGrouping,
    colors: bool,
) -> String {
    match format {
        OutputFormat::Text => text::format(report, grouping, colors),
        OutputFormat::Json => json::format(report, grouping),
        OutputFormat::Github => github::format(report),
    }
}
