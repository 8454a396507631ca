//! GitHub Actions output formatter.
//!
//! Produces output in GitHub Actions workflow command format:
//! ::error file={name},title={title}::{message}

use crate::analyzer::report::MissingReport;
use crate::analyzer::types::Location;

const TITLE: &str = "Missing environment variable";

/// Format a report as GitHub Actions annotations, one per missing association.
pub fn format(report: &MissingReport) -> String {
    let mut output = String::new();

    for record in report.records() {
        let message = match &record.location {
            Location::Directory(dir) => format!(
                "Variable '{}' is not referenced in directory {}",
                record.variable, dir
            ),
            Location::File(file) => format!(
                "Variable '{}' is not referenced in {}",
                record.variable, file
            ),
            Location::Tree => format!("Variable '{}' is not referenced in any file", record.variable),
        };

        match &record.location {
            Location::File(file) => output.push_str(&format!(
                "::error file={},title={}::{}\n",
                escape_property(file),
                TITLE,
                escape_github(&message)
            )),
            _ => output.push_str(&format!(
                "::error title={}::{}\n",
                TITLE,
                escape_github(&message)
            )),
        }
    }

    output
}

/// Escape special characters for GitHub Actions messages.
fn escape_github(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escape special characters for GitHub Actions properties.
fn escape_property(s: &str) -> String {
    escape_github(s).replace(':', "%3A").replace(',', "%2C")
}
