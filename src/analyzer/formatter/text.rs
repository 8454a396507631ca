//! Human readable output formatter.

use crate::analyzer::report::{MissingReport, ReportGroup};
use crate::analyzer::types::{Location, ReportGrouping};
use colored::Colorize;

/// Format a report as plain text, optionally colored.
pub fn format(report: &MissingReport, grouping: ReportGrouping, colors: bool) -> String {
    if report.is_success() {
        let message =
            "All variables declared in the Dockerfile are used in the configuration files or exempted.";
        return if colors {
            format!("{}\n", message.green())
        } else {
            format!("{}\n", message)
        };
    }

    let mut output = String::new();
    let header = "Missing environment variables in the configuration files:";
    if colors {
        output.push_str(&format!("{}\n", header.red().bold()));
    } else {
        output.push_str(&format!("{}\n", header));
    }

    for group in report.grouped(grouping) {
        match group {
            ReportGroup::ByVariable {
                variable,
                locations,
            } => {
                let name = if colors {
                    variable.bold().to_string()
                } else {
                    variable.to_string()
                };
                output.push_str(&format!(
                    "  Variable '{}' {}\n",
                    name,
                    describe_locations(&locations)
                ));
            }
            ReportGroup::ByLocation {
                location,
                variables,
            } => {
                let heading = location_heading(location);
                let path = if colors {
                    location.to_string().bold().to_string()
                } else {
                    location.to_string()
                };
                output.push_str(&format!("  {}: {}\n", heading, path));
                output.push_str(&format!("    Missing variables: {}\n", variables.join(", ")));
            }
        }
    }

    let associations = report.records().len();
    let variables = report.missing_variable_count();
    output.push_str(&format!(
        "\n  {} missing association{} across {} variable{} (granularity: {}, strategy: {})\n",
        associations,
        if associations == 1 { "" } else { "s" },
        variables,
        if variables == 1 { "" } else { "s" },
        report.granularity.as_str(),
        report.strategy.as_str()
    ));

    output
}

fn describe_locations(locations: &[&Location]) -> String {
    if locations.iter().any(|l| matches!(l, Location::Tree)) {
        return "is not referenced in any file".to_string();
    }

    let noun = match locations.first() {
        Some(Location::File(_)) => {
            if locations.len() == 1 { "file" } else { "files" }
        }
        _ => {
            if locations.len() == 1 { "directory" } else { "directories" }
        }
    };
    let joined: Vec<String> = locations.iter().map(|l| l.to_string()).collect();
    format!("is missing in {}: {}", noun, joined.join(", "))
}

fn location_heading(location: &Location) -> &'static str {
    match location {
        Location::Directory(_) => "Directory",
        Location::File(_) => "File",
        Location::Tree => "Tree",
    }
}
