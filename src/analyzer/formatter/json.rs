//! JSON output formatter.

use serde_json::json;

use crate::analyzer::report::{MissingReport, ReportGroup};
use crate::analyzer::types::{Location, ReportGrouping};

/// Format a report as pretty-printed JSON.
pub fn format(report: &MissingReport, grouping: ReportGrouping) -> String {
    let missing: Vec<serde_json::Value> = report
        .grouped(grouping)
        .into_iter()
        .map(|group| match group {
            ReportGroup::ByVariable {
                variable,
                locations,
            } => json!({
                "variable": variable,
                "locations": locations.iter().map(|l| location_json(l)).collect::<Vec<_>>(),
            }),
            ReportGroup::ByLocation {
                location,
                variables,
            } => json!({
                "location": location_json(location),
                "variables": variables,
            }),
        })
        .collect();

    let output = json!({
        "success": report.is_success(),
        "granularity": report.granularity.as_str(),
        "strategy": report.strategy.as_str(),
        "groupBy": match grouping {
            ReportGrouping::Variable => "variable",
            ReportGrouping::Location => "location",
        },
        "declared": report.declared,
        "missingCount": report.records().len(),
        "missing": missing,
    });

    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
}

fn location_json(location: &Location) -> serde_json::Value {
    match location {
        Location::Directory(path) | Location::File(path) => json!({
            "kind": location.kind(),
            "path": path,
        }),
        Location::Tree => json!({ "kind": location.kind() }),
    }
}
