//! Aggregation of scan findings into the missing-variable report.

use crate::analyzer::types::{Granularity, Location, MatchStrategy, MissingRecord, ReportGrouping};

/// Final outcome of a validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
        }
    }
}

/// One group of the report, keyed according to [`ReportGrouping`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportGroup<'a> {
    ByVariable {
        variable: &'a str,
        locations: Vec<&'a Location>,
    },
    ByLocation {
        location: &'a Location,
        variables: Vec<&'a str>,
    },
}

/// Missing associations found by one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingReport {
    pub granularity: Granularity,
    pub strategy: MatchStrategy,
    /// Declared variables in Dockerfile order.
    pub declared: Vec<String>,
    records: Vec<MissingRecord>,
}

impl MissingReport {
    pub fn new(
        granularity: Granularity,
        strategy: MatchStrategy,
        declared: Vec<String>,
        records: Vec<MissingRecord>,
    ) -> Self {
        let mut deduped: Vec<MissingRecord> = Vec::with_capacity(records.len());
        for record in records {
            if !deduped.contains(&record) {
                deduped.push(record);
            }
        }

        Self {
            granularity,
            strategy,
            declared,
            records: deduped,
        }
    }

    pub fn records(&self) -> &[MissingRecord] {
        &self.records
    }

    pub fn is_success(&self) -> bool {
        self.records.is_empty()
    }

    pub fn outcome(&self) -> Outcome {
        if self.is_success() {
            Outcome::Success
        } else {
            Outcome::Failure
        }
    }

    /// Number of distinct variables with at least one missing location.
    pub fn missing_variable_count(&self) -> usize {
        self.declared
            .iter()
            .filter(|name| self.records.iter().any(|r| &r.variable == *name))
            .count()
    }

    /// Group records by variable (declaration order) or by location (traversal order).
    pub fn grouped(&self, grouping: ReportGrouping) -> Vec<ReportGroup<'_>> {
        match grouping {
            ReportGrouping::Variable => self
                .declared
                .iter()
                .filter_map(|name| {
                    let locations: Vec<&Location> = self
                        .records
                        .iter()
                        .filter(|r| &r.variable == name)
                        .map(|r| &r.location)
                        .collect();
                    if locations.is_empty() {
                        None
                    } else {
                        Some(ReportGroup::ByVariable {
                            variable: name.as_str(),
                            locations,
                        })
                    }
                })
                .collect(),
            ReportGrouping::Location => {
                let mut groups: Vec<ReportGroup<'_>> = Vec::new();
                for record in &self.records {
                    let existing = groups.iter_mut().find_map(|group| match group {
                        ReportGroup::ByLocation {
                            location,
                            variables,
                        } if *location == &record.location => Some(variables),
                        _ => None,
                    });
                    match existing {
                        Some(variables) => variables.push(record.variable.as_str()),
                        None => groups.push(ReportGroup::ByLocation {
                            location: &record.location,
                            variables: vec![record.variable.as_str()],
                        }),
                    }
                }
                groups
            }
        }
    }
}
