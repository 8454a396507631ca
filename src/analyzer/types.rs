//! Core types shared by the extractor, scanner and reporter.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a declared variable is recognised inside a configuration file.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
    /// The name appears as a standalone word anywhere in the file.
    #[default]
    Loose,
    /// The name appears as a quoted literal value, e.g. `name = "FOO"`.
    Strict,
}

impl MatchStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loose => "loose",
            Self::Strict => "strict",
        }
    }
}

/// Scope at which "used" is evaluated.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Every directory in the tree must reference every variable.
    #[default]
    Directory,
    /// Every candidate file must reference every variable.
    File,
    /// At least one candidate file anywhere must reference each variable.
    Global,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Directory => "directory",
            Self::File => "file",
            Self::Global => "global",
        }
    }

    /// Grouping used when none is requested explicitly.
    pub fn default_grouping(&self) -> ReportGrouping {
        match self {
            Self::File => ReportGrouping::Location,
            Self::Directory | Self::Global => ReportGrouping::Variable,
        }
    }
}

/// Key used to group the missing report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportGrouping {
    /// variable -> locations where it is missing
    Variable,
    /// location -> variables missing there
    Location,
}

/// Where a variable could not be confirmed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "lowercase")]
pub enum Location {
    /// A directory key relative to the scan root (`.` for the root).
    Directory(String),
    /// A candidate file path relative to the scan root.
    File(String),
    /// The whole scanned tree.
    Tree,
}

impl Location {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Directory(_) => "directory",
            Self::File(_) => "file",
            Self::Tree => "tree",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directory(path) | Self::File(path) => write!(f, "{}", path),
            Self::Tree => write!(f, "<all files>"),
        }
    }
}

/// One unsatisfied (variable, location) association.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingRecord {
    pub variable: String,
    pub location: Location,
}

impl MissingRecord {
    pub fn new(variable: impl Into<String>, location: Location) -> Self {
        Self {
            variable: variable.into(),
            location,
        }
    }
}
