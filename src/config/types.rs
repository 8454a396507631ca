use crate::analyzer::formatter::OutputFormat;
use crate::analyzer::scanner::{DEFAULT_EXTENSIONS, DEFAULT_IGNORE_DIRS};
use crate::analyzer::types::{Granularity, MatchStrategy, ReportGrouping};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scan: ScanSection,
    pub matching: MatchingSection,
    pub exclusions: ExclusionsSection,
    pub output: OutputSection,
}

/// Which files are scanned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanSection {
    pub extensions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub except_file_name: Option<String>,
    pub ignore_dirs: Vec<String>,
}

impl Default for ScanSection {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            file_name: None,
            except_file_name: None,
            ignore_dirs: DEFAULT_IGNORE_DIRS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Matching strategy and granularity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingSection {
    pub strategy: MatchStrategy,
    pub granularity: Granularity,
}

/// Exclusions applied before scanning
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExclusionsSection {
    /// Names exempt everywhere
    pub global: Vec<String>,
    /// Directory key -> names exempt in that directory
    pub directories: BTreeMap<String, Vec<String>>,
}

/// Report rendering
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub format: OutputFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_by: Option<ReportGrouping>,
}
