//! Dockerfile environment variable usage validation.
//!
//! The pipeline runs once per invocation:
//!
//! 1. [`dockerfile`] extracts the `ENV` names declared in the Dockerfile
//! 2. [`exclusions`] resolves which names are exempt in each directory
//! 3. [`scanner`] walks the configuration tree and applies one [`MatchStrategy`]
//!    at one [`Granularity`]
//! 4. [`report`] aggregates what is missing and [`formatter`] renders it
//!
//! # Example
//!
//! ```rust,no_run
//! use vars_validate::analyzer::{validate, ValidateOptions};
//!
//! # fn main() -> vars_validate::Result<()> {
//! let options = ValidateOptions::new("Dockerfile", "terraform");
//! let report = validate(&options)?;
//! for record in report.records() {
//!     println!("{} missing in {}", record.variable, record.location);
//! }
//! # Ok(())
//! # }
//! ```

pub mod dockerfile;
pub mod exclusions;
pub mod formatter;
pub mod helpers;
pub mod matcher;
pub mod report;
pub mod scanner;
pub mod types;

pub use dockerfile::{extract_declared_variables, read_declared_variables};
pub use exclusions::ExclusionResolver;
pub use formatter::{OutputFormat, format_report};
pub use matcher::VariableMatcher;
pub use report::{MissingReport, Outcome, ReportGroup};
pub use scanner::{ScanConfig, ScanDirectory};
pub use types::{Granularity, Location, MatchStrategy, MissingRecord, ReportGrouping};

use crate::error::{InputKind, Result, VarsValidateError};
use std::path::PathBuf;

/// Everything one validation run needs, built up front and passed down.
#[derive(Debug, Clone)]
pub struct ValidateOptions {
    pub dockerfile_path: PathBuf,
    pub terraform_dir: PathBuf,
    pub strategy: MatchStrategy,
    pub granularity: Granularity,
    pub scan: ScanConfig,
    pub exclusions: ExclusionResolver,
}

impl ValidateOptions {
    /// Options with default strategy, granularity, scan settings and no exclusions.
    pub fn new(dockerfile_path: impl Into<PathBuf>, terraform_dir: impl Into<PathBuf>) -> Self {
        Self {
            dockerfile_path: dockerfile_path.into(),
            terraform_dir: terraform_dir.into(),
            strategy: MatchStrategy::default(),
            granularity: Granularity::default(),
            scan: ScanConfig::default(),
            exclusions: ExclusionResolver::default(),
        }
    }
}

/// Run the whole pipeline and return the missing-variable report.
///
/// Fails only on fatal input errors; missing variables are part of the report.
pub fn validate(options: &ValidateOptions) -> Result<MissingReport> {
    let declared = read_declared_variables(&options.dockerfile_path)?;

    let root = &options.terraform_dir;
    if !root.is_dir() {
        return Err(VarsValidateError::InputNotFound {
            kind: InputKind::ScanRoot,
            path: root.clone(),
        });
    }

    let matcher = VariableMatcher::new(options.strategy, &declared)?;
    let directories = scanner::discover(root, &options.scan, options.exclusions.sidecar_file_name());
    let records = scanner::scan(
        root,
        &directories,
        &declared,
        &matcher,
        &options.exclusions,
        options.granularity,
    );

    log::info!(
        "Validation finished: {} missing association(s) ({} granularity, {} matching)",
        records.len(),
        options.granularity.as_str(),
        options.strategy.as_str()
    );

    Ok(MissingReport::new(
        options.granularity,
        options.strategy,
        declared,
        records,
    ))
}
