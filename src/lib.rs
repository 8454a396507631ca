//! # vars-validate
//!
//! Checks that every environment variable declared with `ENV` in a Dockerfile
//! is referenced by the infrastructure-as-code configuration (Terraform by
//! default) under a directory tree.
//!
//! ## Features
//!
//! - **Two matching strategies**: loose whole-word matching or strict quoted-literal matching
//! - **Three granularities**: every directory, every file, or anywhere in the tree
//! - **Exclusions**: global lists, per-directory JSON mappings, and per-directory exceptions files
//! - **CI friendly**: text, JSON and GitHub Actions output with a non-zero exit on findings
//!
//! ## Example
//!
//! ```rust,no_run
//! use vars_validate::analyzer::{validate, Granularity, MatchStrategy, ValidateOptions};
//!
//! # fn main() -> vars_validate::Result<()> {
//! let mut options = ValidateOptions::new("Dockerfile", "deploy/terraform");
//! options.strategy = MatchStrategy::Strict;
//! options.granularity = Granularity::File;
//!
//! let report = validate(&options)?;
//! if !report.is_success() {
//!     std::process::exit(report.outcome().exit_code());
//! }
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;

// Re-export commonly used types and functions
pub use analyzer::{MissingReport, Outcome, ValidateOptions, validate};
pub use error::{Result, VarsValidateError};

/// The current version of the CLI tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run the command described by parsed CLI arguments.
pub fn run_command(cli: &cli::Cli) -> Result<Outcome> {
    handlers::handle_validate(cli)
}
