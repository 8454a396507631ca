use crate::analyzer::formatter::OutputFormat;
use crate::analyzer::types::{Granularity, MatchStrategy, ReportGrouping};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "vars-validate")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Validate that Dockerfile ENV variables are used in Terraform")]
#[command(
    long_about = "Reads the ENV declarations of a Dockerfile and checks that every declared variable is referenced by the Terraform configuration under a directory tree. Variables can be exempted globally, per directory, or through a per-directory exceptions file. Exits with status 1 when any variable is unaccounted for."
)]
pub struct Cli {
    /// Path to the Dockerfile
    #[arg(long = "dockerfile_path", alias = "dockerfile-path", value_name = "PATH")]
    pub dockerfile_path: PathBuf,

    /// Path to the Terraform directory
    #[arg(long = "terraform_dir", alias = "terraform-dir", value_name = "PATH")]
    pub terraform_dir: PathBuf,

    /// Environment variables exempt everywhere
    #[arg(long, value_name = "NAME", num_args = 1..)]
    pub exclude: Vec<String>,

    /// JSON object mapping directories to lists of exempt variables
    #[arg(long = "exclude_json", alias = "exclude-json", value_name = "JSON")]
    pub exclude_json: Option<String>,

    /// Per-directory exceptions file, one variable name per line
    #[arg(long = "except_file_name", alias = "except-file-name", value_name = "FILE")]
    pub except_file_name: Option<String>,

    /// Only scan files with this exact name (e.g. env_vars.tf)
    #[arg(long = "file_name", alias = "file-name", value_name = "FILE")]
    pub file_name: Option<String>,

    /// Extensions of files to scan [default: tf]
    #[arg(long = "extension", value_name = "EXT", value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// How variable references are recognised [default: loose]
    #[arg(long, value_enum)]
    pub strategy: Option<MatchStrategy>,

    /// Scope at which every variable must be referenced [default: directory]
    #[arg(long, value_enum)]
    pub granularity: Option<Granularity>,

    /// Group the report by variable or by location
    #[arg(long = "group_by", alias = "group-by", value_enum)]
    pub group_by: Option<ReportGrouping>,

    /// Report format [default: text]
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}
