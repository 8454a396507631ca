pub mod types;

use crate::error::{ConfigError, Result};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = ".vars-validate.toml";

/// Get the global config file path (~/.vars-validate.toml)
pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(CONFIG_FILE_NAME))
}

/// Get the local config file path (terraform_dir/.vars-validate.toml)
pub fn local_config_path(project_path: &Path) -> PathBuf {
    project_path.join(CONFIG_FILE_NAME)
}

/// Parse configuration from TOML text
pub fn parse_config(content: &str) -> Result<types::Config> {
    toml::from_str(content).map_err(|e| ConfigError::ParsingFailed(e.to_string()).into())
}

/// Load an explicitly requested config file. Any failure is fatal.
pub fn load_config_file(path: &Path) -> Result<types::Config> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse_config(&content)
}

/// Load configuration from file or use defaults.
/// An explicit path wins; otherwise checks local config first, then global config.
pub fn load_config(explicit: Option<&Path>, project_path: Option<&Path>) -> Result<types::Config> {
    if let Some(path) = explicit {
        log::debug!("Loading config from {}", path.display());
        return load_config_file(path);
    }

    let candidates = project_path
        .map(local_config_path)
        .into_iter()
        .chain(global_config_path());

    for candidate in candidates {
        if !candidate.is_file() {
            continue;
        }
        match load_config_file(&candidate) {
            Ok(config) => {
                log::debug!("Loaded config from {}", candidate.display());
                return Ok(config);
            }
            Err(e) => {
                log::warn!("Ignoring config {}: {}", candidate.display(), e);
            }
        }
    }

    Ok(types::Config::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::formatter::OutputFormat;
    use crate::analyzer::types::{Granularity, MatchStrategy, ReportGrouping};
    use crate::error::VarsValidateError;

    #[test]
    fn test_defaults_when_empty() {
        let config = parse_config("").unwrap();
        assert_eq!(config, types::Config::default());
        assert_eq!(config.scan.extensions, vec!["tf"]);
        assert_eq!(config.matching.granularity, Granularity::Directory);
    }

    #[test]
    fn test_full_config() {
        let config = parse_config(
            r#"
[scan]
extensions = ["tf", "tfvars"]
file_name = "env_vars.tf"
except_file_name = "except.txt"

[matching]
strategy = "strict"
granularity = "file"

[exclusions]
global = ["DEBUG"]

[exclusions.directories]
"services/api" = ["API_ONLY"]

[output]
format = "json"
group_by = "location"
"#,
        )
        .unwrap();

        assert_eq!(config.scan.extensions, vec!["tf", "tfvars"]);
        assert_eq!(config.scan.file_name.as_deref(), Some("env_vars.tf"));
        assert_eq!(config.scan.except_file_name.as_deref(), Some("except.txt"));
        assert_eq!(config.scan.ignore_dirs, vec![".terraform", ".git"]);
        assert_eq!(config.matching.strategy, MatchStrategy::Strict);
        assert_eq!(config.matching.granularity, Granularity::File);
        assert_eq!(config.exclusions.global, vec!["DEBUG"]);
        assert_eq!(
            config.exclusions.directories.get("services/api"),
            Some(&vec!["API_ONLY".to_string()])
        );
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.output.group_by, Some(ReportGrouping::Location));
    }

    #[test]
    fn test_unknown_strategy_is_parse_error() {
        let err = parse_config("[matching]\nstrategy = \"fuzzy\"\n").unwrap_err();
        assert!(matches!(err, VarsValidateError::Config(ConfigError::ParsingFailed(_))));
    }

    #[test]
    fn test_explicit_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("nope.toml")), None).unwrap_err();
        assert!(matches!(err, VarsValidateError::Config(ConfigError::ReadFailed { .. })));
    }

    #[test]
    fn test_local_config_is_picked_up() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            local_config_path(dir.path()),
            "[matching]\ngranularity = \"global\"\n",
        )
        .unwrap();
        let config = load_config(None, Some(dir.path())).unwrap();
        assert_eq!(config.matching.granularity, Granularity::Global);
    }
}
