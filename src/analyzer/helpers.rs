use crate::error::{ConfigError, Result};
use regex::Regex;
use std::path::Path;

/// Helper function to create a regex with proper error handling
pub fn create_regex(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| {
        ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        }
        .into()
    })
}

/// Normalize a user-supplied directory key to the form produced by the scanner.
///
/// `./a/b/`, `a\b` and `a/b` all become `a/b`; an empty key, `./` or `.` is the root `.`.
pub fn normalize_dir_key(key: &str) -> String {
    let key = key.trim().replace('\\', "/");
    let mut key = key.as_str();
    while let Some(rest) = key.strip_prefix("./") {
        key = rest;
    }
    let key = key.trim_end_matches('/');
    if key.is_empty() || key == "." {
        ".".to_string()
    } else {
        key.to_string()
    }
}

/// Directory key of `dir` relative to the scan `root`.
pub fn dir_key(root: &Path, dir: &Path) -> String {
    match dir.strip_prefix(root) {
        Ok(relative) => normalize_dir_key(&relative.to_string_lossy()),
        Err(_) => normalize_dir_key(&dir.to_string_lossy()),
    }
}

/// Path of `file` relative to the scan `root`, `/`-separated.
pub fn relative_display(root: &Path, file: &Path) -> String {
    file.strip_prefix(root)
        .unwrap_or(file)
        .to_string_lossy()
        .replace('\\', "/")
}
