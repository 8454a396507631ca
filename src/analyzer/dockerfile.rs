//! Extraction of declared environment variables from a Dockerfile.
//!
//! Only the first name of each `ENV` instruction is taken: `ENV A=1 B=2`
//! yields `A`, and continuation lines (`\`) are not followed. Declarations
//! that rely on either form must be listed explicitly elsewhere.

use crate::analyzer::helpers::create_regex;
use crate::error::{InputKind, Result, VarsValidateError};
use std::collections::HashSet;
use std::path::Path;

/// `ENV` at the start of a line followed by an identifier.
const ENV_DECLARATION: &str = r"(?mi)^[ \t]*ENV[ \t]+([A-Za-z_][A-Za-z0-9_]*)";

/// Extract declared variable names from Dockerfile content.
///
/// Names are returned in declaration order, each name once.
pub fn extract_declared_variables(content: &str) -> Result<Vec<String>> {
    let env_regex = create_regex(ENV_DECLARATION)?;
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for cap in env_regex.captures_iter(content) {
        if let Some(name) = cap.get(1) {
            let name = name.as_str();
            if seen.insert(name.to_string()) {
                names.push(name.to_string());
            }
        }
    }

    Ok(names)
}

/// Read a Dockerfile from disk and extract its declared variables.
pub fn read_declared_variables(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        log::debug!("Failed to read Dockerfile {}: {}", path.display(), e);
        if e.kind() == std::io::ErrorKind::NotFound {
            VarsValidateError::InputNotFound {
                kind: InputKind::Dockerfile,
                path: path.to_path_buf(),
            }
        } else {
            VarsValidateError::Io(e)
        }
    })?;

    let names = extract_declared_variables(&content)?;
    log::info!(
        "Found {} declared variable(s) in {}",
        names.len(),
        path.display()
    );
    Ok(names)
}
