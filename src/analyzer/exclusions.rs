//! Exclusion resolution.
//!
//! A variable is exempt from the usage requirement in a directory when it is
//! listed globally, listed for that directory (inline JSON or config table),
//! or listed in the directory's sidecar exceptions file.

use crate::analyzer::helpers::normalize_dir_key;
use crate::error::{Result, VarsValidateError};
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

/// Global and directory-scoped exclusions for one run.
#[derive(Debug, Clone, Default)]
pub struct ExclusionResolver {
    global: BTreeSet<String>,
    scoped: HashMap<String, BTreeSet<String>>,
    sidecar_file_name: Option<String>,
}

impl ExclusionResolver {
    /// Build a resolver. Directory keys are normalized; absolute keys stay absolute.
    pub fn new<G, S>(global: G, scoped: S, sidecar_file_name: Option<String>) -> Self
    where
        G: IntoIterator<Item = String>,
        S: IntoIterator<Item = (String, Vec<String>)>,
    {
        let mut resolver = Self {
            global: global.into_iter().map(|n| n.trim().to_string()).collect(),
            scoped: HashMap::new(),
            sidecar_file_name: sidecar_file_name.filter(|n| !n.trim().is_empty()),
        };
        for (key, names) in scoped {
            resolver.add_scoped(&key, names);
        }
        resolver
    }

    /// Build a resolver from an inline JSON mapping `{"dir": ["NAME", ...]}`.
    pub fn from_json(
        global: Vec<String>,
        json: &str,
        sidecar_file_name: Option<String>,
    ) -> Result<Self> {
        let scoped = parse_scoped_json(json)?;
        Ok(Self::new(global, scoped, sidecar_file_name))
    }

    /// Add directory-scoped exclusions, merging with any already present for the key.
    pub fn add_scoped(&mut self, key: &str, names: Vec<String>) {
        let key = scoped_key(key);
        self.scoped
            .entry(key)
            .or_default()
            .extend(names.into_iter().map(|n| n.trim().to_string()));
    }

    pub fn sidecar_file_name(&self) -> Option<&str> {
        self.sidecar_file_name.as_deref()
    }

    /// Exclusions in effect for one directory.
    ///
    /// `dir_key` is the root-relative key (`.` for the root) and `dir_path` the
    /// directory on disk, used for absolute keys and the sidecar lookup.
    pub fn effective_exclusions(&self, dir_key: &str, dir_path: &Path) -> BTreeSet<String> {
        let mut effective = self.global.clone();

        if let Some(names) = self.scoped.get(dir_key) {
            effective.extend(names.iter().cloned());
        }

        if self.scoped.keys().any(|k| Path::new(k).is_absolute()) {
            for absolute in absolute_forms(dir_path) {
                let key = scoped_key(&absolute.to_string_lossy());
                if let Some(names) = self.scoped.get(&key) {
                    effective.extend(names.iter().cloned());
                }
            }
        }

        if let Some(sidecar) = &self.sidecar_file_name {
            effective.extend(read_sidecar(&dir_path.join(sidecar)));
        }

        effective
    }
}

/// Parse the `--exclude_json` mapping.
pub fn parse_scoped_json(json: &str) -> Result<HashMap<String, Vec<String>>> {
    serde_json::from_str(json).map_err(|e| {
        VarsValidateError::MalformedExclusionInput(format!(
            "expected a JSON object mapping directories to lists of names: {}",
            e
        ))
    })
}

/// Read a sidecar exceptions file. A missing or unreadable file is treated as empty.
pub fn read_sidecar(path: &Path) -> BTreeSet<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect(),
        Err(_) => BTreeSet::new(),
    }
}

fn scoped_key(key: &str) -> String {
    if Path::new(key.trim()).is_absolute() {
        let trimmed = key.trim().trim_end_matches(['/', '\\']);
        if trimmed.is_empty() {
            key.trim().to_string()
        } else {
            trimmed.to_string()
        }
    } else {
        normalize_dir_key(key)
    }
}

fn absolute_forms(dir: &Path) -> Vec<PathBuf> {
    let mut forms = Vec::new();
    if let Ok(absolute) = std::path::absolute(dir) {
        forms.push(absolute);
    }
    if let Ok(canonical) = dir.canonicalize() {
        if !forms.contains(&canonical) {
            forms.push(canonical);
        }
    }
    forms
}
