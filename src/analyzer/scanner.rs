//! Usage scanning over the configuration tree.
//!
//! The tree is walked once, in file-name order, to build the list of
//! directories and their candidate files. Each candidate is then read at most
//! once and checked against every declared variable.

use crate::analyzer::exclusions::ExclusionResolver;
use crate::analyzer::helpers::{dir_key, relative_display};
use crate::analyzer::matcher::VariableMatcher;
use crate::analyzer::types::{Granularity, Location, MissingRecord};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const DEFAULT_EXTENSIONS: &[&str] = &["tf"];
pub const DEFAULT_IGNORE_DIRS: &[&str] = &[".terraform", ".git"];

/// Which files in the tree are read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Extensions (without the dot) of candidate files.
    pub extensions: Vec<String>,
    /// Anchor file name. When set, it is the only candidate in each directory.
    pub file_name: Option<String>,
    /// Directory names pruned from the walk.
    pub ignore_dirs: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            file_name: None,
            ignore_dirs: DEFAULT_IGNORE_DIRS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ScanConfig {
    /// Whether a file with this name is a candidate. The sidecar never is.
    pub fn is_candidate(&self, file_name: &str, sidecar: Option<&str>) -> bool {
        if sidecar == Some(file_name) {
            return false;
        }

        if let Some(anchor) = &self.file_name {
            return file_name == anchor;
        }

        match Path::new(file_name).extension().and_then(|e| e.to_str()) {
            Some(ext) => self
                .extensions
                .iter()
                .any(|wanted| wanted.trim_start_matches('.') == ext),
            None => false,
        }
    }

    fn is_ignored_dir(&self, name: &str) -> bool {
        self.ignore_dirs.iter().any(|d| d == name)
    }
}

/// A traversed directory and its candidate files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanDirectory {
    /// Root-relative key, `.` for the root.
    pub key: String,
    pub path: PathBuf,
    pub files: Vec<PathBuf>,
}

/// Walk `root` and collect every directory with its candidate files.
///
/// The root is always the first entry, even when it holds no candidates or is
/// itself a symlink. Symlinked files are read; symlinked directories are not
/// descended into.
pub fn discover(root: &Path, config: &ScanConfig, sidecar: Option<&str>) -> Vec<ScanDirectory> {
    let mut directories: Vec<ScanDirectory> = Vec::new();
    let mut index: HashMap<PathBuf, usize> = HashMap::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !config.is_ignored_dir(&entry.file_name().to_string_lossy())
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::debug!("Skipping unreadable entry during walk: {}", e);
                continue;
            }
        };

        let path = entry.path();
        if entry.depth() == 0 || entry.file_type().is_dir() {
            index.insert(path.to_path_buf(), directories.len());
            directories.push(ScanDirectory {
                key: dir_key(root, path),
                path: path.to_path_buf(),
                files: Vec::new(),
            });
        } else if entry.file_type().is_file() || (entry.path_is_symlink() && path.is_file()) {
            let name = entry.file_name().to_string_lossy();
            if !config.is_candidate(&name, sidecar) {
                continue;
            }
            if let Some(slot) = path.parent().and_then(|parent| index.get(parent)) {
                directories[*slot].files.push(path.to_path_buf());
            }
        }
    }

    let candidates: usize = directories.iter().map(|d| d.files.len()).sum();
    log::info!(
        "Discovered {} director{} with {} candidate file(s) under {}",
        directories.len(),
        if directories.len() == 1 { "y" } else { "ies" },
        candidates,
        root.display()
    );

    directories
}

/// Read a candidate file. Files that cannot be opened are skipped.
fn read_candidate(path: &Path) -> Option<String> {
    match std::fs::read(path) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            log::debug!("Skipping unreadable file {}: {}", path.display(), e);
            None
        }
    }
}

/// Evaluate declared variables against the discovered tree at `granularity`.
///
/// Records come out in traversal order: directory by directory, file by file,
/// variables in declaration order within each location.
pub fn scan(
    root: &Path,
    directories: &[ScanDirectory],
    variables: &[String],
    matcher: &VariableMatcher,
    exclusions: &ExclusionResolver,
    granularity: Granularity,
) -> Vec<MissingRecord> {
    match granularity {
        Granularity::Directory => scan_per_directory(directories, variables, matcher, exclusions),
        Granularity::File => scan_per_file(root, directories, variables, matcher, exclusions),
        Granularity::Global => scan_global(root, directories, variables, matcher, exclusions),
    }
}

fn required<'a>(variables: &'a [String], excluded: &BTreeSet<String>) -> Vec<&'a str> {
    variables
        .iter()
        .map(String::as_str)
        .filter(|name| !excluded.contains(*name))
        .collect()
}

fn scan_per_directory(
    directories: &[ScanDirectory],
    variables: &[String],
    matcher: &VariableMatcher,
    exclusions: &ExclusionResolver,
) -> Vec<MissingRecord> {
    let mut records = Vec::new();

    for dir in directories {
        let excluded = exclusions.effective_exclusions(&dir.key, &dir.path);
        let required = required(variables, &excluded);
        if required.is_empty() {
            continue;
        }

        let mut used: HashSet<&str> = HashSet::new();
        for file in &dir.files {
            if required.iter().all(|name| used.contains(name)) {
                break;
            }
            if let Some(content) = read_candidate(file) {
                used.extend(matcher.used_in(&content));
            }
        }

        let mut missing = 0;
        for name in required.iter().filter(|name| !used.contains(*name)) {
            records.push(MissingRecord::new(*name, Location::Directory(dir.key.clone())));
            missing += 1;
        }

        log::debug!(
            "{}: {} candidate file(s), {} missing variable(s)",
            dir.key,
            dir.files.len(),
            missing
        );
    }

    records
}

fn scan_per_file(
    root: &Path,
    directories: &[ScanDirectory],
    variables: &[String],
    matcher: &VariableMatcher,
    exclusions: &ExclusionResolver,
) -> Vec<MissingRecord> {
    let mut records = Vec::new();

    for dir in directories.iter().filter(|d| !d.files.is_empty()) {
        let excluded = exclusions.effective_exclusions(&dir.key, &dir.path);
        let required = required(variables, &excluded);

        for file in &dir.files {
            let Some(content) = read_candidate(file) else {
                continue;
            };
            let used: HashSet<&str> = matcher.used_in(&content).into_iter().collect();
            let display = relative_display(root, file);

            for name in required.iter().filter(|name| !used.contains(*name)) {
                records.push(MissingRecord::new(*name, Location::File(display.clone())));
            }
        }
    }

    records
}

fn scan_global(
    root: &Path,
    directories: &[ScanDirectory],
    variables: &[String],
    matcher: &VariableMatcher,
    exclusions: &ExclusionResolver,
) -> Vec<MissingRecord> {
    let excluded = exclusions.effective_exclusions(".", root);
    let required = required(variables, &excluded);

    let mut used: HashSet<&str> = HashSet::new();
    'files: for dir in directories {
        for file in &dir.files {
            if required.iter().all(|name| used.contains(name)) {
                break 'files;
            }
            if let Some(content) = read_candidate(file) {
                used.extend(matcher.used_in(&content));
            }
        }
    }

    required
        .into_iter()
        .filter(|name| !used.contains(name))
        .map(|name| MissingRecord::new(name, Location::Tree))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::types::MatchStrategy;
    use std::fs;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn run(
        root: &Path,
        variables: &[&str],
        strategy: MatchStrategy,
        granularity: Granularity,
        exclusions: &ExclusionResolver,
    ) -> Vec<MissingRecord> {
        let variables = names(variables);
        let matcher = VariableMatcher::new(strategy, &variables).unwrap();
        let dirs = discover(root, &ScanConfig::default(), exclusions.sidecar_file_name());
        scan(root, &dirs, &variables, &matcher, exclusions, granularity)
    }

    #[test]
    fn test_candidate_selection() {
        let config = ScanConfig::default();
        assert!(config.is_candidate("main.tf", None));
        assert!(!config.is_candidate("MAIN.TF", None));
        assert!(!config.is_candidate("main.tfvars", None));
        assert!(!config.is_candidate("README", None));

        let anchored = ScanConfig {
            file_name: Some("env_vars.tf".into()),
            ..ScanConfig::default()
        };
        assert!(anchored.is_candidate("env_vars.tf", None));
        assert!(!anchored.is_candidate("main.tf", None));

        let txt = ScanConfig {
            extensions: names(&[".txt"]),
            ..ScanConfig::default()
        };
        assert!(txt.is_candidate("vars.txt", None));
        assert!(!txt.is_candidate("except.txt", Some("except.txt")));
    }

    #[test]
    fn test_discover_lists_root_first_and_prunes_ignored_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("b")).unwrap();
        fs::create_dir_all(root.join("a")).unwrap();
        fs::create_dir_all(root.join(".terraform/modules")).unwrap();
        fs::write(root.join("a/main.tf"), "").unwrap();
        fs::write(root.join(".terraform/modules/x.tf"), "").unwrap();
        fs::write(root.join("a/notes.md"), "").unwrap();

        let dirs = discover(root, &ScanConfig::default(), None);
        let keys: Vec<&str> = dirs.iter().map(|d| d.key.as_str()).collect();
        assert_eq!(keys, vec![".", "a", "b"]);
        assert_eq!(dirs[1].files.len(), 1);
        assert!(dirs[2].files.is_empty());
    }

    #[test]
    fn test_directory_granularity_vacuous_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("app")).unwrap();
        fs::write(root.join("main.tf"), "FOO BAR").unwrap();

        let records = run(
            root,
            &["FOO", "BAR"],
            MatchStrategy::Loose,
            Granularity::Directory,
            &ExclusionResolver::default(),
        );
        assert_eq!(
            records,
            vec![
                MissingRecord::new("FOO", Location::Directory("app".into())),
                MissingRecord::new("BAR", Location::Directory("app".into())),
            ]
        );
    }

    #[test]
    fn test_directory_granularity_any_file_satisfies() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("a.tf"), "FOO").unwrap();
        fs::write(root.join("b.tf"), "BAR").unwrap();

        let records = run(
            root,
            &["FOO", "BAR"],
            MatchStrategy::Loose,
            Granularity::Directory,
            &ExclusionResolver::default(),
        );
        assert!(records.is_empty());
    }

    #[test]
    fn test_directory_scoped_exclusion_applies_to_its_directory_only() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("web")).unwrap();
        fs::write(root.join("main.tf"), "").unwrap();
        fs::write(root.join("web/main.tf"), "").unwrap();

        let exclusions =
            ExclusionResolver::new(Vec::new(), vec![("web".to_string(), names(&["FOO"]))], None);
        let records = run(
            root,
            &["FOO"],
            MatchStrategy::Loose,
            Granularity::Directory,
            &exclusions,
        );
        assert_eq!(
            records,
            vec![MissingRecord::new("FOO", Location::Directory(".".into()))]
        );
    }

    #[test]
    fn test_file_granularity_evaluates_each_file() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("svc")).unwrap();
        fs::write(root.join("svc/a.tf"), r#"name = "FOO""#).unwrap();
        fs::write(root.join("svc/b.tf"), r#"name = "BAR""#).unwrap();

        let records = run(
            root,
            &["FOO", "BAR"],
            MatchStrategy::Strict,
            Granularity::File,
            &ExclusionResolver::default(),
        );
        assert_eq!(
            records,
            vec![
                MissingRecord::new("BAR", Location::File("svc/a.tf".into())),
                MissingRecord::new("FOO", Location::File("svc/b.tf".into())),
            ]
        );
    }

    #[test]
    fn test_file_granularity_uses_sidecar_in_anchor_directory() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("api")).unwrap();
        fs::write(root.join("api/env_vars.tf"), r#"name = "FOO""#).unwrap();
        fs::write(root.join("api/except.txt"), "BAR\n").unwrap();
        fs::write(root.join("api/main.tf"), "").unwrap();

        let variables = names(&["FOO", "BAR"]);
        let matcher = VariableMatcher::new(MatchStrategy::Strict, &variables).unwrap();
        let exclusions = ExclusionResolver::new(Vec::new(), Vec::new(), Some("except.txt".into()));
        let config = ScanConfig {
            file_name: Some("env_vars.tf".into()),
            ..ScanConfig::default()
        };
        let dirs = discover(root, &config, exclusions.sidecar_file_name());
        let records = scan(root, &dirs, &variables, &matcher, &exclusions, Granularity::File);
        assert!(records.is_empty());
    }

    #[test]
    fn test_global_granularity() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("deep/er")).unwrap();
        fs::write(root.join("deep/er/x.tf"), "FOO").unwrap();

        let records = run(
            root,
            &["FOO", "BAR"],
            MatchStrategy::Loose,
            Granularity::Global,
            &ExclusionResolver::default(),
        );
        assert_eq!(records, vec![MissingRecord::new("BAR", Location::Tree)]);
    }

    #[test]
    fn test_global_granularity_with_no_candidates_reports_everything() {
        let dir = tempfile::tempdir().unwrap();
        let records = run(
            dir.path(),
            &["FOO"],
            MatchStrategy::Loose,
            Granularity::Global,
            &ExclusionResolver::default(),
        );
        assert_eq!(records, vec![MissingRecord::new("FOO", Location::Tree)]);
    }

    #[test]
    fn test_unopenable_candidate_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read_candidate(&dir.path().join("gone.tf")), None);
        assert_eq!(read_candidate(dir.path()), None);
    }

    #[test]
    fn test_non_utf8_content_is_still_scanned() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("main.tf"), b"\xff\xfe FOO \xff").unwrap();

        let records = run(
            root,
            &["FOO"],
            MatchStrategy::Loose,
            Granularity::Directory,
            &ExclusionResolver::default(),
        );
        assert!(records.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_root_is_evaluated() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("real");
        let link = dir.path().join("link");
        fs::create_dir_all(&real).unwrap();
        fs::write(real.join("main.tf"), "nothing").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let dirs = discover(&link, &ScanConfig::default(), None);
        assert_eq!(dirs[0].key, ".");
        assert_eq!(dirs[0].files, vec![link.join("main.tf")]);

        for granularity in [Granularity::Directory, Granularity::File] {
            let records = run(
                &link,
                &["FOO"],
                MatchStrategy::Loose,
                granularity,
                &ExclusionResolver::default(),
            );
            assert_eq!(records.len(), 1, "{:?}", granularity);
        }

        fs::write(real.join("main.tf"), "FOO").unwrap();
        let records = run(
            &link,
            &["FOO"],
            MatchStrategy::Loose,
            Granularity::Global,
            &ExclusionResolver::default(),
        );
        assert!(records.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_candidate_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("tf");
        fs::create_dir_all(&root).unwrap();
        fs::write(dir.path().join("shared.tf"), "FOO").unwrap();
        std::os::unix::fs::symlink("../shared.tf", root.join("shared.tf")).unwrap();

        let records = run(
            &root,
            &["FOO"],
            MatchStrategy::Loose,
            Granularity::Directory,
            &ExclusionResolver::default(),
        );
        assert!(records.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_is_not_descended() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("tf");
        fs::create_dir_all(dir.path().join("shared")).unwrap();
        fs::create_dir_all(&root).unwrap();
        fs::write(dir.path().join("shared/x.tf"), "FOO").unwrap();
        std::os::unix::fs::symlink("../shared", root.join("shared")).unwrap();

        let dirs = discover(&root, &ScanConfig::default(), None);
        assert_eq!(dirs.len(), 1);
        assert!(dirs[0].files.is_empty());
    }
}
