//! Source tree scanning
//!
//! Walks a project directory, collects the names that belong to the project
//! itself (directories and module files), extracts imports from every `.py`
//! file, and reduces them to the candidate third-party distributions.

use crate::classify::{NameClassifier, NameKind};
use crate::python::extract_imports;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

/// Directories never descended into
pub const DEFAULT_IGNORE_DIRS: &[&str] = &[
    ".hg",
    ".git",
    ".mypy_cache",
    ".tox",
    "__pycache__",
    "env",
    "venv",
];

/// Package marker file, never scanned for imports
const PACKAGE_MARKER: &str = "__init__.py";

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Failed to walk directory {path}: {source}")]
    Traversal {
        path: PathBuf,
        source: walkdir::Error,
    },

    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Everything learned from one walk of a source tree
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Names defined by the project itself
    pub local_names: HashSet<String>,
    /// Source files whose imports were extracted
    pub files: Vec<PathBuf>,
    /// Raw import names in first-seen order, duplicates included
    pub raw_imports: Vec<String>,
}

/// Walk `root` and extract raw imports without classifying them
pub fn walk(root: &Path, extra_ignore_dirs: &[String]) -> Result<ScanReport, ScanError> {
    let ignore = ignore_set(extra_ignore_dirs);
    let mut report = ScanReport::default();
    let mut markers = 0usize;

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            // The root itself is always scanned, whatever its name
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !is_ignored(entry.file_name(), &ignore)
        });

    for entry in walker {
        let entry = entry.map_err(|source| ScanError::Traversal {
            path: root.to_path_buf(),
            source,
        })?;
        let name = entry.file_name().to_string_lossy().into_owned();

        if entry.file_type().is_dir() {
            report.local_names.insert(name);
            continue;
        }

        let Some(stem) = name.strip_suffix(".py") else {
            continue;
        };
        report.local_names.insert(stem.to_string());
        if name == PACKAGE_MARKER {
            markers += 1;
            continue;
        }
        report.files.push(entry.into_path());
    }

    for path in &report.files {
        let bytes = std::fs::read(path).map_err(|source| ScanError::FileRead {
            path: path.clone(),
            source,
        })?;
        let imports = extract_imports(&String::from_utf8_lossy(&bytes));
        debug!("{}: {} import(s)", path.display(), imports.len());
        report.raw_imports.extend(imports);
    }

    debug!(
        files = report.files.len(),
        markers,
        local = report.local_names.len(),
        "walked {}",
        root.display()
    );
    Ok(report)
}

/// Scan `root` and return the candidate distribution names
///
/// The result has no duplicates and keeps first-seen import order.
pub fn scan(
    root: &Path,
    extra_ignore_dirs: &[String],
    classifier: &NameClassifier,
) -> Result<Vec<String>, ScanError> {
    let report = walk(root, extra_ignore_dirs)?;
    Ok(candidates(&report, classifier))
}

/// Reduce a scan report to distinct distribution names
pub fn candidates(report: &ScanReport, classifier: &NameClassifier) -> Vec<String> {
    let mut seen_imports = HashSet::new();
    let mut seen_dists = HashSet::new();
    let mut result = Vec::new();

    for name in &report.raw_imports {
        if !seen_imports.insert(name.as_str()) {
            continue;
        }
        match classifier.classify(name, &report.local_names) {
            NameKind::Candidate => {}
            kind => {
                debug!("skipping {} ({:?})", name, kind);
                continue;
            }
        }
        // Several import names can map to the same distribution
        let dist = classifier.distribution_name(name);
        if seen_dists.insert(dist.to_string()) {
            result.push(dist.to_string());
        }
    }
    result
}

fn ignore_set(extra: &[String]) -> HashSet<String> {
    DEFAULT_IGNORE_DIRS
        .iter()
        .map(|d| d.to_string())
        .chain(extra.iter().map(|d| {
            // Accept paths as well as bare names
            Path::new(d)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| d.clone())
        }))
        .map(|d| d.to_lowercase())
        .collect()
}

fn is_ignored(name: &std::ffi::OsStr, ignore: &HashSet<String>) -> bool {
    ignore.contains(&name.to_string_lossy().to_lowercase())
}
