//! Requirements manifest output
//!
//! One `name==version` per line, sorted case-insensitively so the same
//! project always produces the same file regardless of lookup timing.

use crate::resolve::Requirement;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Manifest order: case-insensitive by name, exact name breaks ties
pub fn manifest_order(a: &Requirement, b: &Requirement) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
}

/// Render requirements as manifest text
pub fn render_manifest(requirements: &[Requirement]) -> String {
    let mut sorted: Vec<&Requirement> = requirements.iter().collect();
    sorted.sort_by(|a, b| manifest_order(a, b));

    let mut output = String::new();
    for requirement in sorted {
        output.push_str(&requirement.to_string());
        output.push('\n');
    }
    output
}

/// Write requirements to `path`, creating parent directories as needed
pub fn write_manifest(path: &Path, requirements: &[Requirement]) -> Result<(), ManifestError> {
    let to_error = |source: std::io::Error| ManifestError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(to_error)?;
    }
    std::fs::write(path, render_manifest(requirements)).map_err(to_error)
}
