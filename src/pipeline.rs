//! End-to-end requirement inference
//!
//! Local mode: scan → resolve.
//! Remote mode: clone → scan → remove clone → resolve.

use crate::classify::NameClassifier;
use crate::git::{self, GitError};
use crate::python::PackageIndex;
use crate::resolve::{Resolution, resolve};
use crate::scan::{self, ScanError};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("Failed to clone {url}: {source}")]
    Clone { url: String, source: GitError },

    #[error("Failed to create scratch directory: {0}")]
    Scratch(std::io::Error),
}

/// Scanner and resolver wired to one classifier and one package index
pub struct Pipeline<I> {
    classifier: NameClassifier,
    index: I,
    ignore_dirs: Vec<String>,
}

impl<I: PackageIndex> Pipeline<I> {
    pub fn new(classifier: NameClassifier, index: I) -> Self {
        Self {
            classifier,
            index,
            ignore_dirs: Vec::new(),
        }
    }

    /// Skip these directory names in addition to the built-in ones
    pub fn with_ignore_dirs(mut self, dirs: Vec<String>) -> Self {
        self.ignore_dirs = dirs;
        self
    }

    /// Candidate distribution names for the project at `root`
    pub fn scan_local(&self, root: &Path) -> Result<Vec<String>, ScanError> {
        let candidates = scan::scan(root, &self.ignore_dirs, &self.classifier)?;
        info!("found {} candidate(s) in {}", candidates.len(), root.display());
        Ok(candidates)
    }

    /// Resolve the requirements of the project at `root`
    pub fn resolve_local(&self, root: &Path) -> Result<Resolution, ScanError> {
        let candidates = self.scan_local(root)?;
        Ok(resolve(&self.index, &candidates))
    }

    /// Clone `url` to a scratch directory and resolve its requirements
    ///
    /// The clone is removed before resolution starts, whether or not the scan
    /// succeeded.
    pub fn resolve_remote(
        &self,
        url: &str,
        token: Option<&str>,
    ) -> Result<Resolution, PipelineError> {
        let scratch = tempfile::Builder::new()
            .prefix("pyreqs-remote-")
            .tempdir()
            .map_err(PipelineError::Scratch)?;

        info!("cloning {}", url);
        git::clone_with_token(url, token, scratch.path()).map_err(|source| {
            PipelineError::Clone {
                url: url.to_string(),
                source,
            }
        })?;

        let scanned = self.scan_local(scratch.path());
        let scratch_path = scratch.path().to_path_buf();
        if let Err(e) = scratch.close() {
            warn!("Failed to remove {}: {}", scratch_path.display(), e);
        }

        let candidates = scanned?;
        Ok(resolve(&self.index, &candidates))
    }
}
