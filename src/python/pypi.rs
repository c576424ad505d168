//! PyPI registry integration
//!
//! Looks up the latest published version of a distribution through the
//! PyPI JSON API (`<endpoint>/<name>/json`).

use serde::Deserialize;
use std::io::Read;
use std::time::Duration;
use thiserror::Error;

/// Public PyPI JSON API endpoint
pub const DEFAULT_INDEX_URL: &str = "https://pypi.org/pypi";

/// Per-request timeout used when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// Why a single package lookup produced no version
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupFailure {
    #[error("The package does not exist")]
    NotFound,

    #[error("Package index returned HTTP {0}")]
    Status(u16),

    #[error("Failed to reach package index: {0}")]
    Transport(String),

    #[error("Failed to parse package index response: {0}")]
    Parse(String),
}

/// A package index that can report the latest version of a distribution
///
/// Shared by all resolver tasks, hence `Send + Sync`.
pub trait PackageIndex: Send + Sync {
    fn latest_version(&self, name: &str) -> Result<String, LookupFailure>;
}

/// PyPI (or a PyPI-compatible mirror) over HTTP
pub struct PyPiIndex {
    agent: ureq::Agent,
    endpoint: String,
}

impl PyPiIndex {
    pub fn new(endpoint: &str, timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build();

        Self {
            agent: ureq::Agent::new_with_config(config),
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for PyPiIndex {
    fn default() -> Self {
        Self::new(DEFAULT_INDEX_URL, DEFAULT_TIMEOUT)
    }
}

impl PackageIndex for PyPiIndex {
    fn latest_version(&self, name: &str) -> Result<String, LookupFailure> {
        let url = format!("{}/{}/json", self.endpoint, name);

        let response = self
            .agent
            .get(&url)
            .header("User-Agent", "pyreqs")
            .call()
            .map_err(|e| LookupFailure::Transport(e.to_string()))?;

        match response.status().as_u16() {
            200 => {}
            404 => return Err(LookupFailure::NotFound),
            code => return Err(LookupFailure::Status(code)),
        }

        // Metadata of packages with many releases can exceed ureq's default body cap
        let mut body = response.into_body();
        parse_version(body.with_config().limit(u64::MAX).reader())
    }
}

/// PyPI JSON API response structure
#[derive(Deserialize)]
struct PyPiMetadata {
    info: PackageInfo,
}

#[derive(Deserialize)]
struct PackageInfo {
    version: String,
}

/// Extract `info.version` from a streamed PyPI JSON response body
fn parse_version<R: Read>(body: R) -> Result<String, LookupFailure> {
    let metadata: PyPiMetadata = serde_json::from_reader(body).map_err(|e| {
        if e.is_io() {
            LookupFailure::Transport(e.to_string())
        } else {
            LookupFailure::Parse(e.to_string())
        }
    })?;

    let version = metadata.info.version.trim();
    if version.is_empty() {
        return Err(LookupFailure::Parse("empty version field".to_string()));
    }
    Ok(version.to_string())
}
