//! Output formatting for JSON and text modes
//!
//! Provides types for structured output that can be serialized to JSON
//! for machine-readable output, or displayed as text for human consumption.

use pyreqs::{Resolution, manifest};
use serde::Serialize;

/// Result of a scan operation
#[derive(Debug, Serialize)]
pub struct ScanResult {
    pub path: String,
    pub packages: Vec<String>,
}

/// Result of a resolve or remote operation
#[derive(Debug, Serialize)]
pub struct ResolveResult {
    pub requirements: Vec<RequirementEntry>,
    pub failed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// A single resolved requirement
#[derive(Debug, Serialize)]
pub struct RequirementEntry {
    pub name: String,
    pub version: String,
}

impl ResolveResult {
    /// Entries are sorted the same way the manifest is
    pub fn new(resolution: &Resolution) -> Self {
        let mut sorted: Vec<_> = resolution.requirements.iter().collect();
        sorted.sort_by(|a, b| manifest::manifest_order(a, b));

        let requirements = sorted
            .into_iter()
            .map(|r| RequirementEntry {
                name: r.name.clone(),
                version: r.version.clone(),
            })
            .collect();

        Self {
            requirements,
            failed: resolution.failed,
            output: None,
        }
    }

    pub fn with_output(mut self, output: &str) -> Self {
        self.output = Some(output.to_string());
        self
    }
}

/// Print a serializable value as JSON to stdout
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing JSON: {}", e);
            std::process::exit(1);
        }
    }
}
