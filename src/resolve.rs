//! Concurrent version resolution
//!
//! Every candidate gets its own lookup against the package index. Lookups run
//! in parallel on scoped threads and report back over a channel; the caller
//! blocks on the channel until every lookup has settled. A failed lookup only
//! shrinks the result set.

use crate::python::{LookupFailure, PackageIndex};
use crossbeam_channel::unbounded;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info, warn};

/// A distribution pinned to its latest published version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub name: String,
    pub version: String,
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=={}", self.name, self.version)
    }
}

/// Outcome of resolving a batch of candidates
#[derive(Debug, Default)]
pub struct Resolution {
    /// Confirmed requirements, in completion order
    pub requirements: Vec<Requirement>,
    /// Number of candidates that could not be resolved
    pub failed: usize,
}

impl Resolution {
    /// Number of candidates the batch was started with
    pub fn total(&self) -> usize {
        self.requirements.len() + self.failed
    }
}

/// Look up every name concurrently and collect the ones the index confirms
///
/// Never fails: lookup failures are logged and counted. Returns once every
/// lookup has either succeeded or failed.
pub fn resolve<I>(index: &I, names: &[String]) -> Resolution
where
    I: PackageIndex + ?Sized,
{
    let failed = AtomicUsize::new(0);
    let (tx, rx) = unbounded::<Requirement>();
    let mut requirements = Vec::with_capacity(names.len());

    std::thread::scope(|scope| {
        for name in names {
            let tx = tx.clone();
            let failed = &failed;
            scope.spawn(move || match index.latest_version(name) {
                Ok(version) => {
                    // Receiver outlives every sender inside the scope
                    let _ = tx.send(Requirement {
                        name: name.clone(),
                        version,
                    });
                }
                Err(failure) => {
                    failed.fetch_add(1, Ordering::SeqCst);
                    log_failure(name, &failure);
                }
            });
        }
        // Channel disconnects once the last task drops its sender
        drop(tx);

        for requirement in rx.iter() {
            info!("resolved {}", requirement);
            requirements.push(requirement);
        }
    });

    let resolution = Resolution {
        requirements,
        failed: failed.into_inner(),
    };
    debug!(
        resolved = resolution.requirements.len(),
        failed = resolution.failed,
        "resolved {} candidate(s)",
        names.len()
    );
    resolution
}

fn log_failure(name: &str, failure: &LookupFailure) {
    match failure {
        LookupFailure::NotFound => warn!("The package does not exist: {}", name),
        other => warn!("Failed to resolve {}: {}", name, other),
    }
}
