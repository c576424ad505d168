//! Infer a Python project's third-party requirements from its imports
//!
//! The pipeline scans `.py` files for `import` / `from ... import` lines,
//! drops names defined by the project or the standard library, maps the rest
//! to distribution names, and pins each one to its latest version on PyPI.

pub mod classify;
pub mod config;
pub mod git;
pub mod manifest;
pub mod pipeline;
pub mod python;
pub mod resolve;
pub mod scan;
pub mod tables;

pub use classify::NameClassifier;
pub use pipeline::{Pipeline, PipelineError};
pub use resolve::{Requirement, Resolution};
pub use tables::LookupTables;
