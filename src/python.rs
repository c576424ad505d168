//! Python ecosystem support
//!
//! Handles:
//! - Import statement extraction from `.py` source
//! - Latest-version lookup via the PyPI JSON API

mod imports;
mod pypi;

pub use imports::{extract_imports, extract_line};
pub use pypi::{DEFAULT_INDEX_URL, DEFAULT_TIMEOUT, LookupFailure, PackageIndex, PyPiIndex};
