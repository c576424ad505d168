//! Standard-library and alias lookup tables
//!
//! Both tables are plain line-oriented text:
//! - stdlib: one module name per line
//! - mapping: `import_name:distribution_name` per line
//!
//! Built-in copies are embedded in the binary. A table file that cannot be
//! read degrades to an empty table instead of failing the run.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, warn};

const BUILTIN_STDLIB: &str = include_str!("../data/stdlib");
const BUILTIN_MAPPING: &str = include_str!("../data/mapping");

/// Read-only lookup tables, loaded once per process
#[derive(Debug, Clone, Default)]
pub struct LookupTables {
    pub stdlib: HashSet<String>,
    pub aliases: HashMap<String, String>,
}

impl LookupTables {
    /// Tables shipped with the binary
    pub fn builtin() -> Self {
        Self {
            stdlib: parse_stdlib(BUILTIN_STDLIB),
            aliases: parse_mapping(BUILTIN_MAPPING),
        }
    }

    /// Load tables, replacing a built-in table with a file when a path is given
    pub fn load(stdlib_file: Option<&Path>, mapping_file: Option<&Path>) -> Self {
        let stdlib = match stdlib_file {
            Some(path) => read_table(path).map(|c| parse_stdlib(&c)).unwrap_or_default(),
            None => parse_stdlib(BUILTIN_STDLIB),
        };
        let aliases = match mapping_file {
            Some(path) => read_table(path).map(|c| parse_mapping(&c)).unwrap_or_default(),
            None => parse_mapping(BUILTIN_MAPPING),
        };

        debug!(
            stdlib = stdlib.len(),
            aliases = aliases.len(),
            "loaded lookup tables"
        );
        Self { stdlib, aliases }
    }

    pub fn is_stdlib(&self, name: &str) -> bool {
        self.stdlib.contains(name)
    }

    pub fn alias(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }
}

fn read_table(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) => {
            warn!("lookup table {} unavailable, using empty table: {}", path.display(), e);
            None
        }
    }
}

/// Parse a newline-separated list of standard-library names
pub fn parse_stdlib(content: &str) -> HashSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Parse `import_name:distribution_name` pairs
///
/// Lines that don't split into exactly two non-empty parts are skipped.
pub fn parse_mapping(content: &str) -> HashMap<String, String> {
    let mut aliases = HashMap::new();
    for line in content.lines().map(str::trim) {
        if line.starts_with('#') {
            continue;
        }
        let parts: Vec<&str> = line.split(':').map(str::trim).collect();
        if let [from, to] = parts.as_slice()
            && !from.is_empty()
            && !to.is_empty()
        {
            aliases.insert(from.to_string(), to.to_string());
        }
    }
    aliases
}
