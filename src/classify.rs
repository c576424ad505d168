//! Name classification and distribution-name mapping
//!
//! Decides whether an imported name is part of the standard library, part of
//! the scanned project, or a candidate third-party dependency, and maps
//! candidates to the name they are published under.

use crate::tables::LookupTables;
use std::collections::{HashMap, HashSet};

/// Import names that are always rewritten, regardless of the alias table
pub const DEFAULT_OVERRIDES: &[(&str, &str)] = &[("tensorflow", "tensorflow-gpu")];

/// What an imported name refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Stdlib,
    Local,
    Candidate,
}

/// Classifies raw import names and maps them to distribution names
#[derive(Debug, Clone)]
pub struct NameClassifier {
    tables: LookupTables,
    overrides: HashMap<String, String>,
}

impl NameClassifier {
    /// Classifier with the default override rules
    pub fn new(tables: LookupTables) -> Self {
        Self::with_overrides(tables, HashMap::new())
    }

    /// Classifier whose override rules are the defaults merged with `extra`
    ///
    /// Entries in `extra` replace a default rule for the same import name.
    pub fn with_overrides(tables: LookupTables, extra: HashMap<String, String>) -> Self {
        let mut overrides: HashMap<String, String> = DEFAULT_OVERRIDES
            .iter()
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect();
        overrides.extend(extra);
        Self { tables, overrides }
    }

    pub fn classify(&self, name: &str, local: &HashSet<String>) -> NameKind {
        if local.contains(name) {
            NameKind::Local
        } else if self.tables.is_stdlib(name) {
            NameKind::Stdlib
        } else {
            NameKind::Candidate
        }
    }

    /// Canonical distribution name for an import name
    pub fn distribution_name<'a>(&'a self, name: &'a str) -> &'a str {
        if let Some(target) = self.overrides.get(name) {
            return target;
        }
        self.tables.alias(name).unwrap_or(name)
    }
}
