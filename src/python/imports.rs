//! Import statement extraction for Python source
//!
//! Recognises two line shapes:
//! - `import a, b.c as d` (plain import)
//! - `from pkg.mod import x` (from-import)
//!
//! Only the top-level package of each import is kept. Relative imports
//! (`from . import x`, `from .sub import x`) never contribute a name since
//! they always point inside the scanned project.

use regex::Regex;
use std::sync::LazyLock;

static PLAIN_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*import (.+)$").expect("plain import pattern is valid")
});

static FROM_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*from (.*?) import (?:.*)$").expect("from-import pattern is valid")
});

/// Extract raw top-level import names from a whole source file
///
/// Duplicates are kept; callers deduplicate.
pub fn extract_imports(source: &str) -> Vec<String> {
    let mut names = Vec::new();
    for line in source.lines() {
        extract_line(line, &mut names);
    }
    names
}

/// Extract raw top-level import names from a single line
pub fn extract_line(line: &str, names: &mut Vec<String>) {
    if let Some(caps) = PLAIN_IMPORT.captures(line) {
        // `import a as b, c.d` -> each entry's first token, first dotted segment
        for entry in caps[1].split(',') {
            let token = entry.split_whitespace().next().unwrap_or("");
            push_name(top_level(token), names);
        }
    }

    if let Some(caps) = FROM_IMPORT.captures(line) {
        let module = caps[1].split_whitespace().next().unwrap_or("");
        if module.starts_with('.') {
            return;
        }
        push_name(top_level(module), names);
    }
}

/// First dotted segment: `os.path` -> `os`
fn top_level(token: &str) -> &str {
    token.split('.').next().unwrap_or(token)
}

fn push_name(name: &str, names: &mut Vec<String>) {
    if is_identifier(name) {
        names.push(name.to_string());
    }
}

/// Whether `name` can be a Python module name
///
/// Filters out noise from docstrings and syntax the patterns also match,
/// such as `import (` or `import a;import b`.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}
