//! Shared utility functions for tree reading

use std::ffi::OsStr;

use glob::Pattern;

/// Check if an entry name matches any of the ignore patterns.
pub fn should_ignore_name(name: &str, ignore_patterns: &[String]) -> bool {
    ignore_patterns
        .iter()
        .any(|pattern| name == pattern || glob_match(pattern, name))
}

/// Match a glob pattern against a name.
pub fn glob_match(pattern: &str, name: &str) -> bool {
    Pattern::new(pattern)
        .map(|p| p.matches(name))
        .unwrap_or(false)
}

/// Convert an entry name to a string key.
///
/// Non-UTF-8 names are byte-escaped (`a\xff`) instead of lossily decoded, so
/// distinct names stay distinct keys.
pub fn entry_name(file_name: &OsStr) -> String {
    match file_name.to_str() {
        Some(name) => name.to_string(),
        None => file_name.as_encoded_bytes().escape_ascii().to_string(),
    }
}
