// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Section name suggestions for config validation.

use std::path::Path;

/// Known section names for suggestions.
const KNOWN_SECTION_NAMES: &[&str] = &["merge", "coverage", "warnings"];

/// Suggest a section name for a typo.
pub fn suggest_section_name(unknown: &str) -> Option<&'static str> {
    // Empty strings can't be typos
    if unknown.is_empty() {
        return None;
    }

    let suggestion = match unknown {
        // merge
        "merging" | "dedup" | "repetitions" | "retries" => Some("merge"),
        // coverage
        "cov" | "coverge" | "xccov" | "codecov" => Some("coverage"),
        // warnings
        "warning" | "warn" | "build" | "issues" => Some("warnings"),
        _ => None,
    };

    if suggestion.is_some() {
        return suggestion;
    }

    // Try prefix matching (require at least 2 chars to avoid false positives)
    if unknown.len() >= 2 {
        for &name in KNOWN_SECTION_NAMES {
            if name.starts_with(unknown) || unknown.starts_with(name) {
                return Some(name);
            }
        }
    }

    None
}

/// Warn about unknown top-level key with suggestion.
pub fn warn_unknown_section(path: &Path, key: &str) {
    match suggest_section_name(key) {
        Some(suggested) => eprintln!(
            "xcreport: warning: {}: unknown section `{}`. Did you mean `{}`?",
            path.display(),
            key,
            suggested
        ),
        None => eprintln!(
            "xcreport: warning: {}: unknown section `{}`\n  Valid sections: {}",
            path.display(),
            key,
            KNOWN_SECTION_NAMES.join(", ")
        ),
    }
}

#[cfg(test)]
#[path = "suggest_tests.rs"]
mod tests;
