//! Post-assembly diagnostics over the finished catalog.

use std::collections::HashSet;

use crate::catalog::Catalog;

/// Report entries whose occurrences carry conflicting translator comments.
/// Conflicts signal diverging translator intent across call sites; they are
/// warned about, never corrected.
pub fn comment_conflicts(catalog: &Catalog) -> Vec<String> {
    let mut warnings = Vec::new();
    for entry in catalog.entries() {
        let distinct: HashSet<&str> = entry.comments.iter().map(String::as_str).collect();
        if distinct.len() > 1 {
            warnings.push(format!(
                "The string \"{}\" has {} different translator comments.",
                entry.original,
                distinct.len()
            ));
        }
    }
    warnings
}
