//! User-facing output for the makepot CLI.
//!
//! Kept separate from the pipeline so the library has no printing side
//! effects.

use colored::Colorize;

use crate::pipeline::BuildSummary;

pub fn print_warning(message: &str) {
    eprintln!("{} {}", "warning:".bold().yellow(), message);
}

pub fn print_summary(summary: &BuildSummary) {
    for warning in &summary.warnings {
        print_warning(warning);
    }
    println!(
        "{} POT file successfully generated at {} ({} {}).",
        "Success:".bold().green(),
        summary.destination.display(),
        summary.entries,
        if summary.entries == 1 {
            "entry"
        } else {
            "entries"
        }
    );
}
