//! Terminal rendering for batch progress.
//!
//! Diagnostic report lines are plain text — the template is the contract —
//! so color is applied only to the separator and progress lines, and
//! `NO_COLOR` disables even that.

use owo_colors::OwoColorize;

fn use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Print the separator shown before each tool × file invocation.
pub fn print_separator() {
    let line = "-".repeat(64);
    if use_colors() {
        println!("{}", line.bright_black());
    } else {
        println!("{}", line);
    }
}

/// Print the progress line naming the tool and target file.
pub fn print_progress(alias: &str, filename: &str) {
    if use_colors() {
        println!("Running '{}' over '{}'", alias.bold(), filename.bold());
    } else {
        println!("Running '{}' over '{}'", alias, filename);
    }
}
