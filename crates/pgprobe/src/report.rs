//! Console rendering for the check report.
//!
//! Sections on stdout with colored pass/fail markers; tracing output stays
//! on stderr so the report reads clean when piped.

use colored::Colorize;
use std::fmt::Display;

/// Print a section header.
pub fn section(title: &str) {
    println!("\n{}", title.bold());
}

/// Print a labeled value line.
pub fn kv(label: &str, value: impl Display) {
    println!("   {label}: {value}");
}

/// Print a passing step.
pub fn pass(msg: impl Display) {
    println!("   {} {msg}", "✓".green());
}

/// Print a failing step.
pub fn fail(msg: impl Display) {
    println!("   {} {msg}", "✗".red());
}

/// Print an informational line.
pub fn info(msg: impl Display) {
    println!("   {} {msg}", "·".dimmed());
}

/// Print a remediation hint.
pub fn hint(msg: impl Display) {
    println!("     {} {msg}", "hint:".yellow());
}
