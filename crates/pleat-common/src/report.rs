//! Diagnostic output with colored terminal text.
//!
//! Used by the command-line driver to surface parse diagnostics. The library
//! crates never print; they only return diagnostics.

use std::io::IsTerminal;

use owo_colors::OwoColorize;

use crate::diagnostic::{Diagnostic, Severity};

/// Render one diagnostic as a single line, prefixed with `origin`
/// (usually the file name).
///
/// # Example
/// ```ignore
/// render_diagnostic("index.html", &diagnostic, false);
/// // "index.html: ERROR: unterminated comment at line 3, col 1"
/// ```
#[must_use]
pub fn render_diagnostic(origin: &str, diagnostic: &Diagnostic, colored: bool) -> String {
    if !colored {
        return format!("{origin}: {diagnostic}");
    }
    let label = match diagnostic.severity {
        Severity::Warning => diagnostic.severity.yellow().bold().to_string(),
        Severity::Error => diagnostic.severity.red().bold().to_string(),
    };
    format!(
        "{}: {label}: {} at {}",
        origin.bold(),
        diagnostic.kind,
        diagnostic.position.dimmed()
    )
}

/// Print one diagnostic to stderr, colored when stderr is a terminal.
pub fn report(origin: &str, diagnostic: &Diagnostic) {
    let colored = std::io::stderr().is_terminal();
    eprintln!("{}", render_diagnostic(origin, diagnostic, colored));
}

/// Print every diagnostic in order and return how many had error severity.
pub fn report_all(origin: &str, diagnostics: &[Diagnostic]) -> usize {
    for diagnostic in diagnostics {
        report(origin, diagnostic);
    }
    diagnostics.iter().filter(|d| d.is_error()).count()
}
