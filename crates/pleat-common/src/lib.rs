//! Common utilities for the pleat markup formatter.
//!
//! This crate provides shared infrastructure used by the parser, the formatter
//! and the command-line driver:
//! - **Positions** - byte offset to line/column conversion
//! - **Diagnostics** - non-fatal parse errors and warnings
//! - **Reporting** - colored terminal output for diagnostics

pub mod diagnostic;
pub mod position;
pub mod report;

pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};
pub use position::{LineIndex, Position};
