//! Lenient markup parser for the pleat formatter.
//!
//! # Scope
//!
//! This crate turns HTML/XML-like text into a [`pleat_dom::DomTree`]:
//! - **Elements** with ordered attributes (`name`, `name="v"`, `name='v'`)
//! - **Text runs**, kept verbatim including whitespace-only runs
//! - **Comments**, kept verbatim including delimiters
//! - **Void elements and directives**, never given children
//! - **`script` content**, kept as one opaque text child
//!
//! Malformed input never aborts the parse. Unterminated comments, missing
//! `>`, unclosed or mismatched tags and trailing text are reported as
//! [`pleat_common::Diagnostic`]s next to a best-effort tree.
//!
//! # Not Implemented
//!
//! - Entity/character reference decoding
//! - Validation of tag or attribute names
//! - Implied end tags and stack-based error recovery

/// Read-only cursor used while scanning.
pub mod cursor;
/// Debug rendering of a parsed tree.
pub mod dump;
/// Parser and tree construction.
pub mod parser;

pub use dump::dump_tree;
pub use parser::{MarkupParser, ParseOutput, normalize_line_endings};

/// Parse markup into a node tree plus diagnostics.
///
/// Line endings are normalized to `\n` and surrounding whitespace is trimmed
/// before scanning; diagnostic positions refer to that normalized text.
#[must_use]
pub fn parse(markup: &str) -> ParseOutput {
    let normalized = normalize_line_endings(markup);
    MarkupParser::new(normalized.trim()).run()
}
