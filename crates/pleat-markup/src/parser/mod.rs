//! Markup parser module for tree construction.

/// Single-pass parser with an explicit open-element stack.
pub mod tree_builder;

pub use tree_builder::{MarkupParser, ParseOutput, normalize_line_endings};
