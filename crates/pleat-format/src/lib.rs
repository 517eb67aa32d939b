//! Whitespace-aware pretty-printer and minifier for parsed markup.
//!
//! ```ignore
//! use pleat_format::{FormatConfig, format};
//!
//! let pretty = format("<div><p>Hello</p></div>", &FormatConfig::default());
//! assert_eq!(pretty, "<div>\n   <p>Hello</p>\n</div>");
//! ```

/// Formatter options and their JSON form.
pub mod config;
/// Tree-to-text rendering.
pub mod formatter;
/// Line-oriented output buffer.
pub mod output;

pub use config::{ATTRIBUTE_QUOTE, ConfigError, DEFAULT_INDENT, FormatConfig};
pub use formatter::Formatter;
pub use output::Output;

use pleat_common::Diagnostic;
use pleat_dom::DomTree;

/// Render a parsed tree to text.
#[must_use]
pub fn render(tree: &DomTree, config: &FormatConfig) -> String {
    Formatter::new(tree, config).render()
}

/// Parse and render in one step, discarding diagnostics.
#[must_use]
pub fn format(markup: &str, config: &FormatConfig) -> String {
    format_with_diagnostics(markup, config).0
}

/// Parse and render in one step, returning the parse diagnostics too.
#[must_use]
pub fn format_with_diagnostics(markup: &str, config: &FormatConfig) -> (String, Vec<Diagnostic>) {
    let output = pleat_markup::parse(markup);
    (render(&output.tree, config), output.diagnostics)
}
