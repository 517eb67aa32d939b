//! Line-oriented output buffer.
//!
//! Rendering writes straight into one growing string. A new line starts with
//! the separator and one indent per open stacked element; nothing written
//! afterwards is ever re-indented, so preserved text keeps its own line
//! breaks untouched.

use crate::config::FormatConfig;

/// The formatted text being built.
#[derive(Debug, Clone)]
pub struct Output<'c> {
    text: String,
    indent: &'c str,
    separator: &'c str,
    depth: usize,
}

impl<'c> Output<'c> {
    /// An empty buffer using the indent and separator of `config`.
    #[must_use]
    pub fn new(config: &'c FormatConfig) -> Self {
        Self {
            text: String::new(),
            indent: config.indent(),
            separator: config.separator(),
            depth: 0,
        }
    }

    /// Start a new line at the current depth. The first line of the output
    /// gets no separator.
    pub fn start_line(&mut self) {
        if !self.text.is_empty() {
            self.text.push_str(self.separator);
        }
        for _ in 0..self.depth {
            self.text.push_str(self.indent);
        }
    }

    /// Append text to the current line.
    pub fn push_str(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Lines started from now on get one more indent.
    pub const fn indent(&mut self) {
        self.depth += 1;
    }

    /// Undo one [`Output::indent`].
    pub const fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Current number of indents applied to new lines.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// The finished text, without a trailing separator.
    #[must_use]
    pub fn finish(self) -> String {
        self.text
    }
}
