//! Formatter configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Quote character wrapped around every attribute value on output.
pub const ATTRIBUTE_QUOTE: char = '"';

/// Default indent: three spaces.
pub const DEFAULT_INDENT: &str = "   ";

/// Errors from loading a [`FormatConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON was malformed or contained unknown keys or wrong types.
    #[error("invalid format configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Options controlling how a tree is rendered.
///
/// Deserializes from JSON with camelCase keys; missing keys take their
/// defaults and unknown keys are rejected:
///
/// ```json
/// { "indentUnit": "  ", "minify": false, "indentAttributes": true, "includeComments": false }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct FormatConfig {
    /// Text prepended once per nesting level.
    pub indent_unit: String,
    /// Render everything on one line with no indentation.
    pub minify: bool,
    /// Put each attribute on its own line, one level deeper than its tag.
    pub indent_attributes: bool,
    /// Emit comment nodes; when false they are dropped.
    pub include_comments: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent_unit: DEFAULT_INDENT.to_string(),
            minify: false,
            indent_attributes: false,
            include_comments: true,
        }
    }
}

impl FormatConfig {
    /// The default configuration with minification turned on.
    #[must_use]
    pub fn minified() -> Self {
        Self {
            minify: true,
            ..Self::default()
        }
    }

    /// Parse a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if the text is not a valid configuration object.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The indent actually applied: empty when minifying.
    #[must_use]
    pub fn indent(&self) -> &str {
        if self.minify { "" } else { &self.indent_unit }
    }

    /// The text placed between output lines: empty when minifying.
    #[must_use]
    pub const fn separator(&self) -> &'static str {
        if self.minify { "" } else { "\n" }
    }

    /// Whether attributes go on their own lines. Never when minifying,
    /// since an empty separator would fuse them into the tag name.
    #[must_use]
    pub const fn stacks_attributes(&self) -> bool {
        self.indent_attributes && !self.minify
    }
}
