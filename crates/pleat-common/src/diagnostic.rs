//! Non-fatal parse diagnostics.
//!
//! The parser never aborts on malformed markup. Every problem it recovers
//! from is recorded as a [`Diagnostic`] and returned next to the tree; the
//! caller decides whether to print them, fail a build, or ignore them.

use std::fmt;

use strum_macros::Display;
use thiserror::Error;

use crate::position::Position;

/// How serious a diagnostic is. Neither severity stops the parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum Severity {
    /// Something is a bit wrong, like extraneous text after the last node.
    #[strum(serialize = "WARNING")]
    Warning,
    /// Something is seriously wrong, like an unterminated comment.
    #[strum(serialize = "ERROR")]
    Error,
}

/// What went wrong. The `Display` output is the human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagnosticKind {
    /// `<!--` without a matching `-->`; the rest of the input became the comment.
    #[error("unterminated comment")]
    UnterminatedComment,

    /// An open tag that ends in neither `>`, `/>` nor (for `?xml`) `?>`.
    #[error("expected end-of-open-node marker")]
    MissingOpenTagEnd,

    /// A `script` element without `</script>`; the rest of the input became its content.
    #[error("unterminated script tag")]
    UnterminatedScript,

    /// An element whose closing tag never appeared.
    #[error("tag \"{tag}\" opened at {opened_at} is not closed")]
    UnclosedTag {
        /// Name of the unclosed element.
        tag: String,
        /// Where the open tag started.
        opened_at: Position,
    },

    /// An element closed by a tag with a different name.
    #[error("tag \"{tag}\" opened at {opened_at} is closed with \"{closed_with}\"")]
    MismatchedCloseTag {
        /// Name of the element being closed.
        tag: String,
        /// Name found in the closing tag.
        closed_with: String,
        /// Where the open tag started.
        opened_at: Position,
    },

    /// Text left over after the last top-level node.
    #[error("non-element text found")]
    TrailingText,
}

impl DiagnosticKind {
    /// The severity category of this kind of problem.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::TrailingText => Severity::Warning,
            Self::UnterminatedComment
            | Self::MissingOpenTagEnd
            | Self::UnterminatedScript
            | Self::UnclosedTag { .. }
            | Self::MismatchedCloseTag { .. } => Severity::Error,
        }
    }
}

/// A warning or error found while parsing, with the position it refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity, derived from `kind`.
    pub severity: Severity,
    /// The problem.
    pub kind: DiagnosticKind,
    /// Where the parser was when it noticed the problem.
    pub position: Position,
}

impl Diagnostic {
    /// Create a diagnostic, classifying its severity from the kind.
    #[must_use]
    pub const fn new(kind: DiagnosticKind, position: Position) -> Self {
        Self {
            severity: kind.severity(),
            kind,
            position,
        }
    }

    /// Whether this diagnostic has error severity.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// The human-readable message, without severity or position.
    #[must_use]
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} at {}", self.severity, self.kind, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_by_category() {
        assert_eq!(DiagnosticKind::TrailingText.severity(), Severity::Warning);
        assert_eq!(DiagnosticKind::UnterminatedComment.severity(), Severity::Error);
        assert_eq!(DiagnosticKind::UnterminatedScript.severity(), Severity::Error);
        assert_eq!(DiagnosticKind::MissingOpenTagEnd.severity(), Severity::Error);
    }

    #[test]
    fn test_mismatched_close_message() {
        let diagnostic = Diagnostic::new(
            DiagnosticKind::MismatchedCloseTag {
                tag: "b".to_string(),
                closed_with: "a".to_string(),
                opened_at: Position::new(1, 4),
            },
            Position::new(1, 7),
        );
        assert!(diagnostic.is_error());
        assert_eq!(
            diagnostic.to_string(),
            "ERROR: tag \"b\" opened at line 1, col 4 is closed with \"a\" at line 1, col 7"
        );
    }

    #[test]
    fn test_warning_display() {
        let diagnostic = Diagnostic::new(DiagnosticKind::TrailingText, Position::new(2, 1));
        assert!(!diagnostic.is_error());
        assert_eq!(diagnostic.message(), "non-element text found");
        assert_eq!(
            diagnostic.to_string(),
            "WARNING: non-element text found at line 2, col 1"
        );
    }
}
