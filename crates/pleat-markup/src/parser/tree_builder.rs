use tracing::{debug, trace};

use pleat_common::{Diagnostic, DiagnosticKind, LineIndex};
use pleat_dom::{Attribute, DomTree, ElementData, NodeId, NodeType, OpenTagEnd};

use crate::cursor::Cursor;

/// Everything a parse produces. Parsing never fails; problems show up in
/// `diagnostics` and the tree is the best-effort reading of the input.
#[derive(Debug, Clone)]
pub struct ParseOutput {
    /// The node tree. Top-level nodes are the children of `NodeId::ROOT`.
    pub tree: DomTree,
    /// Unparsed text after the last top-level node (empty when everything
    /// was consumed).
    pub trailing_text: String,
    /// Errors and warnings in the order they were found.
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutput {
    /// Whether any diagnostic has error severity.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Convert `\r\n` and lone `\r` line endings to `\n`.
#[must_use]
pub fn normalize_line_endings(markup: &str) -> String {
    markup.replace("\r\n", "\n").replace('\r', "\n")
}

/// An element whose children are still being parsed.
#[derive(Debug, Clone, Copy)]
struct OpenElement<'a> {
    id: NodeId,
    tag_name: &'a str,
    /// Cursor at the element's `<`.
    start: Cursor<'a>,
}

/// What one scanning step produced.
enum Step<'a> {
    /// A node with nothing left to read: a comment, a self-closed or
    /// childless element, or a `script`.
    Complete(NodeId),
    /// An element whose children come next.
    Open(OpenElement<'a>),
}

/// Lenient single-pass markup parser.
///
/// The parser walks the input once, front to back, threading a [`Cursor`]
/// through each step and keeping unclosed elements on a stack. Malformed
/// constructs are recorded as diagnostics and recovered from locally: either
/// by skipping to the next `<` or, for unterminated constructs, by consuming
/// the rest of the input.
pub struct MarkupParser<'a> {
    /// The normalized, trimmed input.
    input: &'a str,

    /// Offset to line/column conversion for diagnostics.
    lines: LineIndex<'a>,

    /// Node tree. `NodeId::ROOT` (index 0) is the Document node.
    tree: DomTree,

    /// Parse issues (errors and warnings) encountered during parsing.
    issues: Vec<Diagnostic>,
}

impl<'a> MarkupParser<'a> {
    /// Create a parser over markup that has already been normalized with
    /// [`normalize_line_endings`] and trimmed.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            lines: LineIndex::new(input),
            tree: DomTree::new(),
            issues: Vec::new(),
        }
    }

    /// Run the parser and return the tree, trailing text and diagnostics.
    #[must_use]
    pub fn run(mut self) -> ParseOutput {
        let end = self.parse_nodes(Cursor::new(self.input));
        let trailing_text = end.rest().to_string();
        if !trailing_text.is_empty() {
            self.issue(DiagnosticKind::TrailingText, end);
        }
        ParseOutput {
            tree: self.tree,
            trailing_text,
            diagnostics: self.issues,
        }
    }

    /// Record a diagnostic at the cursor position.
    fn issue(&mut self, kind: DiagnosticKind, at: Cursor<'a>) {
        let diagnostic = Diagnostic::new(kind, self.lines.position(at.offset()));
        debug!(%diagnostic, "parse issue");
        self.issues.push(diagnostic);
    }

    /// Parse text runs and nodes until a top-level `<` that does not start a
    /// node (or end of input).
    ///
    /// Elements whose children are still being read live on an explicit
    /// stack, so nesting depth is bounded by memory rather than call depth.
    /// Whenever no node starts at the cursor, the innermost open element
    /// tries to take its closing tag and is popped.
    fn parse_nodes(&mut self, mut at: Cursor<'a>) -> Cursor<'a> {
        let mut open: Vec<OpenElement<'a>> = Vec::new();
        loop {
            let parent = open.last().map_or(NodeId::ROOT, |element| element.id);
            at = self.parse_text(parent, at);

            match self.parse_node(at) {
                Some((Step::Complete(id), next)) => {
                    self.tree.append_child(parent, id);
                    at = next;
                }
                Some((Step::Open(element), next)) => {
                    self.tree.append_child(parent, element.id);
                    open.push(element);
                    at = next;
                }
                None => {
                    let Some(element) = open.pop() else {
                        return at;
                    };
                    at = self.close_element(element, at);
                }
            }
        }
    }

    /// Everything up to the next `<`, as a text child of `parent`.
    fn parse_text(&mut self, parent: NodeId, at: Cursor<'a>) -> Cursor<'a> {
        let (text, next) = at.take_until('<');
        if !text.is_empty() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                trace!(text = trimmed, "found node text");
            }
            let id = self.tree.alloc(NodeType::Text(text.to_string()));
            self.tree.append_child(parent, id);
        }
        next
    }

    /// Parse one comment or element starting at `at`, which is either at a
    /// `<` or at end of input. Returns `None` when no node starts here.
    fn parse_node(&mut self, at: Cursor<'a>) -> Option<(Step<'a>, Cursor<'a>)> {
        if at.starts_with("<!-") {
            let (id, next) = self.parse_comment(at);
            return Some((Step::Complete(id), next));
        }
        if !at.starts_with("<") {
            return None;
        }
        let (tag_name, after_name) = at
            .advance(1)
            .take_while(|c| c != '/' && c != '>' && !c.is_whitespace());
        if tag_name.is_empty() {
            trace!(offset = at.offset(), "no node match");
            return None;
        }
        Some(self.parse_element(at, tag_name, after_name))
    }

    /// `<!` followed by one or more `-`, then everything through the first `-->`.
    fn parse_comment(&mut self, start: Cursor<'a>) -> (NodeId, Cursor<'a>) {
        trace!(offset = start.offset(), "found comment");
        let (_, body) = start.advance(2).take_while(|c| c == '-');
        let end = if let Some(len) = body.find("-->") {
            body.advance(len + "-->".len())
        } else {
            self.issue(DiagnosticKind::UnterminatedComment, start);
            body.to_end()
        };
        let comment = start.slice_to(end).to_string();
        (self.tree.alloc(NodeType::Comment(comment)), end)
    }

    /// The open tag, plus the content and closing tag of a `script`.
    /// Any other element that may have children is returned open.
    fn parse_element(
        &mut self,
        start: Cursor<'a>,
        tag_name: &'a str,
        after_name: Cursor<'a>,
    ) -> (Step<'a>, Cursor<'a>) {
        trace!(tag_name, "found node");
        let mut element = ElementData::new(tag_name, start.offset());
        let (attrs, at) = Self::parse_attributes(after_name);
        element.attrs = attrs;
        let (open_tag_end, at) = self.parse_open_tag_end(tag_name, at);
        element.open_tag_end = open_tag_end;

        let self_closing = element.open_tag_end.is_self_closing();
        let childless = element.is_childless();
        let script = element.is_script();
        let id = self.tree.alloc(NodeType::Element(element));

        if self_closing {
            return (Step::Complete(id), at);
        }
        if childless {
            debug!(tag_name, "childless tag found: assuming no content or children");
            return (Step::Complete(id), at);
        }

        let open = OpenElement {
            id,
            tag_name,
            start,
        };
        if script {
            debug!(tag_name, "script found: assuming unrestricted content");
            let at = self.parse_script_content(id, at);
            return (Step::Complete(id), self.close_element(open, at));
        }
        (Step::Open(open), at)
    }

    /// Match the closing tag of `element` at `at` and record it.
    fn close_element(&mut self, element: OpenElement<'a>, at: Cursor<'a>) -> Cursor<'a> {
        let (end_tag, next) = self.parse_close_tag(element.tag_name, element.start, at);
        if let Some(data) = self.tree.as_element_mut(element.id) {
            data.end_tag = end_tag;
        }
        next
    }

    /// Zero or more `name` / `name="value"` / `name='value'` attributes, each
    /// preceded by whitespace.
    fn parse_attributes(mut at: Cursor<'a>) -> (Vec<Attribute>, Cursor<'a>) {
        let mut attrs = Vec::new();
        loop {
            let (space, after_space) = at.take_while(char::is_whitespace);
            if space.is_empty() {
                break;
            }
            let (name, after_name) = after_space
                .take_while(|c| c != '=' && c != '/' && c != '>' && !c.is_whitespace());
            if name.is_empty() {
                break;
            }
            trace!(name, "found attribute");
            match Self::parse_quoted_value(after_name) {
                Some((value, next)) => {
                    attrs.push(Attribute::new(name, value));
                    at = next;
                }
                None => {
                    attrs.push(Attribute::valueless(name));
                    at = after_name;
                }
            }
        }
        (attrs, at)
    }

    /// `="..."` or `='...'`; the closing quote must match the opening one.
    fn parse_quoted_value(at: Cursor<'a>) -> Option<(&'a str, Cursor<'a>)> {
        let quote = at.rest().strip_prefix('=')?.chars().next()?;
        if quote != '"' && quote != '\'' {
            return None;
        }
        let (value, close) = at.advance(2).take_until(quote);
        if close.is_eof() {
            return None;
        }
        Some((value, close.advance(1)))
    }

    /// `>`, `/>`, or `?>` for `<?xml`. Anything else is an error; the text up
    /// to the next `<` is kept as the marker so nothing is lost.
    fn parse_open_tag_end(&mut self, tag_name: &str, at: Cursor<'a>) -> (OpenTagEnd, Cursor<'a>) {
        let marker = at.skip_whitespace();
        if marker.starts_with("/>") {
            return (OpenTagEnd::SelfClose, marker.advance(2));
        }
        if marker.starts_with(">") {
            return (OpenTagEnd::Close, marker.advance(1));
        }
        if tag_name == "?xml" && marker.starts_with("?>") {
            return (OpenTagEnd::XmlDeclaration, marker.advance(2));
        }
        self.issue(DiagnosticKind::MissingOpenTagEnd, at);
        let (skipped, next) = at.take_until('<');
        (OpenTagEnd::Recovered(skipped.to_string()), next)
    }

    /// Everything up to (not including) `</script>`, as one text child.
    fn parse_script_content(&mut self, script: NodeId, at: Cursor<'a>) -> Cursor<'a> {
        let end = if let Some(len) = at.find_ignore_ascii_case("</script>") {
            at.advance(len)
        } else {
            self.issue(DiagnosticKind::UnterminatedScript, at);
            at.to_end()
        };
        let text = self.tree.alloc(NodeType::Text(at.slice_to(end).to_string()));
        self.tree.append_child(script, text);
        end
    }

    /// Expect `</tag_name>` and return the literal closing tag text.
    ///
    /// A closing tag with a different name is reported but left in the input
    /// for an ancestor to match; no open elements are re-synchronized.
    fn parse_close_tag(
        &mut self,
        tag_name: &str,
        start: Cursor<'a>,
        at: Cursor<'a>,
    ) -> (String, Cursor<'a>) {
        let opened_at = self.lines.position(start.offset());
        let Some((closed_with, next)) = Self::match_close_tag(at) else {
            self.issue(
                DiagnosticKind::UnclosedTag {
                    tag: tag_name.to_string(),
                    opened_at,
                },
                at,
            );
            let (skipped, next) = at.take_until('<');
            return (skipped.to_string(), next);
        };

        if closed_with != tag_name {
            self.issue(
                DiagnosticKind::MismatchedCloseTag {
                    tag: tag_name.to_string(),
                    closed_with: closed_with.to_string(),
                    opened_at,
                },
                at,
            );
            return (String::new(), at);
        }

        trace!(tag_name, "closed node");
        (at.slice_to(next).to_string(), next)
    }

    /// `</`, one or more characters other than `>`, then `>`.
    fn match_close_tag(at: Cursor<'a>) -> Option<(&'a str, Cursor<'a>)> {
        if !at.starts_with("</") {
            return None;
        }
        let (name, gt) = at.advance(2).take_until('>');
        if name.is_empty() || gt.is_eof() {
            return None;
        }
        Some((name, gt.advance(1)))
    }
}
