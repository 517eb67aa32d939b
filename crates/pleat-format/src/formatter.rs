//! Tree-to-text rendering.
//!
//! The formatter tries to keep the in-browser appearance of the markup
//! unchanged while re-indenting it:
//! - text is trimmed, except inside whitespace-sensitive elements (`pre`,
//!   `span`, `a`, `label`, `p`) and everything below them
//! - an element whose children are only elements (and whitespace) is
//!   **stacked**: one child per line, one indent deeper
//! - any other element is **inline**: its children are concatenated
//!   directly after the open tag
//!
//! The walk keeps its own stack of open elements, so arbitrarily deep trees
//! render without recursion.

use pleat_dom::{DomTree, ElementData, NodeId, NodeType};

use crate::config::{ATTRIBUTE_QUOTE, FormatConfig};
use crate::output::Output;

/// Renders a parsed tree according to a [`FormatConfig`].
///
/// The tree is only read; the same formatter can render it any number of times.
#[derive(Debug, Clone, Copy)]
pub struct Formatter<'a> {
    tree: &'a DomTree,
    config: &'a FormatConfig,
}

/// A node whose children are being written.
#[derive(Debug)]
struct Frame<'a> {
    children: &'a [NodeId],
    next: usize,
    /// Whitespace inside is kept as is.
    preserve: bool,
    /// Each child goes on its own line.
    stacked: bool,
    /// `None` for the document root.
    end_tag: Option<&'a str>,
}

impl<'a> Formatter<'a> {
    /// Create a formatter for `tree`.
    #[must_use]
    pub const fn new(tree: &'a DomTree, config: &'a FormatConfig) -> Self {
        Self { tree, config }
    }

    /// Render all top-level nodes, one per line. Nodes that render to
    /// nothing are dropped.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = Output::new(self.config);
        let mut stack = vec![Frame {
            children: self.tree.children(self.tree.root()),
            next: 0,
            preserve: false,
            stacked: true,
            end_tag: None,
        }];

        while let Some(frame) = stack.last_mut() {
            let Some(&child) = frame.children.get(frame.next) else {
                if let Some(done) = stack.pop() {
                    Self::close(&done, &mut out);
                }
                continue;
            };
            frame.next += 1;
            let preserve = frame.preserve || self.is_sensitive_element(child);
            let own_line = frame.stacked;
            if let Some(opened) = self.write_node(child, preserve, own_line, &mut out) {
                stack.push(opened);
            }
        }
        out.finish()
    }

    fn is_sensitive_element(&self, id: NodeId) -> bool {
        self.tree
            .as_element(id)
            .is_some_and(ElementData::is_whitespace_sensitive)
    }

    /// Write one node. `own_line` is true when the parent is stacked.
    /// Returns a frame when the node is an element whose children follow.
    fn write_node(
        &self,
        id: NodeId,
        preserve: bool,
        own_line: bool,
        out: &mut Output<'_>,
    ) -> Option<Frame<'a>> {
        let node = self.tree.get(id)?;
        let NodeType::Element(element) = &node.node_type else {
            let text = self.leaf_text(&node.node_type, preserve)?;
            if own_line {
                out.start_line();
            }
            out.push_str(text);
            return None;
        };

        if own_line {
            out.start_line();
        }
        self.open_tag(element, preserve, out);
        if element.open_tag_end.is_self_closing() {
            return None;
        }

        let children = self.tree.children(id);
        let stacked = !preserve && self.has_only_element_content(children);
        if stacked {
            out.indent();
        }
        Some(Frame {
            children,
            next: 0,
            preserve,
            stacked,
            end_tag: Some(element.end_tag.as_str()),
        })
    }

    /// Text of a text or comment node, or `None` when it renders to nothing.
    fn leaf_text(&self, node_type: &'a NodeType, preserve: bool) -> Option<&'a str> {
        let text = match node_type {
            NodeType::Text(text) if preserve => text.as_str(),
            NodeType::Text(text) => text.trim(),
            NodeType::Comment(comment) if self.config.include_comments => comment.as_str(),
            NodeType::Comment(_) | NodeType::Document | NodeType::Element(_) => return None,
        };
        (!text.is_empty()).then_some(text)
    }

    /// At least one element child and no text other than whitespace.
    fn has_only_element_content(&self, children: &[NodeId]) -> bool {
        let mut has_elements = false;
        for &child in children {
            match self.tree.get(child).map(|n| &n.node_type) {
                Some(NodeType::Text(text)) if !text.trim().is_empty() => return false,
                Some(NodeType::Element(_)) => has_elements = true,
                _ => {}
            }
        }
        has_elements
    }

    /// Write the closing tag of a finished element. A stacked element puts
    /// it on its own line unless there is none.
    fn close(frame: &Frame<'_>, out: &mut Output<'_>) {
        let Some(end_tag) = frame.end_tag else {
            return;
        };
        if !frame.stacked {
            out.push_str(end_tag);
            return;
        }
        out.dedent();
        if !end_tag.is_empty() {
            out.start_line();
            out.push_str(end_tag);
        }
    }

    /// `<tag` plus attributes plus the end-of-open-tag marker.
    ///
    /// Text recovered after a malformed open tag loses its trailing
    /// whitespace unless whitespace is preserved, since the layout supplies
    /// its own line break there.
    fn open_tag(&self, element: &ElementData, preserve: bool, out: &mut Output<'_>) {
        out.push_str("<");
        out.push_str(&element.tag_name);
        for attr in &element.attrs {
            if self.config.stacks_attributes() {
                out.start_line();
                out.push_str(self.config.indent());
            } else {
                out.push_str(" ");
            }
            out.push_str(&attr.name);
            if let Some(value) = &attr.value {
                out.push_str(&format!("={ATTRIBUTE_QUOTE}{value}{ATTRIBUTE_QUOTE}"));
            }
        }
        let marker = element.open_tag_end.as_str();
        out.push_str(if preserve { marker } else { marker.trim_end() });
    }
}
