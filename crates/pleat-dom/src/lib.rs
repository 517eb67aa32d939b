//! Markup node tree for the pleat formatter.
//!
//! This crate provides an arena-based tree of the three node shapes the
//! parser produces: elements, text runs and comments.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues. Each
//! child is owned by exactly one parent; nodes are only ever appended while
//! parsing and the tree is read-only afterwards.

pub mod tags;

pub use tags::{
    VoidElement, WhitespaceSensitiveTag, is_directive, is_void_element, is_whitespace_sensitive,
};

/// A type-safe index into the node tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root document node is always at index 0. Its children are the
    /// top-level nodes of the markup.
    pub const ROOT: NodeId = NodeId(0);
}

/// A node and its links into the tree.
#[derive(Debug, Clone)]
pub struct Node {
    /// What kind of node this is.
    pub node_type: NodeType,

    /// The node this one is a child of. `None` for the root and for
    /// nodes that have been allocated but not attached yet.
    pub parent: Option<NodeId>,

    /// Children in document order.
    pub children: Vec<NodeId>,
}

/// The shape of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeType {
    /// The invisible root holding the top-level nodes.
    Document,
    /// A tag with attributes and (possibly) children.
    Element(ElementData),
    /// A raw run of character content. Never has children.
    Text(String),
    /// The full raw comment text, from `<` through `-->` (or end of input
    /// when unterminated). Never has children.
    Comment(String),
}

/// One attribute of an open tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name as written.
    pub name: String,
    /// The unquoted value, or `None` for a valueless attribute like `disabled`.
    pub value: Option<String>,
}

impl Attribute {
    /// Create an attribute with a value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    /// Create a valueless attribute.
    #[must_use]
    pub fn valueless(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }
}

/// How an open tag ended.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OpenTagEnd {
    /// `>`
    #[default]
    Close,
    /// `/>`
    SelfClose,
    /// `?>`, only recognized on `<?xml ...?>`.
    XmlDeclaration,
    /// No marker was found; holds the text skipped up to the next `<` so
    /// that re-serializing reproduces the source.
    Recovered(String),
}

impl OpenTagEnd {
    /// The literal marker text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Close => ">",
            Self::SelfClose => "/>",
            Self::XmlDeclaration => "?>",
            Self::Recovered(text) => text,
        }
    }

    /// `/>` and `?>` complete the node; nothing follows it.
    #[must_use]
    pub const fn is_self_closing(&self) -> bool {
        matches!(self, Self::SelfClose | Self::XmlDeclaration)
    }
}

/// Element-specific data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// Tag name exactly as written (including a leading `!` or `?`).
    pub tag_name: String,
    /// Attributes in source order. Duplicates are kept.
    pub attrs: Vec<Attribute>,
    /// The end-of-open-tag marker.
    pub open_tag_end: OpenTagEnd,
    /// The literal closing tag text (e.g. `</div>`), empty when the element
    /// is self-closed, childless, or was never properly closed.
    pub end_tag: String,
    /// Byte offset in the normalized input where the open tag started.
    pub source_offset: usize,
}

impl ElementData {
    /// Create an element with a plain `>` open tag and no closing tag yet.
    #[must_use]
    pub fn new(tag_name: impl Into<String>, source_offset: usize) -> Self {
        Self {
            tag_name: tag_name.into(),
            attrs: Vec::new(),
            open_tag_end: OpenTagEnd::Close,
            end_tag: String::new(),
            source_offset,
        }
    }

    /// Returns the first attribute with the given name, if any.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&Attribute> {
        self.attrs.iter().find(|a| a.name == name)
    }

    /// Whether this is a void element like `br` or `img`.
    #[must_use]
    pub fn is_void(&self) -> bool {
        is_void_element(&self.tag_name)
    }

    /// Whether this is a directive like `!DOCTYPE`.
    #[must_use]
    pub fn is_directive(&self) -> bool {
        is_directive(&self.tag_name)
    }

    /// Whether the element's own tag is whitespace-sensitive.
    #[must_use]
    pub fn is_whitespace_sensitive(&self) -> bool {
        is_whitespace_sensitive(&self.tag_name)
    }

    /// Whether this is a `script` element, whose content is opaque text.
    #[must_use]
    pub fn is_script(&self) -> bool {
        self.tag_name.eq_ignore_ascii_case("script")
    }

    /// Whether the parser must not look for children.
    ///
    /// True for void elements, directives, and a `colgroup` carrying an
    /// attribute whose name contains `span` (any case).
    #[must_use]
    pub fn is_childless(&self) -> bool {
        self.is_void()
            || self.is_directive()
            || (self.tag_name.eq_ignore_ascii_case("colgroup")
                && self
                    .attrs
                    .iter()
                    .any(|a| a.name.to_ascii_lowercase().contains("span")))
    }
}

/// Arena-based node tree with O(1) node access.
///
/// All nodes live in one vector; relationships are [`NodeId`] indices.
#[derive(Debug, Clone)]
pub struct DomTree {
    /// All nodes in the tree, indexed by `NodeId`.
    /// The Document node is always at index 0 (`NodeId::ROOT`).
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new tree with just the Document node.
    #[must_use]
    pub fn new() -> Self {
        let document = Node {
            node_type: NodeType::Document,
            parent: None,
            children: Vec::new(),
        };
        Self {
            nodes: vec![document],
        }
    }

    /// Get the root document node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Appends `child` as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get mutable element data if this node is an element.
    pub fn as_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.nodes.get_mut(id.0).and_then(|n| match &mut n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Get the raw comment text if this node is a comment.
    #[must_use]
    pub fn as_comment(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Comment(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Iterate over `from` and all its descendants in document order.
    #[must_use]
    pub fn descendants(&self, from: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            stack: vec![from],
        }
    }

    /// Concatenated text of a node and all its descendants, in document order.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id).filter_map(|n| self.as_text(n)).collect()
    }

    /// First element with the given tag name in a depth-first walk from `from`
    /// (including `from` itself).
    #[must_use]
    pub fn find_element(&self, from: NodeId, tag_name: &str) -> Option<NodeId> {
        self.descendants(from)
            .find(|&id| self.as_element(id).is_some_and(|e| e.tag_name == tag_name))
    }
}

/// Pre-order walk over a subtree, see [`DomTree::descendants`].
///
/// Pending nodes are kept on a heap stack, so depth is not limited by the
/// call stack.
#[derive(Debug, Clone)]
pub struct Descendants<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack.extend(self.tree.children(id).iter().rev());
        Some(id)
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}
