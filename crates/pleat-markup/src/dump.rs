use std::fmt::Write;

use pleat_dom::{DomTree, NodeId, NodeType};

/// Render a tree for debugging, one node per line, two spaces per level.
///
/// Spaces in text runs are shown as `·` and newlines as `\n` so that
/// whitespace-only nodes stay visible.
#[must_use]
pub fn dump_tree(tree: &DomTree) -> String {
    let mut out = String::new();
    let mut pending = vec![(tree.root(), 0)];
    while let Some((id, indent)) = pending.pop() {
        write_node(tree, id, indent, &mut out);
        pending.extend(tree.children(id).iter().rev().map(|&child| (child, indent + 1)));
    }
    out
}

fn write_node(tree: &DomTree, id: NodeId, indent: usize, out: &mut String) {
    let prefix = "  ".repeat(indent);
    let Some(node) = tree.get(id) else {
        return;
    };
    let _ = match &node.node_type {
        NodeType::Document => writeln!(out, "{prefix}Document"),
        NodeType::Element(data) => {
            let mut tag = data.tag_name.clone();
            for attr in &data.attrs {
                match &attr.value {
                    Some(value) => {
                        let _ = write!(tag, " {}=\"{value}\"", attr.name);
                    }
                    None => {
                        let _ = write!(tag, " {}", attr.name);
                    }
                }
            }
            writeln!(
                out,
                "{prefix}<{tag}{}{}",
                data.open_tag_end.as_str(),
                data.end_tag
            )
        }
        NodeType::Text(data) => {
            let display = data.replace('\n', "\\n").replace(' ', "\u{00B7}");
            writeln!(out, "{prefix}\"{display}\"")
        }
        NodeType::Comment(data) => writeln!(out, "{prefix}{data}"),
    };
}
