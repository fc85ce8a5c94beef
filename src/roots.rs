//! Engram roots: the nested outline of words reachable from the root layer.

#[cfg(test)]
#[path = "roots_test.rs"]
mod roots_test;

use crate::doc::{Document, Layer, LayerId, WordId};

/// One word in the outline, with the words of its child layer nested below.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootNode {
    pub word_id: WordId,
    pub text: String,
    pub layer_id: LayerId,
    pub depth: usize,
    /// Whether the word carries a ladder reference (resolved or not).
    pub is_ladder: bool,
    pub children: Vec<RootNode>,
}

/// Outline of the document from its root layer.
///
/// A layer laddered from several words is expanded under each of them. A
/// ladder back into a layer on the current path, or to a missing layer,
/// yields a leaf.
#[must_use]
pub fn outline(doc: &Document) -> Vec<RootNode> {
    let Some(root) = doc.root() else {
        return Vec::new();
    };
    let mut path = vec![doc.root_layer_id.as_str()];
    expand(doc, root, 0, &mut path)
}

fn expand<'a>(doc: &'a Document, layer: &'a Layer, depth: usize, path: &mut Vec<&'a str>) -> Vec<RootNode> {
    layer
        .words
        .iter()
        .map(|word| {
            let target = word.ladder_layer_id.as_deref().zip(doc.ladder_target(word));
            let children = match target {
                Some((child_id, _)) if path.contains(&child_id) => {
                    tracing::warn!(word_id = %word.id, layer_id = %child_id, "outline stops at ladder cycle");
                    Vec::new()
                }
                Some((child_id, child)) => {
                    path.push(child_id);
                    let children = expand(doc, child, depth + 1, path);
                    path.pop();
                    children
                }
                None => Vec::new(),
            };
            RootNode {
                word_id: word.id.clone(),
                text: word.text.clone(),
                layer_id: layer.id.clone(),
                depth,
                is_ladder: word.has_ladder(),
                children,
            }
        })
        .collect()
}

/// Render an outline as indented text, two spaces per depth, with `+` on
/// ladder words and `-` on the rest.
#[must_use]
pub fn render_outline(nodes: &[RootNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(&mut out, node);
    }
    out
}

fn write_node(out: &mut String, node: &RootNode) {
    let marker = if node.is_ladder { '+' } else { '-' };
    let indent = "  ".repeat(node.depth);
    out.push_str(&format!("{indent}{marker} {}\n", node.text));
    for child in &node.children {
        write_node(out, child);
    }
}
