//! Graph projection: flattens the layer tree into 3D nodes and edges.
//!
//! DESIGN
//! ======
//! Traversal is depth-first from the root layer, following ladders inline as
//! each word is visited. Every layer is drawn in its own plane at
//! `z = -depth * LAYER_SPACING_Z`, and grid y is negated so grid-down reads as
//! visually downward. When a ladder is followed, the child layer is translated
//! so its first word's center sits directly under the parent word; an empty
//! child layer is drawn as a single placeholder node in that spot.
//!
//! Every ladder gets an edge. A layer laddered from several words is projected
//! once under each of them. A ladder back into a layer on the current
//! descent path (a cycle) gets its edge but is not descended into again, and
//! ladders to missing layers are skipped; both are logged as warnings.
//!
//! [`route`] walks a projected graph from one word up to its ancestry and
//! down its primary line of descendants.

#[cfg(test)]
#[path = "graph_test.rs"]
mod graph_test;

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::consts::{EMPTY_LAYER_TEXT, GRID_UNIT, LAYER_SPACING_Z};
use crate::doc::{Document, Layer, LayerId, WordPlacement};
use crate::geometry::{Point, word_center};

/// A 3D position `[x, y, z]`.
pub type Position = [f64; 3];

/// Kind of a graph edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Between consecutive words of one layer.
    Chain,
    /// From a word to the first word (or placeholder) of its child layer.
    Ladder,
}

/// One projected word, or the placeholder for an empty child layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    /// The word id, or `virtual-<layer id>` for a placeholder.
    pub id: String,
    pub text: String,
    pub position: Position,
    pub layer_id: LayerId,
    pub depth: usize,
    /// Index of the word in its layer; 0 for a placeholder.
    pub word_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ladder_layer_id: Option<LayerId>,
    /// True for an empty-layer placeholder.
    #[serde(default)]
    pub placeholder: bool,
}

/// A chain or ladder edge between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    pub id: String,
    pub start_node_id: String,
    pub end_node_id: String,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    pub start_pos: Position,
    pub end_pos: Position,
    /// Layer of the start node.
    pub layer_id: LayerId,
    /// Depth of the start node.
    pub depth: usize,
}

/// The flattened visualization graph of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngramGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl EngramGraph {
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Edges of one kind, in emission order.
    pub fn edges_of(&self, kind: EdgeKind) -> impl Iterator<Item = &GraphEdge> {
        self.edges.iter().filter(move |e| e.kind == kind)
    }
}

/// Project a layer-plane point at `depth` into 3D.
#[allow(clippy::cast_precision_loss)]
fn project(p: Point, depth: usize) -> Position {
    [p.x * GRID_UNIT, -p.y * GRID_UNIT, -(depth as f64) * LAYER_SPACING_Z]
}

fn translate(p: Point, offset: Point) -> Point {
    Point::new(p.x + offset.x, p.y + offset.y)
}

struct Projector<'a> {
    doc: &'a Document,
    /// Layers on the current descent path, root first.
    path: Vec<&'a str>,
    graph: EngramGraph,
}

impl<'a> Projector<'a> {
    fn visit_layer(&mut self, layer: &'a Layer, offset: Point, depth: usize) {
        let mut prev: Option<(&WordPlacement, Position)> = None;
        for (word_index, word) in layer.words.iter().enumerate() {
            let center = translate(word_center(word), offset);
            let pos = project(center, depth);
            self.graph.nodes.push(GraphNode {
                id: word.id.clone(),
                text: word.text.clone(),
                position: pos,
                layer_id: layer.id.clone(),
                depth,
                word_index,
                ladder_layer_id: word.ladder_layer_id.clone(),
                placeholder: false,
            });

            if let Some((prev_word, prev_pos)) = prev {
                self.graph.edges.push(GraphEdge {
                    id: format!("chain-{}-{}", prev_word.id, word.id),
                    start_node_id: prev_word.id.clone(),
                    end_node_id: word.id.clone(),
                    kind: EdgeKind::Chain,
                    start_pos: prev_pos,
                    end_pos: pos,
                    layer_id: layer.id.clone(),
                    depth,
                });
            }

            self.follow_ladder(word, &layer.id, center, pos, depth);
            prev = Some((word, pos));
        }
    }

    /// Emit the ladder edge of `word` (drawn at plane point `anchor`) and
    /// descend into its child layer unless that layer is on the current path.
    fn follow_ladder(&mut self, word: &WordPlacement, layer_id: &str, anchor: Point, pos: Position, depth: usize) {
        let Some(child_id) = word.ladder_layer_id.as_deref() else {
            return;
        };
        let doc = self.doc;
        let Some((child_key, child)) = doc.layers_by_id.get_key_value(child_id) else {
            tracing::warn!(word_id = %word.id, %child_id, "skipping dangling ladder");
            return;
        };
        let on_path = self.path.contains(&child_key.as_str());

        let first = child.words.first();
        let first_center = first.map_or(Point::new(0.0, 0.0), word_center);
        let child_offset = Point::new(anchor.x - first_center.x, anchor.y - first_center.y);
        let child_pos = project(translate(first_center, child_offset), depth + 1);

        let end_node_id = match first {
            Some(first_word) => first_word.id.clone(),
            None => {
                let id = format!("virtual-{child_id}");
                self.graph.nodes.push(GraphNode {
                    id: id.clone(),
                    text: EMPTY_LAYER_TEXT.to_owned(),
                    position: child_pos,
                    layer_id: child_id.to_owned(),
                    depth: depth + 1,
                    word_index: 0,
                    ladder_layer_id: None,
                    placeholder: true,
                });
                id
            }
        };

        self.graph.edges.push(GraphEdge {
            id: format!("ladder-{}-{end_node_id}", word.id),
            start_node_id: word.id.clone(),
            end_node_id,
            kind: EdgeKind::Ladder,
            start_pos: pos,
            end_pos: child_pos,
            layer_id: layer_id.to_owned(),
            depth,
        });

        if on_path {
            tracing::warn!(word_id = %word.id, %child_id, "ladder cycle, not descending");
        } else if first.is_some() {
            self.path.push(child_key.as_str());
            self.visit_layer(child, child_offset, depth + 1);
            self.path.pop();
        }
    }
}

/// Project the whole document, starting at its root layer with no offset.
///
/// A document whose root layer is missing projects to an empty graph.
#[must_use]
pub fn project_graph(doc: &Document) -> EngramGraph {
    let mut projector = Projector { doc, path: Vec::new(), graph: EngramGraph::default() };
    if let Some((root_key, root)) = doc.layers_by_id.get_key_value(&doc.root_layer_id) {
        projector.path.push(root_key.as_str());
        projector.visit_layer(root, Point::new(0.0, 0.0), 0);
    }
    projector.graph
}

/// Word centers of a layer in chain order, for drawing the chain path.
/// Empty unless the layer has at least two words.
#[must_use]
pub fn chain_path(layer: &Layer) -> Vec<Point> {
    if layer.words.len() < 2 {
        return Vec::new();
    }
    layer.words.iter().map(word_center).collect()
}

/// The route through `word_id`: its ancestry, root-most first, then its
/// descendants.
///
/// Ancestry follows the first incoming edge of each node upward. Descendants
/// follow one outgoing edge per node, a ladder when there is one and
/// otherwise the first edge. No node appears twice, so cycles end the walk.
/// Where node ids repeat (a layer projected under several parents) the last
/// node with the id is used.
#[must_use]
pub fn route<'g>(graph: &'g EngramGraph, word_id: &str) -> Vec<&'g GraphNode> {
    let by_id: HashMap<&str, &GraphNode> = graph.nodes.iter().map(|n| (n.id.as_str(), n)).collect();
    let mut incoming: HashMap<&str, Vec<&GraphEdge>> = HashMap::new();
    let mut outgoing: HashMap<&str, Vec<&GraphEdge>> = HashMap::new();
    for edge in &graph.edges {
        incoming.entry(edge.end_node_id.as_str()).or_default().push(edge);
        outgoing.entry(edge.start_node_id.as_str()).or_default().push(edge);
    }

    let mut seen: HashSet<&str> = HashSet::new();
    let mut nodes = Vec::new();

    let mut up = Some(word_id);
    while let Some(id) = up {
        let Some(node) = by_id.get(id) else {
            break;
        };
        if !seen.insert(node.id.as_str()) {
            break;
        }
        nodes.push(*node);
        up = incoming.get(id).and_then(|edges| edges.first()).map(|e| e.start_node_id.as_str());
    }
    nodes.reverse();

    let mut current = word_id;
    while let Some(edges) = outgoing.get(current) {
        let Some(edge) = edges.iter().find(|e| e.kind == EdgeKind::Ladder).or_else(|| edges.first()).copied() else {
            break;
        };
        let next = edge.end_node_id.as_str();
        if !seen.insert(next) {
            break;
        }
        let Some(node) = by_id.get(next) else {
            break;
        };
        nodes.push(*node);
        current = next;
    }
    nodes
}
