// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Document fixtures.

use cld_graph::{Document, EditOp, GraphLink, GraphNode, Polarity};

/// Node on the base layer.
pub fn node(id: &str, label: &str, x: f64, y: f64) -> GraphNode {
    GraphNode::new(id, label, x, y)
}

/// Node at the origin on `layer`, labelled with its id.
pub fn layered_node(id: &str, layer: &str) -> GraphNode {
    GraphNode::new(id, id, 0.0, 0.0).on_layer(layer)
}

/// Reinforcing link on the base layer.
pub fn reinforcing(id: &str, from: &str, to: &str) -> GraphLink {
    GraphLink::new(id, from, to, Polarity::Reinforcing)
}

/// Balancing link on the base layer.
pub fn balancing(id: &str, from: &str, to: &str) -> GraphLink {
    GraphLink::new(id, from, to, Polarity::Balancing)
}

/// The four edits of the water/population walkthrough, in order:
/// add `n1`, add `n2`, link `l1` (n1 → n2), remove `n1`.
pub fn reference_scenario() -> Vec<EditOp> {
    vec![
        EditOp::AddNode(node("n1", "Water", 10.0, 20.0)),
        EditOp::AddNode(node("n2", "Population", 30.0, 40.0)),
        EditOp::AddLink(reinforcing("l1", "n1", "n2")),
        EditOp::RemoveNode { id: "n1".into() },
    ]
}

/// Builds a [`Document`] directly, without going through a history.
///
/// # Example
///
/// ```
/// use cld_dry_tests::{node, reinforcing, DocumentBuilder};
///
/// let doc = DocumentBuilder::new()
///     .node(node("a", "A", 0.0, 0.0))
///     .node(node("b", "B", 1.0, 1.0))
///     .link(reinforcing("ab", "a", "b"))
///     .build();
/// assert_eq!(doc.links_touching("a").count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    doc: Document,
}

impl DocumentBuilder {
    /// Start from the initial document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node.
    pub fn node(mut self, node: GraphNode) -> Self {
        self.doc.nodes.push(node);
        self
    }

    /// Append a link.
    pub fn link(mut self, link: GraphLink) -> Self {
        self.doc.links.push(link);
        self
    }

    /// Add `layer` to the visible set if absent.
    pub fn show_layer(mut self, layer: &str) -> Self {
        if !self.doc.is_layer_visible(layer) {
            self.doc.layers.push(layer.to_owned());
        }
        self
    }

    /// Finish.
    pub fn build(self) -> Document {
        self.doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_layer_does_not_duplicate() {
        let doc = DocumentBuilder::new()
            .show_layer("Feedback")
            .show_layer("Feedback")
            .build();
        assert_eq!(doc.layers.len(), 2);
    }

    #[test]
    fn reference_scenario_ends_with_removal() {
        let edits = reference_scenario();
        assert_eq!(edits.len(), 4);
        assert_eq!(edits[3].kind(), "remove_node");
    }
}
