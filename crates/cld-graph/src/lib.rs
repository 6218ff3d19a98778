// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Causal-loop-diagram document model shared by the history store and tools.
//! Pure data (nodes, links, visible layers) with deterministic hashing.
//!
//! A [`Document`] is a value: [`Document::with_edit`] returns the next
//! snapshot and leaves the receiver untouched, so a snapshot archived in a
//! history stack can never be corrupted by a later edit.

mod error;
mod op;

use std::collections::HashSet;

use blake3::Hash;
use ciborium::ser::into_writer;
use serde::{Deserialize, Serialize};

pub use error::{GraphError, IntegrityError};
pub use op::EditOp;

/// Stable node identifier.
pub type NodeId = String;
/// Stable link identifier.
pub type LinkId = String;
/// BLAKE3 digest of a canonical document (32 bytes).
pub type Hash32 = [u8; 32];

/// Layer every fresh document starts with, visible.
pub const BASE_LAYER: &str = "Base Loops";

/// Causal polarity of a link.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    /// Change at the source pushes the target in the same direction.
    Reinforcing,
    /// Change at the source pushes the target in the opposite direction.
    Balancing,
}

impl Polarity {
    /// Wire name of the polarity.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reinforcing => "reinforcing",
            Self::Balancing => "balancing",
        }
    }
}

/// Variable (stock) placed on the canvas.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphNode {
    /// Node identifier; never changes after creation.
    pub id: NodeId,
    /// Canvas x coordinate.
    pub x: f64,
    /// Canvas y coordinate.
    pub y: f64,
    /// Display text.
    pub label: String,
    /// Layer the node belongs to.
    pub layer: String,
}

impl GraphNode {
    /// Node on [`BASE_LAYER`].
    pub fn new(id: impl Into<NodeId>, label: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            label: label.into(),
            layer: BASE_LAYER.to_owned(),
        }
    }

    /// Move the node to another layer.
    pub fn on_layer(mut self, layer: impl Into<String>) -> Self {
        self.layer = layer.into();
        self
    }
}

/// Directed causal relationship between two nodes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GraphLink {
    /// Link identifier.
    pub id: LinkId,
    /// Source node id.
    pub from: NodeId,
    /// Target node id.
    pub to: NodeId,
    /// Reinforcing or balancing.
    #[serde(rename = "type")]
    pub polarity: Polarity,
    /// Layer the link belongs to.
    pub layer: String,
}

impl GraphLink {
    /// Link on [`BASE_LAYER`].
    pub fn new(
        id: impl Into<LinkId>,
        from: impl Into<NodeId>,
        to: impl Into<NodeId>,
        polarity: Polarity,
    ) -> Self {
        Self {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            polarity,
            layer: BASE_LAYER.to_owned(),
        }
    }

    /// Move the link to another layer.
    pub fn on_layer(mut self, layer: impl Into<String>) -> Self {
        self.layer = layer.into();
        self
    }

    /// True when either endpoint is `node`.
    pub fn touches(&self, node: &str) -> bool {
        self.from == node || self.to == node
    }
}

/// One immutable snapshot of the diagram.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Nodes in insertion (display) order.
    pub nodes: Vec<GraphNode>,
    /// Links in insertion order.
    pub links: Vec<GraphLink>,
    /// Visible layer names, no duplicates.
    pub layers: Vec<String>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            links: Vec::new(),
            layers: vec![BASE_LAYER.to_owned()],
        }
    }
}

impl Document {
    /// First node with the given id.
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// First link with the given id.
    pub fn link(&self, id: &str) -> Option<&GraphLink> {
        self.links.iter().find(|l| l.id == id)
    }

    /// Links with `node` as either endpoint.
    pub fn links_touching<'a>(&'a self, node: &'a str) -> impl Iterator<Item = &'a GraphLink> {
        self.links.iter().filter(move |l| l.touches(node))
    }

    /// Whether `layer` is in the visible set.
    pub fn is_layer_visible(&self, layer: &str) -> bool {
        self.layers.iter().any(|l| l == layer)
    }

    /// No nodes and no links.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }

    /// Compute the snapshot that follows `op`. `self` is not modified.
    ///
    /// Edits addressing an unknown id yield an equal document.
    pub fn with_edit(&self, op: &EditOp) -> Self {
        let mut next = self.clone();
        next.apply_in_place(op);
        next
    }

    fn apply_in_place(&mut self, op: &EditOp) {
        match op {
            EditOp::AddNode(node) => self.nodes.push(node.clone()),
            EditOp::MoveNode { id, x, y } => {
                for node in self.nodes.iter_mut().filter(|n| n.id == *id) {
                    node.x = *x;
                    node.y = *y;
                }
            }
            EditOp::RemoveNode { id } => {
                self.nodes.retain(|n| n.id != *id);
                // cascade in the same transition: no dangling links in any snapshot
                self.links.retain(|l| !l.touches(id));
            }
            EditOp::AddLink(link) => self.links.push(link.clone()),
            EditOp::RemoveLink { id } => self.links.retain(|l| l.id != *id),
            EditOp::ToggleLayer { name } => {
                if let Some(pos) = self.layers.iter().position(|l| l == name) {
                    self.layers.remove(pos);
                } else {
                    self.layers.push(name.clone());
                }
            }
        }
    }

    /// Referential checks applied before an edit in strict mode.
    ///
    /// Rejects duplicate node/link ids and links whose endpoints are not
    /// nodes of this document. Every other edit passes.
    pub fn check(&self, op: &EditOp) -> Result<(), IntegrityError> {
        match op {
            EditOp::AddNode(node) => {
                if self.node(&node.id).is_some() {
                    return Err(IntegrityError::DuplicateNode(node.id.clone()));
                }
            }
            EditOp::AddLink(link) => {
                if self.link(&link.id).is_some() {
                    return Err(IntegrityError::DuplicateLink(link.id.clone()));
                }
                for endpoint in [&link.from, &link.to] {
                    if self.node(endpoint).is_none() {
                        return Err(IntegrityError::DanglingEndpoint {
                            link: link.id.clone(),
                            node: endpoint.clone(),
                        });
                    }
                }
            }
            EditOp::MoveNode { .. }
            | EditOp::RemoveNode { .. }
            | EditOp::RemoveLink { .. }
            | EditOp::ToggleLayer { .. } => {}
        }
        Ok(())
    }

    /// Whole-document form of [`Document::check`].
    ///
    /// Reports the first duplicate node id, duplicate link id or link
    /// endpoint that is not a node of this document.
    pub fn validate(&self) -> Result<(), IntegrityError> {
        let mut node_ids = HashSet::new();
        for node in &self.nodes {
            if !node_ids.insert(node.id.as_str()) {
                return Err(IntegrityError::DuplicateNode(node.id.clone()));
            }
        }
        let mut link_ids = HashSet::new();
        for link in &self.links {
            if !link_ids.insert(link.id.as_str()) {
                return Err(IntegrityError::DuplicateLink(link.id.clone()));
            }
            for endpoint in [&link.from, &link.to] {
                if !node_ids.contains(endpoint.as_str()) {
                    return Err(IntegrityError::DanglingEndpoint {
                        link: link.id.clone(),
                        node: endpoint.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Drop repeated layer names, keeping the first occurrence.
    ///
    /// Returns the number of entries removed.
    pub fn dedup_layers(&mut self) -> usize {
        let before = self.layers.len();
        let mut seen = HashSet::new();
        self.layers.retain(|layer| seen.insert(layer.clone()));
        before - self.layers.len()
    }

    /// Canonical serialization (sorted nodes, links and layers) for hashing/comparison.
    ///
    /// Sort keys cover every field, so documents holding duplicate ids
    /// still hash independently of insertion order.
    pub fn to_canonical_bytes(&self) -> Result<Vec<u8>, GraphError> {
        let mut doc = self.clone();
        doc.nodes.sort_by(|a, b| node_key(a).cmp(&node_key(b)));
        doc.links.sort_by(|a, b| link_key(a).cmp(&link_key(b)));
        doc.layers.sort();
        let mut bytes = Vec::new();
        into_writer(&doc, &mut bytes).map_err(|err| GraphError::Encode(err.to_string()))?;
        Ok(bytes)
    }

    /// Compute blake3 hash of the canonical form.
    pub fn compute_hash(&self) -> Result<Hash32, GraphError> {
        let h: Hash = blake3::hash(&self.to_canonical_bytes()?);
        Ok(h.into())
    }
}

fn node_key(n: &GraphNode) -> (&str, &str, &str, u64, u64) {
    (&n.id, &n.label, &n.layer, n.x.to_bits(), n.y.to_bits())
}

fn link_key(l: &GraphLink) -> (&str, &str, &str, &str, &str) {
    (&l.from, &l.to, &l.id, l.polarity.as_str(), &l.layer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_nodes_one_link() -> Document {
        Document::default()
            .with_edit(&EditOp::AddNode(GraphNode::new("n1", "Water", 10.0, 20.0)))
            .with_edit(&EditOp::AddNode(GraphNode::new("n2", "Population", 30.0, 40.0)))
            .with_edit(&EditOp::AddLink(GraphLink::new(
                "l1",
                "n1",
                "n2",
                Polarity::Reinforcing,
            )))
    }

    #[test]
    fn default_document_shows_base_layer_only() {
        let doc = Document::default();
        assert!(doc.is_empty());
        assert_eq!(doc.layers, vec![BASE_LAYER.to_owned()]);
    }

    #[test]
    fn with_edit_leaves_receiver_untouched() {
        let before = two_nodes_one_link();
        let copy = before.clone();
        let after = before.with_edit(&EditOp::RemoveNode { id: "n1".into() });
        assert_eq!(before, copy);
        assert_ne!(before, after);
    }

    #[test]
    fn remove_node_cascades_to_links_on_either_end() {
        let doc = two_nodes_one_link().with_edit(&EditOp::AddLink(GraphLink::new(
            "l2",
            "n2",
            "n1",
            Polarity::Balancing,
        )));
        let after = doc.with_edit(&EditOp::RemoveNode { id: "n1".into() });
        assert_eq!(after.nodes.len(), 1);
        assert!(after.links.is_empty());
        assert_eq!(after.links_touching("n1").count(), 0);
    }

    #[test]
    fn move_node_keeps_other_fields() {
        let doc = two_nodes_one_link().with_edit(&EditOp::MoveNode {
            id: "n2".into(),
            x: -5.0,
            y: 7.5,
        });
        let n2 = doc.node("n2").expect("n2");
        assert_eq!((n2.x, n2.y), (-5.0, 7.5));
        assert_eq!(n2.label, "Population");
        assert_eq!(n2.layer, BASE_LAYER);
    }

    #[test]
    fn missing_ids_leave_document_equal() {
        let doc = two_nodes_one_link();
        for op in [
            EditOp::MoveNode {
                id: "ghost".into(),
                x: 1.0,
                y: 1.0,
            },
            EditOp::RemoveNode { id: "ghost".into() },
            EditOp::RemoveLink { id: "ghost".into() },
        ] {
            assert_eq!(doc.with_edit(&op), doc, "{}", op.kind());
        }
    }

    #[test]
    fn toggle_layer_twice_restores_set() {
        let doc = Document::default();
        let shown = doc.with_edit(&EditOp::ToggleLayer {
            name: "Feedback".into(),
        });
        assert!(shown.is_layer_visible("Feedback"));
        let hidden = shown.with_edit(&EditOp::ToggleLayer {
            name: "Feedback".into(),
        });
        assert_eq!(hidden.layers, doc.layers);

        let base_off = doc.with_edit(&EditOp::ToggleLayer {
            name: BASE_LAYER.into(),
        });
        assert!(base_off.layers.is_empty());
    }

    #[test]
    fn check_rejects_duplicates_and_dangling_endpoints() {
        let doc = two_nodes_one_link();
        assert_eq!(
            doc.check(&EditOp::AddNode(GraphNode::new("n1", "again", 0.0, 0.0))),
            Err(IntegrityError::DuplicateNode("n1".into()))
        );
        assert_eq!(
            doc.check(&EditOp::AddLink(GraphLink::new(
                "l1",
                "n2",
                "n1",
                Polarity::Balancing
            ))),
            Err(IntegrityError::DuplicateLink("l1".into()))
        );
        assert_eq!(
            doc.check(&EditOp::AddLink(GraphLink::new(
                "l9",
                "n1",
                "nope",
                Polarity::Balancing
            ))),
            Err(IntegrityError::DanglingEndpoint {
                link: "l9".into(),
                node: "nope".into()
            })
        );
        assert!(doc
            .check(&EditOp::RemoveNode { id: "nope".into() })
            .is_ok());
    }

    #[test]
    fn hash_ignores_ordering() {
        let a = two_nodes_one_link().with_edit(&EditOp::ToggleLayer {
            name: "Extra".into(),
        });
        let mut b = a.clone();
        b.nodes.reverse();
        b.layers.reverse();
        assert_eq!(a.compute_hash().unwrap(), b.compute_hash().unwrap());

        let moved = a.with_edit(&EditOp::MoveNode {
            id: "n1".into(),
            x: 11.0,
            y: 20.0,
        });
        assert_ne!(a.compute_hash().unwrap(), moved.compute_hash().unwrap());
    }

    #[test]
    fn hash_ignores_order_of_nodes_sharing_an_id() {
        let a = Document::default()
            .with_edit(&EditOp::AddNode(GraphNode::new("dup", "First", 1.0, 1.0)))
            .with_edit(&EditOp::AddNode(GraphNode::new("dup", "Second", 2.0, 2.0)))
            .with_edit(&EditOp::AddLink(GraphLink::new(
                "l",
                "dup",
                "dup",
                Polarity::Reinforcing,
            )))
            .with_edit(&EditOp::AddLink(GraphLink::new(
                "l",
                "dup",
                "dup",
                Polarity::Balancing,
            )));
        let mut b = a.clone();
        b.nodes.reverse();
        b.links.reverse();
        assert_eq!(a.compute_hash().unwrap(), b.compute_hash().unwrap());
    }

    #[test]
    fn validate_reports_first_broken_reference() {
        assert!(two_nodes_one_link().validate().is_ok());

        let mut dangling = two_nodes_one_link();
        dangling
            .links
            .push(GraphLink::new("l2", "ghost", "n1", Polarity::Balancing));
        assert_eq!(
            dangling.validate(),
            Err(IntegrityError::DanglingEndpoint {
                link: "l2".into(),
                node: "ghost".into()
            })
        );

        let mut dup_node = two_nodes_one_link();
        dup_node.nodes.push(GraphNode::new("n2", "again", 0.0, 0.0));
        assert_eq!(
            dup_node.validate(),
            Err(IntegrityError::DuplicateNode("n2".into()))
        );

        let mut dup_link = two_nodes_one_link();
        dup_link
            .links
            .push(GraphLink::new("l1", "n2", "n1", Polarity::Balancing));
        assert_eq!(
            dup_link.validate(),
            Err(IntegrityError::DuplicateLink("l1".into()))
        );
    }

    #[test]
    fn dedup_layers_keeps_first_occurrence() {
        let mut doc = Document {
            layers: vec![
                BASE_LAYER.to_owned(),
                "Feedback".to_owned(),
                BASE_LAYER.to_owned(),
            ],
            ..Document::default()
        };
        assert_eq!(doc.dedup_layers(), 1);
        assert_eq!(doc.layers, vec![BASE_LAYER.to_owned(), "Feedback".to_owned()]);
        assert_eq!(doc.dedup_layers(), 0);
    }

    #[test]
    fn json_uses_document_field_names() {
        let link = GraphLink::new("l1", "n1", "n2", Polarity::Balancing);
        let value = serde_json::to_value(&link).unwrap();
        assert_eq!(value["type"], "balancing");
        assert_eq!(value["from"], "n1");
        assert_eq!(value["layer"], BASE_LAYER);
    }
}
