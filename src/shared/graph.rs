//! Graph model.

use super::edge::Edge;
use super::node::{Node, NodeKind};
use std::collections::HashMap;

/// A directed, heterogeneous graph of `Node`s joined by caller→callee
/// `Edge`s. `Nodes` is keyed by the content-addressed id; inserting
/// a duplicate id is a no-op, since identical ids are defined to mean
/// identical content.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: HashMap<String, Node>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: Vec::new(),
        }
    }

    /// Inserts `node` by id. A later insert of an id that's already
    /// present is ignored — the ID scheme already asserts identity, so a
    /// collision means the same construct was seen twice, not a conflict.
    pub fn add_node(&mut self, node: Node) {
        self.nodes.entry(node.id.clone()).or_insert(node);
    }

    /// Appends `(from_id, to_id)` to `Edges` and to `from`'s
    /// `outgoing_edges` index. Both endpoints must already be present;
    /// this is a precondition of the caller (the translators only ever
    /// draw edges between nodes they just inserted).
    pub fn add_edge(&mut self, from_id: &str, to_id: &str) {
        if !self.nodes.contains_key(from_id) || !self.nodes.contains_key(to_id) {
            return;
        }
        let edge_index = self.edges.len();
        self.edges.push(Edge::new(from_id, to_id));
        if let Some(from_node) = self.nodes.get_mut(from_id) {
            from_node.outgoing_edges.push(edge_index);
        }
    }

    pub fn get(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Used by the transitive-inheritance post-pass to mutate a
    /// node's `kind` in place after the merge; no other pass needs this.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Linear scan, case-sensitive match on `kind`.
    pub fn find_by_kind(&self, kind: NodeKind) -> Vec<&Node> {
        self.nodes.values().filter(|n| n.kind == kind).collect()
    }

    /// Merges `other` into `self`: nodes by id (duplicates dropped, same
    /// rule as `add_node`), edges appended verbatim. Used by the ingest
    /// pipeline's single-lock collector after each worker finishes.
    pub fn merge(&mut self, other: Graph) {
        for (id, node) in other.nodes {
            self.nodes.entry(id).or_insert(node);
        }
        for edge in other.edges {
            // Re-derive the outgoing_edges index rather than trusting the
            // worker-local indices, which point into the worker's own
            // edge vec, not this one.
            if self.nodes.contains_key(&edge.from) && self.nodes.contains_key(&edge.to) {
                let edge_index = self.edges.len();
                self.edges.push(edge.clone());
                if let Some(from_node) = self.nodes.get_mut(&edge.from) {
                    from_node.outgoing_edges.push(edge_index);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::node::LanguageFlag;
    use crate::shared::span::SourceRange;

    fn dummy_node(id: &str, kind: NodeKind) -> Node {
        Node::new(
            id.to_string(),
            kind,
            "n",
            "f.py",
            SourceRange::new("f.py", 0, 1),
            1,
            LanguageFlag::Python,
        )
    }

    #[test]
    fn duplicate_insert_is_ignored() {
        let mut g = Graph::new();
        g.add_node(dummy_node("a", NodeKind::FunctionDeclaration));
        g.add_node(dummy_node("a", NodeKind::ClassDeclaration)); // same id, different kind
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.get("a").unwrap().kind, NodeKind::FunctionDeclaration);
    }

    #[test]
    fn add_edge_requires_both_endpoints() {
        let mut g = Graph::new();
        g.add_node(dummy_node("a", NodeKind::FunctionDeclaration));
        g.add_edge("a", "missing");
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn add_edge_updates_outgoing_index() {
        let mut g = Graph::new();
        g.add_node(dummy_node("a", NodeKind::FunctionDeclaration));
        g.add_node(dummy_node("b", NodeKind::Call));
        g.add_edge("a", "b");
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.get("a").unwrap().outgoing_edges, vec![0]);
    }

    #[test]
    fn find_by_kind_is_case_sensitive_on_the_closed_enum() {
        let mut g = Graph::new();
        g.add_node(dummy_node("a", NodeKind::FunctionDeclaration));
        g.add_node(dummy_node("b", NodeKind::ClassDeclaration));
        assert_eq!(g.find_by_kind(NodeKind::FunctionDeclaration).len(), 1);
    }
}
