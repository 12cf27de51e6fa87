//! Graph Store: nodes and directed edges keyed by (src, dst).

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::{EngineError, Result};
use crate::metric::MetricVector;

/// `Arc<str>` so paths and edges share allocations, and stays `Send + Sync`.
pub type NodeId = Arc<str>;

#[derive(Clone, Debug)]
pub struct Node {
    pub name: NodeId,
    pub description: String,
}

#[derive(Clone, Debug)]
pub struct Edge {
    pub src: NodeId,
    pub dst: NodeId,
    pub metrics: MetricVector,
}

#[derive(Default)]
pub struct GraphStore {
    nodes: IndexMap<NodeId, Node>,
    edges: HashMap<(NodeId, NodeId), Edge>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self {
            nodes: IndexMap::new(),
            edges: HashMap::new(),
        }
    }

    /// Fatal if the name is already declared.
    pub fn add_node(&mut self, name: impl Into<String>, description: impl Into<String>) -> Result<()> {
        let name: NodeId = Arc::from(name.into().as_str());
        if self.nodes.contains_key(&name) {
            return Err(EngineError::Parse {
                line: 0,
                message: format!("duplicate node \"{}\"", name),
            });
        }
        self.nodes.insert(
            name.clone(),
            Node {
                name,
                description: description.into(),
            },
        );
        Ok(())
    }

    pub fn add_edge(&mut self, src: &str, dst: &str, metrics: MetricVector) -> Result<()> {
        let src_id = self.intern(src)?;
        let dst_id = self.intern(dst)?;
        let key = (src_id.clone(), dst_id.clone());
        if self.edges.contains_key(&key) {
            return Err(EngineError::Parse {
                line: 0,
                message: format!("duplicate edge {} -> {}", src, dst),
            });
        }
        self.edges.insert(
            key,
            Edge {
                src: src_id,
                dst: dst_id,
                metrics,
            },
        );
        Ok(())
    }

    fn intern(&self, name: &str) -> Result<NodeId> {
        self.nodes
            .get_key_value(name)
            .map(|(k, _)| k.clone())
            .ok_or_else(|| EngineError::UnknownNode(name.to_string()))
    }

    pub fn get_edge(&self, src: &NodeId, dst: &NodeId) -> Option<&Edge> {
        self.edges.get(&(src.clone(), dst.clone()))
    }

    pub fn has_edge(&self, src: &NodeId, dst: &NodeId) -> bool {
        self.edges.contains_key(&(src.clone(), dst.clone()))
    }

    /// Declaration order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_id_by_index(&self, idx: usize) -> Option<&NodeId> {
        self.nodes.get_index(idx).map(|(k, _)| k)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::MetricVector;

    fn mv(v: &[f64]) -> MetricVector {
        MetricVector::from_values(v.to_vec())
    }

    #[test]
    fn nodes_preserve_declaration_order() {
        let mut g = GraphStore::new();
        g.add_node("C", "").unwrap();
        g.add_node("A", "").unwrap();
        g.add_node("B", "").unwrap();
        let names: Vec<&str> = g.nodes().map(|n| n.name.as_ref()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[test]
    fn duplicate_node_is_fatal() {
        let mut g = GraphStore::new();
        g.add_node("A", "").unwrap();
        assert!(g.add_node("A", "").is_err());
    }

    #[test]
    fn edge_to_unknown_node_is_fatal() {
        let mut g = GraphStore::new();
        g.add_node("A", "").unwrap();
        assert!(g.add_edge("A", "B", mv(&[1.0])).is_err());
    }

    #[test]
    fn duplicate_edge_is_fatal() {
        let mut g = GraphStore::new();
        g.add_node("A", "").unwrap();
        g.add_node("B", "").unwrap();
        g.add_edge("A", "B", mv(&[1.0])).unwrap();
        assert!(g.add_edge("A", "B", mv(&[2.0])).is_err());
    }
}
