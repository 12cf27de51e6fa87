//! Path Object: an ordered node sequence plus its accumulated metric
//! vector.

use crate::error::{EngineError, Result};
use crate::graph::{GraphStore, NodeId};
use crate::metric::{MetricRegistry, MetricVector};

#[derive(Clone, Debug)]
pub struct Path {
    pub nodes: Vec<NodeId>,
    pub metrics: MetricVector,
}

impl Path {
    pub fn src(&self) -> &NodeId {
        &self.nodes[0]
    }

    pub fn dst(&self) -> &NodeId {
        self.nodes.last().expect("path always has >= 2 nodes")
    }

    pub fn contains(&self, node: &NodeId) -> bool {
        self.nodes.iter().any(|n| n == node)
    }

    /// Requires a declared edge. Sequence is `[src, dst]`.
    pub fn create_direct(graph: &GraphStore, src: &NodeId, dst: &NodeId) -> Result<Path> {
        let edge = graph
            .get_edge(src, dst)
            .ok_or_else(|| EngineError::MissingEdge {
                src: src.to_string(),
                dst: dst.to_string(),
            })?;
        Ok(Path {
            nodes: vec![src.clone(), dst.clone()],
            metrics: edge.metrics.clone(),
        })
    }

    /// Does not mutate `self`.
    pub fn extend(
        &self,
        graph: &GraphStore,
        registry: &MetricRegistry,
        new_dst: &NodeId,
    ) -> Result<Path> {
        if self.contains(new_dst) {
            return Err(EngineError::Parse {
                line: 0,
                message: format!("{} already present in path, would form a cycle", new_dst),
            });
        }
        let edge = graph
            .get_edge(self.dst(), new_dst)
            .ok_or_else(|| EngineError::MissingEdge {
                src: self.dst().to_string(),
                dst: new_dst.to_string(),
            })?;
        let mut nodes = self.nodes.clone();
        nodes.push(new_dst.clone());
        Ok(Path {
            nodes,
            metrics: self.metrics.combine(&edge.metrics, registry),
        })
    }
}
