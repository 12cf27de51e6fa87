//! Path Collection and Path Table.

use std::collections::HashMap;

use crate::domination::{dominates, duplicate};
use crate::error::Result;
use crate::graph::{GraphStore, NodeId};
use crate::metric::MetricRegistry;
use crate::path::Path;

/// The non-dominated set for one ordered `(src, dst)` pair.
#[derive(Default)]
pub struct PathCollection {
    pub src: Option<NodeId>,
    pub dst: Option<NodeId>,
    members: Vec<Path>,
}

impl PathCollection {
    pub fn new(src: NodeId, dst: NodeId) -> Self {
        Self {
            src: Some(src),
            dst: Some(dst),
            members: Vec::new(),
        }
    }

    pub fn members(&self) -> &[Path] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Doesn't evict on insertion; follow with `clear_dominated`.
    pub fn try_add(&mut self, candidate: Path, registry: &MetricRegistry) -> bool {
        for existing in &self.members {
            if dominates(existing, &candidate, registry) {
                return false;
            }
            if duplicate(existing, &candidate) {
                return false;
            }
        }
        self.members.push(candidate);
        true
    }

    /// Repeats until a full pass removes nothing.
    pub fn clear_dominated(&mut self, registry: &MetricRegistry) -> usize {
        let mut removed = 0;
        loop {
            let victim = (0..self.members.len()).find(|&i| {
                (0..self.members.len())
                    .any(|j| j != i && dominates(&self.members[j], &self.members[i], registry))
            });
            match victim {
                Some(i) => {
                    self.members.remove(i);
                    removed += 1;
                }
                None => break,
            }
        }
        removed
    }
}

/// Partitioned by source so each row can be relaxed independently.
#[derive(Default)]
pub struct PathTable {
    rows: HashMap<NodeId, HashMap<NodeId, PathCollection>>,
}

impl PathTable {
    /// Seeds with the direct edge only when one exists.
    pub fn init(graph: &GraphStore, registry: &MetricRegistry) -> Result<PathTable> {
        let mut rows = HashMap::new();
        for s in graph.nodes() {
            let mut row = HashMap::new();
            for t in graph.nodes() {
                if s.name == t.name {
                    continue;
                }
                let mut collection = PathCollection::new(s.name.clone(), t.name.clone());
                if graph.has_edge(&s.name, &t.name) {
                    let direct = Path::create_direct(graph, &s.name, &t.name)?;
                    collection.try_add(direct, registry);
                }
                row.insert(t.name.clone(), collection);
            }
            rows.insert(s.name.clone(), row);
        }
        Ok(PathTable { rows })
    }

    pub fn row(&self, src: &NodeId) -> Option<&HashMap<NodeId, PathCollection>> {
        self.rows.get(src)
    }

    pub fn row_mut(&mut self, src: &NodeId) -> Option<&mut HashMap<NodeId, PathCollection>> {
        self.rows.get_mut(src)
    }

    pub fn rows_map_mut(&mut self) -> &mut HashMap<NodeId, HashMap<NodeId, PathCollection>> {
        &mut self.rows
    }

    pub fn get(&self, src: &NodeId, dst: &NodeId) -> Option<&PathCollection> {
        self.rows.get(src).and_then(|row| row.get(dst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::{Combo, MetricVector, Opt};
    use std::sync::Arc;

    fn path(seq: &[&str], values: &[f64]) -> Path {
        let nodes = seq.iter().map(|s| Arc::from(*s)).collect();
        Path {
            nodes,
            metrics: MetricVector::from_values(values.to_vec()),
        }
    }

    #[test]
    fn try_add_rejects_dominated_candidate() {
        let mut r = MetricRegistry::new();
        r.declare("cost", Opt::Min, Combo::Add, 0.0);
        let mut c = PathCollection::new(Arc::from("A"), Arc::from("C"));
        assert!(c.try_add(path(&["A", "B", "C"], &[2.0]), &r));
        assert!(!c.try_add(path(&["A", "C"], &[5.0]), &r));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn try_add_rejects_duplicate_node_sequence() {
        let mut r = MetricRegistry::new();
        r.declare("cost", Opt::Min, Combo::Add, 0.0);
        let mut c = PathCollection::new(Arc::from("A"), Arc::from("C"));
        assert!(c.try_add(path(&["A", "B", "C"], &[2.0]), &r));
        assert!(!c.try_add(path(&["A", "B", "C"], &[2.0]), &r));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn try_add_keeps_incomparable_members() {
        let mut r = MetricRegistry::new();
        r.declare("cost", Opt::Min, Combo::Add, 0.0);
        r.declare("bw", Opt::Max, Combo::Min, 0.0);
        let mut c = PathCollection::new(Arc::from("A"), Arc::from("C"));
        assert!(c.try_add(path(&["A", "B", "C"], &[2.0, 10.0]), &r));
        assert!(c.try_add(path(&["A", "C"], &[5.0, 100.0]), &r));
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn clear_dominated_evicts_after_better_admission() {
        let mut r = MetricRegistry::new();
        r.declare("cost", Opt::Min, Combo::Add, 0.0);
        let mut c = PathCollection::new(Arc::from("A"), Arc::from("C"));
        assert!(c.try_add(path(&["A", "C"], &[10.0]), &r));
        assert!(c.try_add(path(&["A", "B", "C"], &[3.0]), &r));
        assert_eq!(c.clear_dominated(&r), 1);
        assert_eq!(c.len(), 1);
        assert_eq!(c.members()[0].nodes.len(), 3);
    }
}
