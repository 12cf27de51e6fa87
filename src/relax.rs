//! Relaxation Driver: the per-source fixed-point loop.

use std::collections::HashMap;

use rayon::prelude::*;

use crate::collection::{PathCollection, PathTable};
use crate::error::{EngineError, Result};
use crate::graph::{GraphStore, NodeId};
use crate::metric::MetricRegistry;

/// Converges `{ (s, t) : t != s }` to a fixed point.
fn relax_source(
    src: &NodeId,
    row: &mut HashMap<NodeId, PathCollection>,
    graph: &GraphStore,
    registry: &MetricRegistry,
) {
    let destinations: Vec<NodeId> = graph
        .nodes()
        .map(|n| n.name.clone())
        .filter(|t| t != src)
        .collect();

    loop {
        let mut changes = 0usize;

        for t in &destinations {
            for r in &destinations {
                if r == t {
                    continue;
                }
                // snapshot: paths admitted this round aren't relay bases until the next
                let relay_members = match row.get(r) {
                    Some(c) => c.members().to_vec(),
                    None => continue,
                };
                for p in &relay_members {
                    if p.contains(t) {
                        continue;
                    }
                    if !graph.has_edge(p.dst(), t) {
                        continue;
                    }
                    let trial = match p.extend(graph, registry, t) {
                        Ok(trial) => trial,
                        Err(_) => continue,
                    };
                    let cst = row.get_mut(t).expect("destination row always present");
                    if cst.try_add(trial, registry) {
                        changes += 1;
                        changes += cst.clear_dominated(registry);
                    }
                }
            }
            if let Some(cst) = row.get_mut(t) {
                changes += cst.clear_dominated(registry);
            }
        }

        if changes == 0 {
            break;
        }
    }
}

pub fn path_optimize_source(
    table: &mut PathTable,
    graph: &GraphStore,
    registry: &MetricRegistry,
    src: &NodeId,
) {
    if let Some(row) = table.row_mut(src) {
        relax_source(src, row, graph, registry);
    }
}

/// Node index is 0-based, in declaration order.
pub fn path_optimize_source_by_index(
    table: &mut PathTable,
    graph: &GraphStore,
    registry: &MetricRegistry,
    index: usize,
) -> Result<()> {
    let src = graph
        .node_id_by_index(index)
        .ok_or_else(|| EngineError::UnknownNode(format!("index {}", index)))?
        .clone();
    path_optimize_source(table, graph, registry, &src);
    Ok(())
}

pub fn optimize_all_sequential(table: &mut PathTable, graph: &GraphStore, registry: &MetricRegistry) {
    for n in graph.nodes() {
        path_optimize_source(table, graph, registry, &n.name);
    }
}

/// One rayon task per source row; no cross-source locking needed.
pub fn optimize_all_parallel(table: &mut PathTable, graph: &GraphStore, registry: &MetricRegistry) {
    table.rows_map_mut().par_iter_mut().for_each(|(src, row)| {
        relax_source(src, row, graph, registry);
    });
}
