//! Writes the non-dominated path sets to a text stream.

use std::io::{self, Write};

use itertools::Itertools;

use crate::collection::PathTable;
use crate::error::Result;
use crate::graph::GraphStore;
use crate::metric::MetricRegistry;
use crate::path::Path;

fn format_metrics(path: &Path, registry: &MetricRegistry) -> String {
    registry
        .iter()
        .enumerate()
        .map(|(i, decl)| format!("{}={:.2}", decl.name, path.metrics.get(i)))
        .join(",")
}

fn format_nodes(path: &Path) -> String {
    path.nodes.iter().map(|n| n.as_ref()).join(",")
}

/// Writes every ordered pair `(s, t)` with `s != t`, in node declaration
/// order, followed by one line per non-dominated path and a trailing
/// blank line. Pairs with an empty collection emit only the header and
/// the blank line.
pub fn write_optimized_paths(
    out: &mut impl Write,
    graph: &GraphStore,
    registry: &MetricRegistry,
    table: &PathTable,
) -> Result<()> {
    for s in graph.nodes() {
        for t in graph.nodes() {
            if s.name == t.name {
                continue;
            }
            writeln!(out, "{}|{}", s.name, t.name).map_err(io_err)?;
            if let Some(collection) = table.get(&s.name, &t.name) {
                for path in collection.members() {
                    writeln!(
                        out,
                        "{}|{}",
                        format_metrics(path, registry),
                        format_nodes(path)
                    )
                    .map_err(io_err)?;
                }
            }
            writeln!(out).map_err(io_err)?;
        }
    }
    Ok(())
}

fn io_err(e: io::Error) -> crate::error::EngineError {
    crate::error::EngineError::Io(e)
}
