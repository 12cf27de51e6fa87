//! Parses the `[metrics]` / `[nodes]` / `[edges]` input format into a
//! `MetricRegistry` and `GraphStore`.

use std::io::BufRead;

use crate::error::{EngineError, Result};
use crate::graph::GraphStore;
use crate::metric::{Combo, MetricRegistry, MetricVector, Opt};

#[derive(PartialEq, Eq, Clone, Copy)]
enum Section {
    Metrics,
    Nodes,
    Edges,
}

fn parse_err(line_no: usize, message: impl Into<String>) -> EngineError {
    EngineError::Parse {
        line: line_no,
        message: message.into(),
    }
}

/// Parses a reader's contents into a registry and graph. Blank lines and
/// lines starting with `#` are ignored; fields are `|`-delimited.
pub fn parse(reader: impl BufRead) -> Result<(MetricRegistry, GraphStore)> {
    let mut registry = MetricRegistry::new();
    let mut graph = GraphStore::new();
    let mut section: Option<Section> = None;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let raw = line.map_err(EngineError::Io)?;
        let line = raw.trim_end_matches(['\r', '\n']);

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            section = Some(match line {
                "[metrics]" => Section::Metrics,
                "[nodes]" => Section::Nodes,
                "[edges]" => Section::Edges,
                other => return Err(parse_err(line_no, format!("invalid section \"{}\"", other))),
            });
            continue;
        }

        match section {
            None => return Err(parse_err(line_no, "line outside of any section")),
            Some(Section::Metrics) => parse_metric_line(&mut registry, line, line_no)?,
            Some(Section::Nodes) => parse_node_line(&mut graph, line, line_no)?,
            Some(Section::Edges) => parse_edge_line(&mut graph, &registry, line, line_no)?,
        }
    }

    Ok((registry, graph))
}

fn parse_metric_line(registry: &mut MetricRegistry, line: &str, line_no: usize) -> Result<()> {
    let mut fields = line.splitn(3, '|');
    let name = fields
        .next()
        .ok_or_else(|| parse_err(line_no, "missing metric name"))?;
    let opt_field = fields
        .next()
        .ok_or_else(|| parse_err(line_no, "missing OPT field"))?;
    let combo_field = fields
        .next()
        .ok_or_else(|| parse_err(line_no, "missing COMBO field"))?;

    let opt = match opt_field {
        "MIN" => Opt::Min,
        "MAX" => Opt::Max,
        other => {
            return Err(parse_err(
                line_no,
                format!("invalid optimization strategy \"{}\"", other),
            ))
        }
    };

    let (combo, arg) = if combo_field == "MIN" {
        (Combo::Min, 0.0)
    } else if combo_field == "MAX" {
        (Combo::Max, 0.0)
    } else if combo_field == "ADD" {
        (Combo::Add, 0.0)
    } else if let Some(bias) = combo_field.strip_prefix("ADD+") {
        let arg = bias
            .parse::<f64>()
            .map_err(|_| parse_err(line_no, format!("invalid ADD bias \"{}\"", bias)))?;
        (Combo::Add, arg)
    } else {
        return Err(parse_err(
            line_no,
            format!("invalid combination method \"{}\"", combo_field),
        ));
    };

    registry.declare(name, opt, combo, arg);
    Ok(())
}

fn parse_node_line(graph: &mut GraphStore, line: &str, line_no: usize) -> Result<()> {
    let mut fields = line.splitn(2, '|');
    let name = fields
        .next()
        .ok_or_else(|| parse_err(line_no, "missing node name"))?;
    let description = fields.next().unwrap_or("");
    graph.add_node(name, description).map_err(|e| match e {
        EngineError::Parse { message, .. } => parse_err(line_no, message),
        other => other,
    })
}

fn parse_edge_line(
    graph: &mut GraphStore,
    registry: &MetricRegistry,
    line: &str,
    line_no: usize,
) -> Result<()> {
    let mut fields = line.splitn(3, '|');
    let src = fields
        .next()
        .ok_or_else(|| parse_err(line_no, "missing edge source"))?;
    let dst = fields
        .next()
        .ok_or_else(|| parse_err(line_no, "missing edge destination"))?;
    let metrics_field = fields.next().unwrap_or("");

    let mut values = vec![MetricVector::MISSING; registry.len()];
    for pair in metrics_field.split(',').filter(|s| !s.is_empty()) {
        let mut kv = pair.splitn(2, '=');
        let name = kv
            .next()
            .ok_or_else(|| parse_err(line_no, format!("malformed metric field \"{}\"", pair)))?;
        let value_str = kv
            .next()
            .ok_or_else(|| parse_err(line_no, format!("malformed metric field \"{}\"", pair)))?;
        let idx = registry
            .index_of(name)
            .ok_or_else(|| parse_err(line_no, format!("edge references unknown metric \"{}\"", name)))?;
        let value = value_str
            .parse::<f64>()
            .map_err(|_| parse_err(line_no, format!("invalid metric value \"{}\"", value_str)))?;
        values[idx] = value;
    }

    if let Some(missing) = registry
        .iter()
        .enumerate()
        .find(|(i, _)| values[*i] == MetricVector::MISSING)
        .map(|(_, decl)| decl.name.clone())
    {
        return Err(parse_err(
            line_no,
            format!("edge {} -> {} omits declared metric \"{}\"", src, dst, missing),
        ));
    }

    graph
        .add_edge(src, dst, MetricVector::from_values(values))
        .map_err(|e| match e {
            EngineError::Parse { message, .. } => parse_err(line_no, message),
            other => other,
        })
}
