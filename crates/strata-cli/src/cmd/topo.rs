//! `strata topo`: print a topological order of the graph.

use std::io::Write;

use clap::Args;
use serde::Serialize;
use strata_core::{Graph, GraphError, Node};

use crate::cmd::{InputArgs, load_graph, report_graph_error};
use crate::output::{OutputMode, pretty_section, render_mode};

/// Arguments for `strata topo`.
#[derive(Args, Debug, Default)]
pub struct TopoArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Debug, Serialize)]
struct TopoOutput {
    order: Vec<String>,
}

/// Execute `strata topo`.
pub fn run_topo(args: &TopoArgs, output: OutputMode) -> anyhow::Result<()> {
    let graph = load_graph(&args.input, output)?;

    let payload = match topo_order(&graph) {
        Ok(payload) => payload,
        Err(err) => return Err(report_graph_error(&graph, &err, output)),
    };

    render_mode(output, &payload, render_topo_text, render_topo_pretty)
}

fn topo_order(graph: &Graph<String>) -> Result<TopoOutput, GraphError> {
    let order = graph
        .topo_sort()?
        .into_iter()
        .map(Node::into_inner)
        .collect();
    Ok(TopoOutput { order })
}

fn render_topo_text(payload: &TopoOutput, w: &mut dyn Write) -> std::io::Result<()> {
    for node in &payload.order {
        writeln!(w, "{node}")?;
    }
    Ok(())
}

fn render_topo_pretty(payload: &TopoOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("Topological order ({})", payload.order.len()))?;
    let width = payload.order.len().to_string().len();
    for (idx, node) in payload.order.iter().enumerate() {
        writeln!(w, "{:>width$}. {node}", idx + 1)?;
    }
    Ok(())
}
