//! `strata check`: report whether a graph is acyclic.
//!
//! Exits non-zero when a cycle is found so the command can gate CI jobs.

use std::io::Write;

use clap::Args;
use serde::Serialize;
use strata_core::{Graph, Node};
use tracing::info;

use crate::cmd::{InputArgs, cycle_path, load_graph};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `strata check`.
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Debug, Serialize)]
struct CheckOutput {
    is_dag: bool,
    nodes: usize,
    edges: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    cycle: Option<Vec<String>>,
}

/// Execute `strata check`.
pub fn run_check(args: &CheckArgs, output: OutputMode) -> anyhow::Result<()> {
    let graph = load_graph(&args.input, output)?;
    let payload = check_graph(&graph);

    render_mode(output, &payload, render_check_text, render_check_pretty)?;

    if let Some(ref cycle) = payload.cycle {
        info!(len = cycle.len().saturating_sub(1), "cycle detected");
        anyhow::bail!("graph contains a cycle: {}", cycle_path(cycle));
    }
    Ok(())
}

fn check_graph(graph: &Graph<String>) -> CheckOutput {
    let cycle: Option<Vec<String>> = graph
        .find_cycle()
        .map(|path| path.into_iter().map(Node::into_inner).collect());

    CheckOutput {
        is_dag: cycle.is_none(),
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        cycle,
    }
}

fn render_check_text(payload: &CheckOutput, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "is_dag {}", payload.is_dag)?;
    if let Some(ref cycle) = payload.cycle {
        writeln!(w, "cycle {}", cycle_path(cycle))?;
    }
    Ok(())
}

fn render_check_pretty(payload: &CheckOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Acyclicity check")?;
    pretty_kv(w, "nodes", payload.nodes.to_string())?;
    pretty_kv(w, "edges", payload.edges.to_string())?;
    match payload.cycle {
        None => pretty_kv(w, "result", "acyclic"),
        Some(ref cycle) => {
            pretty_kv(w, "result", "cyclic")?;
            pretty_kv(w, "cycle", cycle_path(cycle))
        }
    }
}
