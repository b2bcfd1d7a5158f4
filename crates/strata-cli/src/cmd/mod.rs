//! Subcommand handlers.
//!
//! Each handler loads the edge list, runs one analysis, and renders the
//! result through [`crate::output`]. Failures are rendered to stderr in the
//! active output mode before being returned, so `main` only sets the exit
//! status.

pub mod check;
pub mod levels;
pub mod show;
pub mod topo;

use std::path::{Path, PathBuf};

use clap::Args;
use strata_core::{Graph, GraphError};
use tracing::debug;

use crate::input;
use crate::output::{CliError, OutputMode, render_error};

/// Edge-list source shared by every subcommand.
#[derive(Args, Debug, Default, Clone)]
pub struct InputArgs {
    /// Edge-list file. Reads stdin when omitted or `-`.
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,
}

impl InputArgs {
    fn path(&self) -> Option<&Path> {
        self.file.as_deref()
    }
}

/// Read and parse the edge list, rendering any failure.
pub fn load_graph(args: &InputArgs, output: OutputMode) -> anyhow::Result<Graph<String>> {
    let source = match input::read_source(args.path()) {
        Ok(source) => source,
        Err(err) => {
            render_error(output, &CliError::new(format!("{err:#}")))?;
            return Err(err);
        }
    };

    match input::parse_edge_list(&source) {
        Ok(graph) => {
            debug!(
                nodes = graph.node_count(),
                edges = graph.edge_count(),
                "graph loaded"
            );
            Ok(graph)
        }
        Err(err) => {
            render_error(
                output,
                &CliError::with_details(
                    format!("invalid edge list: {err}"),
                    "use one `a -> b`, `a b`, or `a` entry per line",
                    "invalid_input",
                ),
            )?;
            Err(err)
        }
    }
}

/// Render a graph analysis failure and convert it for `main`.
///
/// For a cyclic graph the message names the offending cycle.
pub fn report_graph_error(
    graph: &Graph<String>,
    err: &GraphError,
    output: OutputMode,
) -> anyhow::Error {
    let mut cli_error = CliError::from(err);
    if matches!(err, GraphError::CyclicGraph)
        && let Some(cycle) = graph.find_cycle()
    {
        cli_error.message = format!("{} (cycle: {})", cli_error.message, cycle_path(&cycle));
    }

    if let Err(render_err) = render_error(output, &cli_error) {
        return render_err;
    }
    anyhow::anyhow!("{}", cli_error.message)
}

/// Join a closed cycle as `a -> b -> a`.
pub fn cycle_path<T: std::fmt::Display>(cycle: &[T]) -> String {
    cycle
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}
