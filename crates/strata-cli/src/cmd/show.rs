//! `strata show`: full diagnostic report for a graph.

use std::io::Write;

use clap::Args;
use strata_core::GraphReport;

use crate::cmd::{InputArgs, load_graph, report_graph_error};
use crate::output::{OutputMode, render};

/// Arguments for `strata show`.
#[derive(Args, Debug, Default)]
pub struct ShowArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Execute `strata show`.
pub fn run_show(args: &ShowArgs, output: OutputMode) -> anyhow::Result<()> {
    let graph = load_graph(&args.input, output)?;

    let report = match GraphReport::build(&graph) {
        Ok(report) => report,
        Err(err) => return Err(report_graph_error(&graph, &err, output)),
    };

    render(output, &report, render_report_human)
}

fn render_report_human(report: &GraphReport<String>, w: &mut dyn Write) -> std::io::Result<()> {
    write!(w, "{report}")
}
