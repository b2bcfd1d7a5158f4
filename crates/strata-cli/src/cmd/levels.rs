//! `strata levels`: longest-path level of every node, or of one node.
//!
//! The strategy comes from `--strategy`, then `STRATA_LEVEL_STRATEGY`, then
//! `[analysis] level_strategy` in `strata.toml`.

use std::io::Write;

use clap::Args;
use serde::Serialize;
use strata_core::config::{LEVEL_STRATEGY_ENV, StrataConfig, resolve_level_strategy};
use strata_core::{Graph, GraphError, LevelStrategy, Node};
use tracing::{debug, warn};

use crate::cmd::{InputArgs, load_graph, report_graph_error};
use crate::output::{CliError, OutputMode, pretty_section, render_error, render_mode};

/// Arguments for `strata levels`.
#[derive(Args, Debug, Default)]
pub struct LevelsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Only report the level of this node.
    #[arg(long, value_name = "NAME")]
    pub node: Option<String>,

    /// Level algorithm: `relaxation` or `longest-path`.
    #[arg(long)]
    pub strategy: Option<LevelStrategy>,
}

#[derive(Debug, Serialize)]
struct LevelEntry {
    node: String,
    level: usize,
}

#[derive(Debug, Serialize)]
struct LevelsOutput {
    strategy: LevelStrategy,
    levels: Vec<LevelEntry>,
}

/// Execute `strata levels`.
pub fn run_levels(
    args: &LevelsArgs,
    output: OutputMode,
    config: &StrataConfig,
) -> anyhow::Result<()> {
    let env_strategy = std::env::var(LEVEL_STRATEGY_ENV).ok();
    let strategy = match resolve_level_strategy(args.strategy, env_strategy.as_deref(), config) {
        Ok(strategy) => strategy,
        Err(err) => {
            render_error(
                output,
                &CliError::with_details(
                    format!("{err:#}"),
                    "use `relaxation` or `longest-path`",
                    "invalid_strategy",
                ),
            )?;
            return Err(err);
        }
    };
    debug!(%strategy, "level strategy resolved");

    let graph = load_graph(&args.input, output)?;

    let payload = match compute_levels(&graph, args.node.as_deref(), strategy) {
        Ok(payload) => payload,
        Err(err) => return Err(report_graph_error(&graph, &err, output)),
    };

    render_mode(output, &payload, render_levels_text, render_levels_pretty)
}

fn compute_levels(
    graph: &Graph<String>,
    node: Option<&str>,
    strategy: LevelStrategy,
) -> Result<LevelsOutput, GraphError> {
    let levels = match node {
        Some(name) => {
            let target = Node::new(name.to_string());
            if !graph.contains(&target) {
                warn!(node = name, "node is not in the graph; level defaults to 0");
            }
            let level = graph.level_with(&target, strategy)?;
            vec![LevelEntry {
                node: target.into_inner(),
                level,
            }]
        }
        None => graph
            .levels_with(strategy)?
            .into_iter()
            .map(|(node, level)| LevelEntry {
                node: node.into_inner(),
                level,
            })
            .collect(),
    };

    Ok(LevelsOutput { strategy, levels })
}

fn render_levels_text(payload: &LevelsOutput, w: &mut dyn Write) -> std::io::Result<()> {
    for entry in &payload.levels {
        writeln!(w, "{} {}", entry.node, entry.level)?;
    }
    Ok(())
}

fn render_levels_pretty(payload: &LevelsOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("Levels ({})", payload.strategy))?;
    let width = payload
        .levels
        .iter()
        .map(|entry| entry.node.len())
        .max()
        .unwrap_or(0);
    for entry in &payload.levels {
        writeln!(w, "{:<width$}  {}", entry.node, entry.level)?;
    }
    Ok(())
}
