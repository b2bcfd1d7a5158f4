#![forbid(unsafe_code)]

mod cmd;
mod input;
mod output;

use clap::{Parser, Subcommand};
use output::{CliError, OutputMode};
use std::env;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "strata: dependency graph analysis",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Emit JSON output (alias for `--format json`).
    #[arg(long, global = true, hide = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Show the full diagnostic report",
        long_about = "Print nodes, edges, sources, sinks, the topological order, and every node's neighbourhood.",
        after_help = "EXAMPLES:\n    # Report on a file\n    strata show deps.txt\n\n    # Read the edge list from stdin\n    printf 'a -> b\\n' | strata show\n\n    # Emit machine-readable output\n    strata show deps.txt --json"
    )]
    Show(cmd::show::ShowArgs),

    #[command(
        about = "Check that the graph is acyclic",
        long_about = "Report whether the graph is a DAG. Prints the first cycle found and exits non-zero if it is not.",
        after_help = "EXAMPLES:\n    # Gate a CI job on an acyclic dependency file\n    strata check deps.txt\n\n    # Emit machine-readable output\n    strata check deps.txt --format json"
    )]
    Check(cmd::check::CheckArgs),

    #[command(
        about = "Print a topological order",
        long_about = "Print every node so that each edge points from an earlier node to a later one.",
        after_help = "EXAMPLES:\n    # One node per line\n    strata topo deps.txt --format text"
    )]
    Topo(cmd::topo::TopoArgs),

    #[command(
        about = "Print longest-path levels",
        long_about = "Print the length of the longest path from any source to each node.",
        after_help = "EXAMPLES:\n    # Level of every node\n    strata levels deps.txt\n\n    # Level of one node with the relaxation strategy\n    strata levels deps.txt --node deploy --strategy relaxation"
    )]
    Levels(cmd::levels::LevelsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("STRATA_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "strata=debug,info"
        } else {
            "strata=info,warn"
        })
    });

    let format = env::var("STRATA_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let project_root = env::current_dir()?;
    let config = match strata_core::config::load_config(&project_root) {
        Ok(config) => config,
        Err(err) => {
            // The broken config cannot pick the output mode.
            let output = output::resolve_output_mode(cli.format, cli.json, None);
            output::render_error(
                output,
                &CliError::with_details(
                    format!("{err:#}"),
                    "fix or remove strata.toml",
                    "invalid_config",
                ),
            )?;
            return Err(err);
        }
    };
    let output =
        output::resolve_output_mode(cli.format, cli.json, config.output.format.as_deref());
    debug!(?output, "output mode resolved");

    match cli.command {
        Commands::Show(ref args) => cmd::show::run_show(args, output),
        Commands::Check(ref args) => cmd::check::run_check(args, output),
        Commands::Topo(ref args) => cmd::topo::run_topo(args, output),
        Commands::Levels(ref args) => cmd::levels::run_levels(args, output, &config),
    }
}
