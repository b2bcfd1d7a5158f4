//! Edge-list input.
//!
//! One entry per line:
//!
//! ```text
//! # comment
//! build -> test     # edge
//! test deploy       # edge, whitespace separated
//! docs              # isolated node
//! ```
//!
//! Edges register their endpoints with `add_edge_from_values`; lone tokens go
//! through `add_node_if_missing`. Anything else is rejected with its 1-based
//! line number.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, bail};
use strata_core::{Graph, Node};
use tracing::debug;

/// Path value that selects stdin.
pub const STDIN_PATH: &str = "-";

/// Read the raw edge list from `path`, or stdin when it is absent or `-`.
pub fn read_source(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) if path.as_os_str() != STDIN_PATH => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read edge list from stdin")?;
            Ok(buf)
        }
    }
}

/// Build a graph from edge-list text.
pub fn parse_edge_list(source: &str) -> anyhow::Result<Graph<String>> {
    let mut graph = Graph::new();

    for (idx, raw) in source.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.split_once('#').map_or(raw, |(before, _)| before).trim();
        if line.is_empty() {
            continue;
        }

        match parse_entry(line) {
            Some(Entry::Edge(src, dst)) => {
                graph.add_edge_from_values(src.to_string(), dst.to_string());
            }
            Some(Entry::Node(name)) => {
                graph.add_node_if_missing(Node::new(name.to_string()));
            }
            None => bail!("line {line_no}: expected `a -> b`, `a b`, or `a`, found `{line}`"),
        }
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "edge list parsed"
    );
    Ok(graph)
}

#[derive(Debug, PartialEq, Eq)]
enum Entry<'a> {
    Edge(&'a str, &'a str),
    Node(&'a str),
}

fn parse_entry(line: &str) -> Option<Entry<'_>> {
    if let Some((src, dst)) = line.split_once("->") {
        return Some(Entry::Edge(single_token(src)?, single_token(dst)?));
    }

    let mut tokens = line.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(name), None, None) => Some(Entry::Node(name)),
        (Some(src), Some(dst), None) => Some(Entry::Edge(src, dst)),
        _ => None,
    }
}

fn single_token(part: &str) -> Option<&str> {
    let mut tokens = part.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(token), None) => Some(token),
        _ => None,
    }
}
