//! Longest-path levels.
//!
//! # Overview
//!
//! The level of a node is the greatest number of edges on any directed path
//! that reaches it from a source (a node with in-degree 0). Sources, and
//! nodes that are not in the graph at all, sit at level 0.
//!
//! | Graph                     | Levels |
//! |---------------------------|--------|
//! | `a->x, a->b, b->c, c->d`  | a:0 x:1 b:1 c:2 d:3 |
//! | `x->a, y->a, a->b, b->c`  | x:0 y:0 a:1 b:2 c:3 |
//!
//! # Strategies
//!
//! Both strategies compute the same numbers; they differ only in cost.
//!
//! - [`LevelStrategy::Relaxation`]: for every source, a Bellman-Ford style
//!   sweep over all nodes and all edges, repeated exactly `|V| - 1` times,
//!   keeping the deepest depth seen. The level is the maximum over sources.
//!   O(sources × V × E).
//! - [`LevelStrategy::LongestPath`] (default): one pass in topological order,
//!   seeded with depth 0 at the same sources, then
//!   `depth[v] = max(depth[p] + 1)` over reached parents `p`. O(V + E).
//!
//! A node no source reaches (only possible when raw
//! [`Graph::add_edge`] left an edge from an unregistered node) has level 0
//! under both strategies.
//!
//! Levels are undefined on cyclic graphs; every entry point checks
//! acyclicity first and fails with [`GraphError::CyclicGraph`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::error::{GraphError, Result};
use crate::graph::cycles::first_cycle;
use crate::graph::node::{Label, Node};
use crate::graph::store::{Adjacency, Graph};
use crate::graph::topo::topological_positions;

// ---------------------------------------------------------------------------
// LevelStrategy
// ---------------------------------------------------------------------------

/// Algorithm used to compute levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LevelStrategy {
    /// Per-source fixed-pass relaxation over every edge.
    Relaxation,
    /// Single dynamic-programming pass in topological order.
    #[default]
    LongestPath,
}

impl LevelStrategy {
    /// Stable name used in configuration and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Relaxation => "relaxation",
            Self::LongestPath => "longest-path",
        }
    }
}

impl fmt::Display for LevelStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unrecognised [`LevelStrategy`] name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown level strategy '{0}' (expected 'relaxation' or 'longest-path')")]
pub struct UnknownStrategy(pub String);

impl FromStr for LevelStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "relaxation" => Ok(Self::Relaxation),
            "longest-path" => Ok(Self::LongestPath),
            other => Err(UnknownStrategy(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Graph API
// ---------------------------------------------------------------------------

impl<T: Label> Graph<T> {
    /// Level of `node` using the default strategy.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::CyclicGraph`] if the graph is not a DAG.
    pub fn level(&self, node: &Node<T>) -> Result<usize> {
        self.level_with(node, LevelStrategy::default())
    }

    /// Level of `node` using `strategy`.
    ///
    /// A node that is not in the graph has level 0.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::CyclicGraph`] if the graph is not a DAG.
    #[instrument(level = "debug", skip(self, node), fields(node = %node))]
    pub fn level_with(&self, node: &Node<T>, strategy: LevelStrategy) -> Result<usize> {
        let table = self.level_table(strategy)?;
        Ok(self.position(node).map_or(0, |idx| table[idx]))
    }

    /// Level of every node, in node-insertion order, using the default strategy.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::CyclicGraph`] if the graph is not a DAG.
    pub fn levels(&self) -> Result<Vec<(Node<T>, usize)>> {
        self.levels_with(LevelStrategy::default())
    }

    /// Level of every node, in node-insertion order, using `strategy`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::CyclicGraph`] if the graph is not a DAG.
    #[instrument(level = "debug", skip(self))]
    pub fn levels_with(&self, strategy: LevelStrategy) -> Result<Vec<(Node<T>, usize)>> {
        let table = self.level_table(strategy)?;
        Ok(self.nodes().iter().cloned().zip(table).collect())
    }

    /// Levels indexed by node position.
    fn level_table(&self, strategy: LevelStrategy) -> Result<Vec<usize>> {
        let adjacency = self.adjacency();
        let node_count = self.node_count();
        if first_cycle(&adjacency, node_count).is_some() {
            debug!("level refused: graph is cyclic");
            return Err(GraphError::CyclicGraph);
        }

        // Dangling in-edges count toward in-degree here, so a node whose only
        // parent is unregistered is not a source.
        let sources: Vec<usize> = self
            .sources()
            .iter()
            .filter_map(|source| self.position(source))
            .collect();

        let table = match strategy {
            LevelStrategy::Relaxation => relaxation_levels(&adjacency, node_count, &sources),
            LevelStrategy::LongestPath => longest_path_levels(&adjacency, node_count, &sources),
        };

        debug!(%strategy, nodes = node_count, "levels computed");
        Ok(table)
    }
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Per-source relaxation. `None` marks a node the source cannot reach.
fn relaxation_levels(adjacency: &Adjacency, node_count: usize, sources: &[usize]) -> Vec<usize> {
    let mut best: Vec<Option<usize>> = vec![None; node_count];

    for &source in sources {
        let mut depth: Vec<Option<usize>> = vec![None; node_count];
        depth[source] = Some(0);

        for _ in 1..node_count {
            for node in 0..node_count {
                let Some(current) = depth[node] else {
                    continue;
                };
                for &child in adjacency.children(node) {
                    if depth[child].is_none_or(|d| d < current + 1) {
                        depth[child] = Some(current + 1);
                    }
                }
            }
        }

        for (slot, reached) in best.iter_mut().zip(depth) {
            if let Some(d) = reached {
                *slot = Some(slot.map_or(d, |b| b.max(d)));
            }
        }
    }

    best.into_iter()
        .enumerate()
        .map(|(node, level)| level.unwrap_or_else(|| unreachable_level(adjacency, node)))
        .collect()
}

/// Single pass in topological order over an acyclic `adjacency`, starting
/// from `sources`. `None` marks a node no source reaches.
fn longest_path_levels(adjacency: &Adjacency, node_count: usize, sources: &[usize]) -> Vec<usize> {
    let mut depth: Vec<Option<usize>> = vec![None; node_count];
    for &source in sources {
        depth[source] = Some(0);
    }

    for node in topological_positions(adjacency, node_count) {
        let deepest = adjacency
            .parents(node)
            .iter()
            .filter_map(|&parent| depth[parent])
            .max();
        if let Some(d) = deepest {
            depth[node] = Some(d + 1);
        }
    }

    depth
        .into_iter()
        .enumerate()
        .map(|(node, level)| level.unwrap_or_else(|| unreachable_level(adjacency, node)))
        .collect()
}

/// Every node of a DAG is reachable from some source, so this only fires
/// when dangling edges hide a node's real in-degree.
fn unreachable_level(adjacency: &Adjacency, node: usize) -> usize {
    debug_assert!(
        adjacency.dangling() > 0,
        "node {node} unreachable from every source of a DAG"
    );
    warn!(node, "node unreachable from every source; level defaults to 0");
    0
}
