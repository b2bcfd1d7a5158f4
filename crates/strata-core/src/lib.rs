#![forbid(unsafe_code)]
//! strata-core library.
//!
//! A directed dependency graph built incrementally from labelled nodes, with
//! the three analyses a dependency scheduler needs:
//!
//! - [`Graph::is_dag`]: yes/no acyclicity check
//! - [`Graph::topo_sort`]: one reproducible linearization in dependency order
//! - [`Graph::level`]: longest-path depth of a node from any source
//!
//! # Conventions
//!
//! - **Errors**: Library failures are [`GraphError`]; configuration loading uses
//!   `anyhow::Result`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).
//!
//! # Example
//!
//! ```rust
//! use strata_core::{Graph, Node};
//!
//! let mut graph: Graph<&str> = Graph::new();
//! graph.add_edge_from_values("x", "a");
//! graph.add_edge_from_values("y", "a");
//! graph.add_edge_from_values("a", "b");
//!
//! assert!(graph.is_dag());
//! let order = graph.topo_sort()?;
//! assert_eq!(order, vec![Node::new("y"), Node::new("x"), Node::new("a"), Node::new("b")]);
//! assert_eq!(graph.level(&Node::new("b"))?, 2);
//! # Ok::<(), strata_core::GraphError>(())
//! ```

pub mod config;
pub mod error;
pub mod graph;

pub use error::{GraphError, Result};
pub use graph::{
    Edge, Graph, GraphReport, Label, LevelStrategy, Node, NodeReport, UnknownStrategy,
};
