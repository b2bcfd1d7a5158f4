//! Directed dependency graph and its analyses.
//!
//! # Overview
//!
//! A [`Graph`] owns an insertion-ordered set of [`Node`]s and an
//! insertion-ordered list of [`Edge`]s (duplicates allowed). Callers only ever
//! insert; nothing is removed or mutated in place. Every analysis is a
//! read-only traversal recomputed from scratch on each call.
//!
//! ## Pipeline
//!
//! ```text
//! add_node / add_node_if_missing / add_edge / add_edge_from_values
//!        ↓
//! Graph (nodes + edges, insertion order)
//!        ├─ cycles::is_dag / find_cycle      three-color DFS
//!        ├─ topo::topo_sort                  DFS postorder, prepend
//!        ├─ level::level / levels            longest path from any source
//!        └─ diagnostics::GraphReport         human / JSON inspection
//! ```
//!
//! ## Determinism
//!
//! Outputs are reproducible given the same insertion history: outer loops run
//! in node-insertion order and every DFS branch follows edge-insertion order.
//! Nothing is sorted by value.
//!
//! ## Typical Usage
//!
//! ```rust
//! use strata_core::graph::{Graph, Node};
//!
//! let mut g: Graph<&str> = Graph::new();
//! g.add_edge_from_values("a", "x");
//! g.add_edge_from_values("a", "b");
//! g.add_edge_from_values("b", "c");
//!
//! let order = g.topo_sort()?;
//! assert_eq!(order.first(), Some(&Node::new("a")));
//! assert_eq!(g.level(&Node::new("c"))?, 2);
//! # Ok::<(), strata_core::GraphError>(())
//! ```

pub mod cycles;
pub mod diagnostics;
pub mod level;
pub mod node;
pub mod store;
pub mod topo;

// Re-export primary types at module level for convenience.
pub use diagnostics::{GraphReport, NodeReport};
pub use level::{LevelStrategy, UnknownStrategy};
pub use node::{Edge, Label, Node};
pub use store::Graph;
