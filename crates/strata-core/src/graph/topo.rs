//! Topological ordering by DFS postorder.
//!
//! # Algorithm
//!
//! Roots are taken in node-insertion order. Each unvisited root starts a DFS
//! that marks nodes visited on entry and walks children in edge-insertion
//! order; a node is emitted once all of its children are finished. Prepending
//! each emitted node (equivalently, reversing the postorder) gives an order in
//! which every edge points forward.
//!
//! Many DAGs admit several valid orders. The one returned here is fixed by
//! the insertion history alone:
//!
//! ```text
//! edges: x->a, y->a, a->b, b->c     nodes: x, a, y, b, c
//! DFS(x): x -> a -> b -> c           postorder: c b a x
//! DFS(y): a already visited          postorder: c b a x y
//! result (reversed):                 y x a b c
//! ```
//!
//! The acyclicity check runs on every call; the graph may have grown since
//! the last one.

use tracing::{debug, instrument};

use crate::error::{GraphError, Result};
use crate::graph::cycles::first_cycle;
use crate::graph::node::{Label, Node};
use crate::graph::store::{Adjacency, Graph};

impl<T: Label> Graph<T> {
    /// Compute the DFS-postorder topological order of all nodes.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::CyclicGraph`] if the graph is not a DAG.
    #[instrument(level = "debug", skip(self), fields(nodes = self.node_count(), edges = self.edge_count()))]
    pub fn topo_sort(&self) -> Result<Vec<Node<T>>> {
        let adjacency = self.adjacency();
        if first_cycle(&adjacency, self.node_count()).is_some() {
            debug!("topological sort refused: graph is cyclic");
            return Err(GraphError::CyclicGraph);
        }

        let nodes = self.nodes();
        let order: Vec<Node<T>> = topological_positions(&adjacency, self.node_count())
            .into_iter()
            .map(|idx| nodes[idx].clone())
            .collect();

        debug!(len = order.len(), "topological sort finished");
        Ok(order)
    }
}

/// Topological order of node positions. `adjacency` must be acyclic.
pub(crate) fn topological_positions(adjacency: &Adjacency, node_count: usize) -> Vec<usize> {
    let mut visited = vec![false; node_count];
    let mut postorder: Vec<usize> = Vec::with_capacity(node_count);
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in 0..node_count {
        if visited[root] {
            continue;
        }

        visited[root] = true;
        stack.push((root, 0));

        while let Some(frame) = stack.last_mut() {
            let (node, cursor) = *frame;

            let Some(&child) = adjacency.children(node).get(cursor) else {
                postorder.push(node);
                stack.pop();
                continue;
            };
            frame.1 += 1;

            if !visited[child] {
                visited[child] = true;
                stack.push((child, 0));
            }
        }
    }

    postorder.reverse();
    postorder
}
