//! Cycle detection via three-color depth-first search.
//!
//! # Algorithm
//!
//! Every node starts `Unvisited`. Roots are taken in node-insertion order; a
//! DFS marks a node `Visiting` on entry, walks its children in edge-insertion
//! order, and marks it `Visited` once all descendants are done. Meeting a
//! `Visiting` child means the edge points back into the current DFS path: a
//! cycle. The search stops at the first one.
//!
//! The DFS runs on an explicit stack of `(node, next-child cursor)` frames, so
//! deep chains cannot overflow the call stack, and the visit order is the one
//! the recursive formulation would produce.
//!
//! A self-loop is a cycle of length one: the node is still `Visiting` when its
//! own edge is examined.

use tracing::{debug, instrument};

use crate::graph::node::{Label, Node};
use crate::graph::store::{Adjacency, Graph};

/// Per-traversal DFS state of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Unvisited,
    /// On the current DFS path, at this depth of the frame stack.
    Visiting(usize),
    /// Fully explored, descendants included.
    Visited,
}

impl<T: Label> Graph<T> {
    /// Returns `true` if the graph contains no directed cycle.
    ///
    /// The empty graph is a DAG. Runs in O(V + E) and is recomputed on every
    /// call.
    #[instrument(level = "debug", skip(self), fields(nodes = self.node_count(), edges = self.edge_count()))]
    #[must_use]
    pub fn is_dag(&self) -> bool {
        let adjacency = self.adjacency();
        let dag = first_cycle(&adjacency, self.node_count()).is_none();
        debug!(dag, "acyclicity check finished");
        dag
    }

    /// Find the first cycle reached by the acyclicity DFS.
    ///
    /// Returns a closed path `[n0, n1, …, n0]` following edge direction, or
    /// `None` for a DAG. A self-loop on `a` is reported as `[a, a]`.
    #[instrument(level = "debug", skip(self))]
    #[must_use]
    pub fn find_cycle(&self) -> Option<Vec<Node<T>>> {
        let adjacency = self.adjacency();
        let path = first_cycle(&adjacency, self.node_count())?;
        let nodes = self.nodes();
        let cycle: Vec<Node<T>> = path.into_iter().map(|idx| nodes[idx].clone()).collect();
        debug!(len = cycle.len().saturating_sub(1), "cycle found");
        Some(cycle)
    }
}

/// Run the three-color DFS over `adjacency` and return the first cycle as a
/// closed list of node positions.
pub(crate) fn first_cycle(adjacency: &Adjacency, node_count: usize) -> Option<Vec<usize>> {
    let mut status = vec![Status::Unvisited; node_count];
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in 0..node_count {
        if status[root] != Status::Unvisited {
            continue;
        }

        status[root] = Status::Visiting(0);
        stack.push((root, 0));

        while let Some(frame) = stack.last_mut() {
            let (node, cursor) = *frame;

            let Some(&child) = adjacency.children(node).get(cursor) else {
                status[node] = Status::Visited;
                stack.pop();
                continue;
            };
            frame.1 += 1;

            match status[child] {
                Status::Visiting(start) => {
                    // `child` is on the current path; the cycle is the path
                    // suffix starting at it, closed by the back-edge.
                    debug_assert_eq!(stack[start].0, child, "stale depth for node {child}");
                    let mut cycle: Vec<usize> =
                        stack[start..].iter().map(|&(on_path, _)| on_path).collect();
                    cycle.push(child);
                    return Some(cycle);
                }
                Status::Unvisited => {
                    status[child] = Status::Visiting(stack.len());
                    stack.push((child, 0));
                }
                Status::Visited => {}
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use crate::graph::node::{Edge, Node};
    use crate::graph::store::Graph;

    fn graph_from_edges(edges: &[(&'static str, &'static str)]) -> Graph<&'static str> {
        let mut g = Graph::new();
        for &(a, b) in edges {
            g.add_edge_from_values(a, b);
        }
        g
    }

    fn labels(path: &[Node<&str>]) -> Vec<String> {
        path.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn empty_graph_is_dag() {
        let g: Graph<&str> = Graph::new();
        assert!(g.is_dag());
        assert!(g.find_cycle().is_none());
    }

    #[test]
    fn isolated_nodes_are_dag() {
        let mut g = Graph::new();
        g.add_node(Node::new("x")).expect("new node");
        g.add_node(Node::new("a")).expect("new node");
        assert!(g.is_dag());
    }

    #[test]
    fn self_loop_is_a_cycle() {
        let g = graph_from_edges(&[("a", "a")]);
        assert!(!g.is_dag());
        assert_eq!(labels(&g.find_cycle().expect("cycle")), vec!["a", "a"]);
    }

    #[test]
    fn two_node_cycle() {
        let g = graph_from_edges(&[("x", "a"), ("a", "x")]);
        assert!(!g.is_dag());
        assert_eq!(labels(&g.find_cycle().expect("cycle")), vec!["x", "a", "x"]);
    }

    #[test]
    fn cycle_path_excludes_lead_in() {
        // x -> a -> b -> c -> a: the cycle is a, b, c.
        let g = graph_from_edges(&[("x", "a"), ("a", "b"), ("b", "c"), ("c", "a")]);
        assert_eq!(
            labels(&g.find_cycle().expect("cycle")),
            vec!["a", "b", "c", "a"]
        );
    }

    #[test]
    fn cycle_deep_in_path_after_finished_branch() {
        // r's first branch (r -> d) finishes before the walk r -> s -> t -> u
        // closes back onto s.
        let g = graph_from_edges(&[("r", "d"), ("r", "s"), ("s", "t"), ("t", "u"), ("u", "s")]);
        assert_eq!(
            labels(&g.find_cycle().expect("cycle")),
            vec!["s", "t", "u", "s"]
        );
    }

    #[test]
    fn diamond_is_not_a_cycle() {
        // Two paths into d must not be mistaken for a back-edge.
        let g = graph_from_edges(&[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")]);
        assert!(g.is_dag());
    }

    #[test]
    fn cycle_in_later_component_is_found() {
        let g = graph_from_edges(&[("x", "a"), ("a", "b"), ("y", "c"), ("c", "y")]);
        assert!(!g.is_dag());
        assert_eq!(labels(&g.find_cycle().expect("cycle")), vec!["y", "c", "y"]);
    }

    #[test]
    fn duplicate_edges_do_not_create_cycles() {
        let g = graph_from_edges(&[("a", "b"), ("a", "b")]);
        assert!(g.is_dag());
    }

    #[test]
    fn dangling_edges_are_ignored() {
        let mut g = Graph::new();
        g.add_node(Node::new("a")).expect("new node");
        g.add_edge(Edge::new(Node::new("a"), Node::new("ghost")));
        g.add_edge(Edge::new(Node::new("ghost"), Node::new("a")));
        assert!(g.is_dag());
    }

    #[test]
    fn deep_chain_does_not_overflow() {
        let mut g: Graph<u32> = Graph::new();
        for i in 0..100_000 {
            g.add_edge_from_values(i, i + 1);
        }
        assert!(g.is_dag());

        g.add_edge_from_values(100_000, 0);
        assert!(!g.is_dag());
    }

    #[test]
    fn repeated_checks_agree() {
        let g = graph_from_edges(&[("a", "b"), ("b", "a")]);
        assert_eq!(g.is_dag(), g.is_dag());
        assert_eq!(g.find_cycle(), g.find_cycle());
    }
}
