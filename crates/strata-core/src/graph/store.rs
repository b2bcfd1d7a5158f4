//! Graph storage and adjacency queries.
//!
//! # Overview
//!
//! [`Graph`] keeps two insertion-ordered sequences:
//!
//! - `nodes`: duplicate-free, guarded by a value → position index
//! - `edges`: append-only, duplicates allowed
//!
//! Adjacency queries ([`Graph::in_edges`], [`Graph::children`], …) are linear
//! scans over `edges` so their output always follows edge-insertion order.
//! The traversals in [`crate::graph::cycles`], [`crate::graph::topo`] and
//! [`crate::graph::level`] build a throwaway [`Adjacency`] once per call
//! instead, which keeps them O(V + E) while visiting children in exactly the
//! same order.
//!
//! ## Referential Invariant
//!
//! Every edge endpoint should be a registered node. [`Graph::add_edge_from_values`]
//! guarantees this; raw [`Graph::add_edge`] trusts the caller. Traversals skip
//! edges whose endpoints were never registered ("dangling" edges) and log a
//! warning.

#![allow(clippy::module_name_repetitions)]

use std::collections::{HashMap, HashSet};

use petgraph::graph::{DiGraph, NodeIndex};
use tracing::{trace, warn};

use crate::error::{GraphError, Result};
use crate::graph::node::{Edge, Label, Node};

// ---------------------------------------------------------------------------
// Graph
// ---------------------------------------------------------------------------

/// An insert-only directed graph over labelled nodes.
///
/// `Graph` is a single-owner structure: mutation needs `&mut self`, analyses
/// only need `&self`, so concurrent read-only analysis of a graph nobody is
/// mutating is safe by construction.
#[derive(Debug, Clone)]
pub struct Graph<T> {
    /// Nodes in insertion order.
    nodes: Vec<Node<T>>,
    /// Position of each node in `nodes`.
    positions: HashMap<Node<T>, usize>,
    /// Edges in insertion order, duplicates included.
    edges: Vec<Edge<T>>,
}

impl<T> Default for Graph<T> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            positions: HashMap::new(),
            edges: Vec::new(),
        }
    }
}

impl<T: Label> Graph<T> {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty graph with room for `nodes` nodes and `edges` edges.
    #[must_use]
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            positions: HashMap::with_capacity(nodes),
            edges: Vec::with_capacity(edges),
        }
    }

    // -----------------------------------------------------------------------
    // Insertion
    // -----------------------------------------------------------------------

    /// Insert `node`, failing if it is already present.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateNode`] if an equal node exists. The node
    /// collection is left untouched in that case.
    pub fn add_node(&mut self, node: Node<T>) -> Result<Node<T>> {
        if self.contains(&node) {
            return Err(GraphError::DuplicateNode(node.to_string()));
        }
        Ok(self.add_node_if_missing(node))
    }

    /// Insert `node` unless an equal node is already present.
    ///
    /// Returns `node` either way.
    pub fn add_node_if_missing(&mut self, node: Node<T>) -> Node<T> {
        if !self.positions.contains_key(&node) {
            trace!(node = %node, position = self.nodes.len(), "node inserted");
            self.positions.insert(node.clone(), self.nodes.len());
            self.nodes.push(node.clone());
        }
        node
    }

    /// Append `edge` without touching the node collection.
    ///
    /// Identical edges are kept side by side.
    pub fn add_edge(&mut self, edge: Edge<T>) -> Edge<T> {
        trace!(edge = %edge, "edge appended");
        self.edges.push(edge.clone());
        edge
    }

    /// Register both endpoints (idempotently) and append `src -> dst`.
    pub fn add_edge_from_values(&mut self, src: T, dst: T) -> Edge<T> {
        let src = self.add_node_if_missing(Node::new(src));
        let dst = self.add_node_if_missing(Node::new(dst));
        self.add_edge(Edge::new(src, dst))
    }

    // -----------------------------------------------------------------------
    // Collections
    // -----------------------------------------------------------------------

    /// All nodes in insertion order.
    #[must_use]
    pub fn nodes(&self) -> &[Node<T>] {
        &self.nodes
    }

    /// All edges in insertion order.
    #[must_use]
    pub fn edges(&self) -> &[Edge<T>] {
        &self.edges
    }

    /// Returns `true` if `node` has been registered.
    #[must_use]
    pub fn contains(&self, node: &Node<T>) -> bool {
        self.positions.contains_key(node)
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if the graph has neither nodes nor edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub(crate) fn position(&self, node: &Node<T>) -> Option<usize> {
        self.positions.get(node).copied()
    }

    // -----------------------------------------------------------------------
    // Adjacency queries
    // -----------------------------------------------------------------------

    /// Edges ending at `node`, in edge-insertion order.
    #[must_use]
    pub fn in_edges(&self, node: &Node<T>) -> Vec<Edge<T>> {
        self.edges
            .iter()
            .filter(|edge| edge.dst() == node)
            .cloned()
            .collect()
    }

    /// Edges starting at `node`, in edge-insertion order.
    #[must_use]
    pub fn out_edges(&self, node: &Node<T>) -> Vec<Edge<T>> {
        self.edges
            .iter()
            .filter(|edge| edge.src() == node)
            .cloned()
            .collect()
    }

    /// Source endpoint of every edge ending at `node`.
    ///
    /// A parent connected through several edges appears once per edge.
    #[must_use]
    pub fn parents(&self, node: &Node<T>) -> Vec<Node<T>> {
        self.edges
            .iter()
            .filter(|edge| edge.dst() == node)
            .map(|edge| edge.src().clone())
            .collect()
    }

    /// Destination endpoint of every edge starting at `node`.
    ///
    /// A child connected through several edges appears once per edge.
    #[must_use]
    pub fn children(&self, node: &Node<T>) -> Vec<Node<T>> {
        self.edges
            .iter()
            .filter(|edge| edge.src() == node)
            .map(|edge| edge.dst().clone())
            .collect()
    }

    /// Number of edges ending at `node`.
    #[must_use]
    pub fn in_degree(&self, node: &Node<T>) -> usize {
        self.edges.iter().filter(|edge| edge.dst() == node).count()
    }

    /// Number of edges starting at `node`.
    #[must_use]
    pub fn out_degree(&self, node: &Node<T>) -> usize {
        self.edges.iter().filter(|edge| edge.src() == node).count()
    }

    /// Nodes with no incoming edges, in node-insertion order.
    #[must_use]
    pub fn sources(&self) -> Vec<Node<T>> {
        self.nodes
            .iter()
            .filter(|node| self.in_degree(node) == 0)
            .cloned()
            .collect()
    }

    /// Nodes with no outgoing edges, in node-insertion order.
    #[must_use]
    pub fn sinks(&self) -> Vec<Node<T>> {
        self.nodes
            .iter()
            .filter(|node| self.out_degree(node) == 0)
            .cloned()
            .collect()
    }

    /// Union of the children of every node in `nodes`, without duplicates.
    #[must_use]
    pub fn all_children(&self, nodes: &[Node<T>]) -> HashSet<Node<T>> {
        let wanted: HashSet<&Node<T>> = nodes.iter().collect();
        self.edges
            .iter()
            .filter(|edge| wanted.contains(edge.src()))
            .map(|edge| edge.dst().clone())
            .collect()
    }

    // -----------------------------------------------------------------------
    // Interop
    // -----------------------------------------------------------------------

    /// Export to a petgraph [`DiGraph`] for use with its algorithm library.
    ///
    /// Node indices follow node-insertion order and edge indices follow
    /// edge-insertion order. Endpoints of dangling edges are appended as extra
    /// nodes so every edge survives the conversion.
    #[must_use]
    pub fn to_digraph(&self) -> DiGraph<T, ()> {
        let mut graph = DiGraph::<T, ()>::with_capacity(self.nodes.len(), self.edges.len());
        let mut node_map: HashMap<&Node<T>, NodeIndex> = HashMap::with_capacity(self.nodes.len());

        for node in &self.nodes {
            let idx = graph.add_node(node.value().clone());
            node_map.insert(node, idx);
        }

        for edge in &self.edges {
            let src = *node_map
                .entry(edge.src())
                .or_insert_with(|| graph.add_node(edge.src().value().clone()));
            let dst = *node_map
                .entry(edge.dst())
                .or_insert_with(|| graph.add_node(edge.dst().value().clone()));
            graph.add_edge(src, dst, ());
        }

        graph
    }

    /// Build the per-call adjacency index used by the traversals.
    pub(crate) fn adjacency(&self) -> Adjacency {
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); self.nodes.len()];
        let mut parents: Vec<Vec<usize>> = vec![Vec::new(); self.nodes.len()];
        let mut dangling = 0;

        for edge in &self.edges {
            match (self.position(edge.src()), self.position(edge.dst())) {
                (Some(src), Some(dst)) => {
                    children[src].push(dst);
                    parents[dst].push(src);
                }
                _ => {
                    warn!(edge = %edge, "edge endpoint is not a registered node; skipping");
                    dangling += 1;
                }
            }
        }

        Adjacency {
            children,
            parents,
            dangling,
        }
    }
}

// ---------------------------------------------------------------------------
// Adjacency
// ---------------------------------------------------------------------------

/// Position-based adjacency lists, rebuilt for every traversal.
///
/// `children[i]` lists destination positions of edges leaving node `i` in
/// edge-insertion order, so iterating it visits children exactly as
/// [`Graph::children`] would.
#[derive(Debug)]
pub(crate) struct Adjacency {
    children: Vec<Vec<usize>>,
    parents: Vec<Vec<usize>>,
    dangling: usize,
}

impl Adjacency {
    pub(crate) fn children(&self, node: usize) -> &[usize] {
        &self.children[node]
    }

    pub(crate) fn parents(&self, node: usize) -> &[usize] {
        &self.parents[node]
    }

    /// Number of edges skipped because an endpoint is unregistered.
    pub(crate) const fn dangling(&self) -> usize {
        self.dangling
    }
}
