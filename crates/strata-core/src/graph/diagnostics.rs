//! Human- and machine-readable snapshot of a graph.
//!
//! [`GraphReport`] gathers everything worth looking at while debugging a
//! dependency graph: the node and edge lists, sources and sinks, the
//! acyclicity flag, the topological order, and the neighbourhood of every
//! node. Building a report runs [`Graph::topo_sort`], so it fails on a cyclic
//! graph just like the sort does.

use std::fmt;

use serde::Serialize;
use tracing::instrument;

use crate::error::Result;
use crate::graph::node::{Edge, Label, Node};
use crate::graph::store::Graph;

/// Snapshot of a graph's structure and analyses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphReport<T> {
    pub nodes: Vec<Node<T>>,
    pub edges: Vec<Edge<T>>,
    pub sources: Vec<Node<T>>,
    pub sinks: Vec<Node<T>>,
    pub is_dag: bool,
    pub topo_sort: Vec<Node<T>>,
    /// Per-node neighbourhoods, in node-insertion order.
    pub adjacency: Vec<NodeReport<T>>,
}

/// Incident edges and neighbours of one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeReport<T> {
    pub node: Node<T>,
    pub in_edges: Vec<Edge<T>>,
    pub out_edges: Vec<Edge<T>>,
    pub parents: Vec<Node<T>>,
    pub children: Vec<Node<T>>,
}

impl<T: Label> GraphReport<T> {
    /// Collect a report for `graph`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::CyclicGraph`](crate::GraphError::CyclicGraph)
    /// if the graph is not a DAG.
    #[instrument(level = "debug", skip(graph), fields(nodes = graph.node_count()))]
    pub fn build(graph: &Graph<T>) -> Result<Self> {
        let adjacency = graph
            .nodes()
            .iter()
            .map(|node| NodeReport {
                node: node.clone(),
                in_edges: graph.in_edges(node),
                out_edges: graph.out_edges(node),
                parents: graph.parents(node),
                children: graph.children(node),
            })
            .collect();

        Ok(Self {
            nodes: graph.nodes().to_vec(),
            edges: graph.edges().to_vec(),
            sources: graph.sources(),
            sinks: graph.sinks(),
            is_dag: graph.is_dag(),
            topo_sort: graph.topo_sort()?,
            adjacency,
        })
    }
}

impl<T: Label> Graph<T> {
    /// Render the diagnostic report as text.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::CyclicGraph`](crate::GraphError::CyclicGraph)
    /// if the graph is not a DAG.
    pub fn render(&self) -> Result<String> {
        Ok(GraphReport::build(self)?.to_string())
    }
}

/// Format `items` as `[a, b, c]`.
fn list<I>(items: I) -> String
where
    I: IntoIterator,
    I::Item: fmt::Display,
{
    let parts: Vec<String> = items.into_iter().map(|item| item.to_string()).collect();
    format!("[{}]", parts.join(", "))
}

impl<T: fmt::Display> fmt::Display for GraphReport<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "nodes     {}", list(&self.nodes))?;
        writeln!(f, "edges     {}", list(&self.edges))?;
        writeln!(f, "sources   {}", list(&self.sources))?;
        writeln!(f, "sinks     {}", list(&self.sinks))?;
        writeln!(f, "is_dag    {}", self.is_dag)?;
        writeln!(f, "topo_sort {}", list(&self.topo_sort))?;

        for entry in &self.adjacency {
            writeln!(f)?;
            write!(f, "{entry}")?;
        }
        Ok(())
    }
}

impl<T: fmt::Display> fmt::Display for NodeReport<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = &self.node;
        writeln!(f, "in_edges  '{node}': {}", list(&self.in_edges))?;
        writeln!(f, "out_edges '{node}': {}", list(&self.out_edges))?;
        writeln!(f, "parents   '{node}': {}", list(&self.parents))?;
        writeln!(f, "children  '{node}': {}", list(&self.children))
    }
}
