//! Error taxonomy for graph construction and analysis.
//!
//! Only two things can go wrong in the core: inserting a node twice through
//! the strict insert, and asking for an ordering or a level on a graph that
//! contains a cycle. Every other operation is total.

use std::fmt;

/// Convenience alias for results returned by graph operations.
pub type Result<T, E = GraphError> = std::result::Result<T, E>;

/// Errors raised by [`Graph`](crate::Graph) operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// [`Graph::add_node`](crate::Graph::add_node) was called with a node that
    /// is already present.
    #[error("node already exists in graph: {0}")]
    DuplicateNode(String),

    /// An ordering or level was requested on a graph that is not a DAG.
    #[error("no support for cyclic graphs")]
    CyclicGraph,
}

impl GraphError {
    /// Machine-readable classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorCode {
        match self {
            Self::DuplicateNode(_) => ErrorCode::DuplicateNode,
            Self::CyclicGraph => ErrorCode::CyclicGraph,
        }
    }

    /// Stable code identifier (`E####`), shorthand for `self.kind().code()`.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// Optional remediation hint for operators.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        self.kind().hint()
    }
}

/// Machine-readable error codes for callers that branch on failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    DuplicateNode,
    CyclicGraph,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::DuplicateNode => "E2001",
            Self::CyclicGraph => "E2002",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::DuplicateNode => "Node already exists",
            Self::CyclicGraph => "Graph contains a cycle",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::DuplicateNode => Some("Use add_node_if_missing for idempotent inserts."),
            Self::CyclicGraph => Some("Remove an edge from the reported cycle to make the graph acyclic."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
