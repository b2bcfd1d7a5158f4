//! Node and edge value types.
//!
//! Identity is value equality: two nodes wrapping equal labels are the same
//! node, regardless of where or when they were constructed.

use std::fmt;
use std::hash::Hash;

use serde::Serialize;

/// Bound satisfied by any value usable as a node label.
///
/// Labels must be cheap to clone, hashable for the store's index, and
/// printable for diagnostics and error messages.
pub trait Label: Clone + Eq + Hash + fmt::Display {}

impl<T> Label for T where T: Clone + Eq + Hash + fmt::Display {}

/// A graph node wrapping an immutable label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Node<T>(T);

impl<T> Node<T> {
    /// Wrap `value` as a node.
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self(value)
    }

    /// The wrapped label.
    #[must_use]
    pub const fn value(&self) -> &T {
        &self.0
    }

    /// Unwrap the label.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for Node<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T: fmt::Display> fmt::Display for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A directed edge `src -> dst`.
///
/// Structurally identical edges compare equal, but the graph keeps every
/// copy that is inserted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Edge<T> {
    src: Node<T>,
    dst: Node<T>,
}

impl<T> Edge<T> {
    /// Create the edge `src -> dst`.
    #[must_use]
    pub const fn new(src: Node<T>, dst: Node<T>) -> Self {
        Self { src, dst }
    }

    /// Source endpoint.
    #[must_use]
    pub const fn src(&self) -> &Node<T> {
        &self.src
    }

    /// Destination endpoint.
    #[must_use]
    pub const fn dst(&self) -> &Node<T> {
        &self.dst
    }

    /// Returns `true` if the edge starts and ends at the same node.
    #[must_use]
    pub fn is_self_loop(&self) -> bool
    where
        T: PartialEq,
    {
        self.src == self.dst
    }
}

impl<T: fmt::Display> fmt::Display for Edge<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.src, self.dst)
    }
}
