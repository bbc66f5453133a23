//! Node type and related structures.
//!
//! Nodes are the records supplied by the resolver. Each node has:
//! - An opaque identifier (usually a resource UID)
//! - A caller payload that is carried through layout untouched

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque node identifier.
///
/// The engine never interprets the contents; ids are compared for equality
/// and used to resolve edge endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    /// Create a new NodeId.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw string value.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    #[inline]
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for NodeId {
    #[inline]
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<NodeId> for String {
    #[inline]
    fn from(id: NodeId) -> Self {
        id.0
    }
}

/// A caller-supplied node: id plus arbitrary payload.
///
/// On the JS side the payload is every field other than `id`, so a node
/// looks like `{ id: "uid-1", kind: "Deployment", name: "web" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node<P> {
    pub id: NodeId,
    #[serde(flatten)]
    pub data: P,
}

impl<P> Node<P> {
    pub fn new(id: impl Into<NodeId>, data: P) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }
}

impl Node<()> {
    /// A node with no payload. Mostly useful in tests.
    pub fn bare(id: impl Into<NodeId>) -> Self {
        Self::new(id, ())
    }
}
