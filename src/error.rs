//! Error types.
//!
//! Layout itself never fails: degenerate input degrades to a best-effort
//! layout. Errors only arise at the edges of the crate, when a configuration
//! is rejected, when JS values cannot be converted, or when a caller asks
//! for strict tree validation.

use thiserror::Error;

use crate::graph::NodeId;

/// Errors raised while configuring the engine or crossing the JS boundary.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("invalid layout config: `{field}` must be a finite, non-negative number (got {value})")]
    InvalidConfig { field: &'static str, value: f32 },

    #[error("failed to convert JS value: {0}")]
    Conversion(#[from] serde_wasm_bindgen::Error),
}

/// Structural problems found by strict tree validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("tree has no nodes")]
    Empty,

    #[error("expected exactly one root, found {}", .0.len())]
    RootCount(Vec<NodeId>),

    #[error("ownership cycle through node {0}")]
    Cycle(NodeId),

    #[error("edge {owner} -> {owned} references an unknown node")]
    DanglingEdge { owner: NodeId, owned: NodeId },

    #[error("node id {0} appears more than once")]
    DuplicateId(NodeId),

    #[error("node {0} is not reachable from the root")]
    Unreachable(NodeId),
}
