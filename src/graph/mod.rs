//! Tree data structures and operations.
//!
//! Input records ([`Node`], [`Edge`]) come from the resolver as flat lists.
//! [`Tree`] turns them into an index-based arena that the layout strategies
//! walk; parent, thread and ancestor relations are plain indices into it.

mod edge;
pub mod nested;
mod node;
pub mod stats;
mod tree;
pub mod validate;

pub use edge::Edge;
pub use nested::NestedNode;
pub use node::{Node, NodeId};
pub use stats::TreeStats;
pub use tree::{Tree, TreeNode};
pub use validate::TreeReport;
