//! Layout algorithms for ownership trees.
//!
//! Every strategy consumes an assembled [`Tree`] and returns one canvas
//! position per arena slot. Strategies are stateless: all working data is
//! allocated inside [`Strategy::place`] and dropped when it returns, so one
//! strategy value can serve any number of calls.

pub mod config;
pub mod engine;
pub mod enhanced;
pub mod hierarchical;
pub mod result;
pub mod tidy_tree;

use serde::Serialize;

use crate::graph::Tree;

pub use config::{Direction, EdgeKind, EdgeStyle, LayoutConfig, Side};
pub use engine::{LayoutEngine, StrategyKind, create_layout_engine};
pub use enhanced::EnhancedLayout;
pub use hierarchical::HierarchicalLayout;
pub use result::{Bounds, LayoutResult, PositionedNode, StyledEdge};
pub use tidy_tree::TidyTreeLayout;

/// A canvas position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A tree placement algorithm.
pub trait Strategy {
    /// Compute a position for every arena slot of `tree`.
    ///
    /// The returned vector has `tree.len()` entries. Nodes not reachable from
    /// the root are left at the origin.
    fn place(&self, tree: &Tree, config: &LayoutConfig) -> Vec<Point>;
}
