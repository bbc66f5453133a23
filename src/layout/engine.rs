//! Layout engine facade.
//!
//! Picks a strategy by name and exposes one `layout(nodes, edges)` entry
//! point. The engine holds nothing but the strategy kind and configuration;
//! every call assembles its own tree and scratch data, so a single engine
//! can be shared freely.

use std::fmt;

use log::{debug, warn};

use super::config::LayoutConfig;
use super::result::{Bounds, LayoutResult, PositionedNode, StyledEdge};
use super::{EnhancedLayout, HierarchicalLayout, Point, Strategy, TidyTreeLayout};
use crate::error::LayoutError;
use crate::graph::{Edge, NestedNode, Node, Tree, nested};

/// Available placement strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StrategyKind {
    /// Level-by-level spreading. Fast; branches may cross.
    #[default]
    Hierarchical,
    /// Tidy tree with contour threading.
    ReingoldTilford,
    /// Width-sorted placement with per-level conflict sweep.
    Enhanced,
}

impl StrategyKind {
    /// Parse a strategy name, accepting a few common spellings.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "hierarchical" => Some(Self::Hierarchical),
            "reingold-tilford" | "reingold_tilford" | "reingoldtilford" | "tidy" | "rt" => {
                Some(Self::ReingoldTilford)
            }
            "enhanced" => Some(Self::Enhanced),
            _ => None,
        }
    }

    /// Parse a strategy name, falling back to [`StrategyKind::Hierarchical`].
    pub fn from_name(name: &str) -> Self {
        Self::parse(name).unwrap_or_else(|| {
            warn!(strategy = name; "Unknown layout strategy, falling back to hierarchical");
            Self::Hierarchical
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Hierarchical => "hierarchical",
            Self::ReingoldTilford => "reingold-tilford",
            Self::Enhanced => "enhanced",
        }
    }

    fn strategy(self) -> &'static dyn Strategy {
        static HIERARCHICAL: HierarchicalLayout = HierarchicalLayout;
        static TIDY: TidyTreeLayout = TidyTreeLayout;
        static ENHANCED: EnhancedLayout = EnhancedLayout;
        match self {
            Self::Hierarchical => &HIERARCHICAL,
            Self::ReingoldTilford => &TIDY,
            Self::Enhanced => &ENHANCED,
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A configured strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutEngine {
    kind: StrategyKind,
    config: LayoutConfig,
}

/// Create an engine for `strategy_name`; unknown names use the hierarchical
/// strategy.
///
/// Fails if `config` has a negative or non-finite size, spacing or stroke
/// width.
pub fn create_layout_engine(
    strategy_name: &str,
    config: LayoutConfig,
) -> Result<LayoutEngine, LayoutError> {
    config.validate()?;
    Ok(LayoutEngine::new(StrategyKind::from_name(strategy_name), config))
}

impl LayoutEngine {
    pub fn new(kind: StrategyKind, config: LayoutConfig) -> Self {
        Self { kind, config }
    }

    #[inline]
    pub fn kind(&self) -> StrategyKind {
        self.kind
    }

    #[inline]
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lay out borrowed nodes; payloads are cloned into the result.
    pub fn layout<P: Clone>(&self, nodes: &[Node<P>], edges: &[Edge]) -> LayoutResult<P> {
        self.layout_owned(nodes.to_vec(), edges)
    }

    /// Lay out owned nodes, moving payloads into the result.
    pub fn layout_owned<P>(&self, nodes: Vec<Node<P>>, edges: &[Edge]) -> LayoutResult<P> {
        debug!(
            strategy = self.kind.name(),
            nodes = nodes.len(),
            edges = edges.len();
            "Computing tree layout"
        );
        if nodes.is_empty() {
            return LayoutResult::empty();
        }

        let tree = Tree::assemble(&nodes, edges);
        let positions = self.kind.strategy().place(&tree, &self.config);
        let root = tree.root();
        let direction = self.config.direction;

        let nodes: Vec<PositionedNode<P>> = nodes
            .into_iter()
            .zip(positions)
            .enumerate()
            .map(|(i, (node, Point { x, y }))| PositionedNode {
                id: node.id,
                data: node.data,
                x,
                y,
                level: tree.node(i).depth,
                is_root: root == Some(i),
                source_position: direction.source_side(),
                target_position: direction.target_side(),
            })
            .collect();

        let edges: Vec<StyledEdge> = edges
            .iter()
            .enumerate()
            .filter(|(_, e)| {
                !e.is_self_loop()
                    && tree.index_of(&e.source).is_some()
                    && tree.index_of(&e.target).is_some()
            })
            .map(|(i, e)| StyledEdge::new(i, e.source.clone(), e.target.clone(), &self.config))
            .collect();

        let bounds = Bounds::around(nodes.iter().map(|n| (n.x, n.y)), &self.config);

        LayoutResult {
            nodes,
            edges,
            bounds,
        }
    }

    /// Flatten a nested tree and lay it out.
    pub fn layout_nested<P>(&self, root: NestedNode<P>) -> LayoutResult<P> {
        let (nodes, edges) = nested::flatten(root);
        self.layout_owned(nodes, &edges)
    }

    /// Positions only, one per input node in input order.
    pub fn positions<P>(&self, nodes: &[Node<P>], edges: &[Edge]) -> Vec<Point> {
        let tree = Tree::assemble(nodes, edges);
        self.kind.strategy().place(&tree, &self.config)
    }
}
