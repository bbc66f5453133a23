//! Layout output handed to the rendering layer.
//!
//! Everything the renderer needs is precomputed here (positions, levels,
//! handle sides, edge styling, overall bounds) so it can paint without any
//! geometry of its own.

use serde::Serialize;

use super::config::{EdgeKind, LayoutConfig, Side};
use crate::graph::NodeId;

/// A node with its payload and computed placement.
///
/// Serialized flat: the payload's fields sit next to `x`, `y`, `level` and
/// `isRoot`, so the renderer receives its original record back, extended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedNode<P> {
    pub id: NodeId,
    #[serde(flatten)]
    pub data: P,
    /// Centre of the node box.
    pub x: f32,
    pub y: f32,
    pub level: u32,
    pub is_root: bool,
    /// Side where edges to children leave.
    pub source_position: Side,
    /// Side where the edge from the parent enters.
    pub target_position: Side,
}

/// Stroke settings for one edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStroke {
    pub stroke: String,
    pub stroke_width: f32,
}

/// An edge ready to draw.
///
/// `id` is `e{index}-{source}-{target}` where `index` is the edge's position
/// in the input list, so ids stay unique for repeated edges and for node ids
/// that contain `-`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledEdge {
    pub id: String,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    pub animated: bool,
    pub style: EdgeStroke,
}

impl StyledEdge {
    pub fn new(index: usize, source: NodeId, target: NodeId, config: &LayoutConfig) -> Self {
        let style = &config.edge_style;
        Self {
            id: format!("e{index}-{source}-{target}"),
            source,
            target,
            kind: style.kind,
            animated: style.animated,
            style: EdgeStroke {
                stroke: style.stroke.clone(),
                stroke_width: style.stroke_width,
            },
        }
    }
}

/// Axis-aligned box enclosing every node box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    /// Bounds of boxes of `config`'s node size centred on `centers`.
    pub fn around(centers: impl IntoIterator<Item = (f32, f32)>, config: &LayoutConfig) -> Self {
        let half_w = config.node_width / 2.0;
        let half_h = config.node_height / 2.0;
        let mut bounds: Option<Self> = None;
        for (x, y) in centers {
            let b = bounds.get_or_insert(Self {
                min_x: x - half_w,
                min_y: y - half_h,
                max_x: x + half_w,
                max_y: y + half_h,
            });
            b.min_x = b.min_x.min(x - half_w);
            b.min_y = b.min_y.min(y - half_h);
            b.max_x = b.max_x.max(x + half_w);
            b.max_y = b.max_y.max(y + half_h);
        }
        bounds.unwrap_or_default()
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }
}

/// Positioned nodes in input order plus the edges to draw between them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutResult<P> {
    pub nodes: Vec<PositionedNode<P>>,
    pub edges: Vec<StyledEdge>,
    pub bounds: Bounds,
}

impl<P> LayoutResult<P> {
    pub fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            bounds: Bounds::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a positioned node by id.
    pub fn node(&self, id: &str) -> Option<&PositionedNode<P>> {
        self.nodes.iter().find(|n| n.id.as_str() == id)
    }

    /// The root node, if the input was non-empty.
    pub fn root(&self) -> Option<&PositionedNode<P>> {
        self.nodes.iter().find(|n| n.is_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_around_centers() {
        let config = LayoutConfig::default().with_node_size(100.0, 50.0);
        let bounds = Bounds::around([(0.0, 0.0), (300.0, 200.0)], &config);

        assert_eq!(
            bounds,
            Bounds {
                min_x: -50.0,
                min_y: -25.0,
                max_x: 350.0,
                max_y: 225.0,
            }
        );
        assert_eq!(bounds.width(), 400.0);
        assert_eq!(bounds.height(), 250.0);
    }

    #[test]
    fn test_bounds_empty() {
        assert_eq!(Bounds::around([], &LayoutConfig::default()), Bounds::default());
    }

    #[test]
    fn test_styled_edge_json() {
        let edge = StyledEdge::new(0, NodeId::from("a"), NodeId::from("b"), &LayoutConfig::default());
        let json = serde_json::to_value(&edge).unwrap();

        assert_eq!(json["id"], "e0-a-b");
        assert_eq!(json["type"], "smoothstep");
        assert_eq!(json["style"]["strokeWidth"], 2.0);
    }

    #[test]
    fn test_positioned_node_merges_payload() {
        let node = PositionedNode {
            id: NodeId::from("pod"),
            data: serde_json::json!({ "kind": "Pod" }),
            x: 1.0,
            y: 2.0,
            level: 1,
            is_root: false,
            source_position: Side::Bottom,
            target_position: Side::Top,
        };
        let json = serde_json::to_value(&node).unwrap();

        assert_eq!(json["kind"], "Pod");
        assert_eq!(json["isRoot"], false);
        assert_eq!(json["targetPosition"], "top");
    }
}
