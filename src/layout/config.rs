//! Layout configuration.

use serde::{Deserialize, Serialize};

use super::Point;
use crate::error::LayoutError;

/// Direction in which the tree grows from its root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Root at the top, levels stacked downward.
    #[default]
    #[serde(rename = "TB", alias = "top-to-bottom", alias = "TopToBottom")]
    TopToBottom,
    /// Root at the left, levels stacked rightward.
    #[serde(rename = "LR", alias = "left-to-right", alias = "LeftToRight")]
    LeftToRight,
}

/// Side of a node box where an edge attaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Direction {
    /// Side where edges to children leave a node.
    pub fn source_side(self) -> Side {
        match self {
            Self::TopToBottom => Side::Bottom,
            Self::LeftToRight => Side::Right,
        }
    }

    /// Side where the edge from the parent enters a node.
    pub fn target_side(self) -> Side {
        match self {
            Self::TopToBottom => Side::Top,
            Self::LeftToRight => Side::Left,
        }
    }
}

/// Edge routing hint for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    #[default]
    Smoothstep,
    Step,
    Straight,
    Bezier,
}

/// Presentational edge styling copied onto every output edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EdgeStyle {
    pub kind: EdgeKind,
    pub animated: bool,
    pub stroke: String,
    pub stroke_width: f32,
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self {
            kind: EdgeKind::Smoothstep,
            animated: false,
            stroke: "#b1b1b7".to_owned(),
            stroke_width: 2.0,
        }
    }
}

/// Geometry settings shared by every strategy.
///
/// Missing fields fall back to their defaults when deserialized, so the JS
/// side may pass `{ direction: "LR" }` alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    /// Width of a node box (primary axis extent).
    pub node_width: f32,
    /// Height of a node box (depth axis extent).
    pub node_height: f32,
    /// Gap between neighbouring boxes on the same level.
    pub horizontal_spacing: f32,
    /// Gap between consecutive levels.
    pub vertical_spacing: f32,
    pub direction: Direction,
    pub edge_style: EdgeStyle,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 280.0,
            node_height: 100.0,
            horizontal_spacing: 80.0,
            vertical_spacing: 120.0,
            direction: Direction::TopToBottom,
            edge_style: EdgeStyle::default(),
        }
    }
}

impl LayoutConfig {
    pub fn with_node_size(mut self, width: f32, height: f32) -> Self {
        self.node_width = width;
        self.node_height = height;
        self
    }

    pub fn with_spacing(mut self, horizontal: f32, vertical: f32) -> Self {
        self.horizontal_spacing = horizontal;
        self.vertical_spacing = vertical;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_edge_style(mut self, edge_style: EdgeStyle) -> Self {
        self.edge_style = edge_style;
        self
    }

    /// Minimum primary-axis distance between two nodes on one level.
    #[inline]
    pub fn separation(&self) -> f32 {
        self.node_width + self.horizontal_spacing
    }

    /// Depth-axis distance between consecutive levels.
    #[inline]
    pub fn level_step(&self) -> f32 {
        self.node_height + self.vertical_spacing
    }

    /// Map a (level, primary-axis) pair onto canvas coordinates.
    #[inline]
    pub fn project(&self, level: u32, primary: f32) -> Point {
        let depth = level as f32 * self.level_step();
        match self.direction {
            Direction::TopToBottom => Point::new(primary, depth),
            Direction::LeftToRight => Point::new(depth, primary),
        }
    }

    /// Reject sizes that would make the geometry meaningless.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let fields = [
            ("nodeWidth", self.node_width),
            ("nodeHeight", self.node_height),
            ("horizontalSpacing", self.horizontal_spacing),
            ("verticalSpacing", self.vertical_spacing),
            ("edgeStyle.strokeWidth", self.edge_style.stroke_width),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::InvalidConfig { field, value });
            }
        }
        Ok(())
    }
}
