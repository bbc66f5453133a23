//! Level-based hierarchical layout.
//!
//! The fast baseline: nodes are spread evenly around the axis within their
//! own level, ignoring where their parents sit. Siblings never overlap, but
//! unrelated branches of a skewed tree can be drawn across each other. It is
//! kept as the fallback for unknown strategy names.

use std::collections::VecDeque;

use super::{LayoutConfig, Point, Strategy};
use crate::graph::Tree;

#[derive(Debug, Clone, Copy, Default)]
pub struct HierarchicalLayout;

impl HierarchicalLayout {
    pub fn new() -> Self {
        Self
    }

    /// Breadth-first walk from the root, calling `visit(node, level)`.
    fn walk(tree: &Tree, root: usize, mut visit: impl FnMut(usize, usize)) {
        let mut queue = VecDeque::from([(root, 0usize)]);
        while let Some((node, level)) = queue.pop_front() {
            visit(node, level);
            for &child in tree.children(node) {
                queue.push_back((child, level + 1));
            }
        }
    }
}

impl Strategy for HierarchicalLayout {
    fn place(&self, tree: &Tree, config: &LayoutConfig) -> Vec<Point> {
        let mut positions = vec![Point::default(); tree.len()];
        let Some(root) = tree.root() else {
            return positions;
        };

        // Pass 1: how many nodes sit on each level.
        let mut level_counts: Vec<usize> = Vec::new();
        Self::walk(tree, root, |_, level| {
            if level_counts.len() <= level {
                level_counts.resize(level + 1, 0);
            }
            level_counts[level] += 1;
        });

        // Pass 2: index within the level, centred around zero.
        let mut next_index = vec![0usize; level_counts.len()];
        let sep = config.separation();
        Self::walk(tree, root, |node, level| {
            let index = next_index[level];
            next_index[level] += 1;
            let offset = index as f32 - (level_counts[level] as f32 - 1.0) / 2.0;
            positions[node] = config.project(level as u32, offset * sep);
        });

        positions
    }
}
