//! Subtree-size aware layout with explicit conflict resolution.
//!
//! # Passes
//!
//! 0. **Subtree widths:** leaves count 1, internal nodes the sum of their
//!    children. Children are then sorted by descending width, so the widest
//!    subtree ends up leftmost (a stable sort keeps input order for ties).
//! 1. **Provisional x:** leaves take consecutive columns one separation
//!    apart; parents sit at the midpoint of their first and last child.
//! 2. **Conflict resolution:** level by level from the root, nodes are
//!    swept left to right and any node closer than one separation to its
//!    neighbour has its whole subtree pushed right by the deficit.
//! 3. **Centering:** the horizontal extent is centred on x = 0.
//! 4. **Projection** onto the canvas for the configured direction.

use super::{LayoutConfig, Point, Strategy};
use crate::graph::Tree;

#[derive(Debug, Clone, Copy, Default)]
pub struct EnhancedLayout;

impl EnhancedLayout {
    pub fn new() -> Self {
        Self
    }
}

/// Subtree widths in leaf columns, indexed by arena slot.
fn subtree_widths(tree: &Tree) -> Vec<usize> {
    let mut widths = vec![1usize; tree.len()];

    // Reverse preorder visits every child before its parent.
    for v in tree.preorder().into_iter().rev() {
        let children = tree.children(v);
        if !children.is_empty() {
            widths[v] = children.iter().map(|&c| widths[c]).sum();
        }
    }
    widths
}

/// Child lists sorted by descending subtree width; ties keep edge order.
fn widest_first(tree: &Tree, widths: &[usize]) -> Vec<Vec<usize>> {
    (0..tree.len())
        .map(|v| {
            let mut sorted = tree.children(v).to_vec();
            sorted.sort_by(|&a, &b| widths[b].cmp(&widths[a]));
            sorted
        })
        .collect()
}

/// Pass 1. Returns the next free column after `v`'s subtree.
fn assign_provisional(
    v: usize,
    next_x: f32,
    ordered: &[Vec<usize>],
    separation: f32,
    x: &mut [f32],
) -> f32 {
    let children = &ordered[v];
    let (Some(&first), Some(&last)) = (children.first(), children.last()) else {
        x[v] = next_x;
        return next_x + separation;
    };

    let mut next = next_x;
    for &child in children {
        next = assign_provisional(child, next, ordered, separation, x);
    }
    x[v] = (x[first] + x[last]) / 2.0;
    next
}

/// Pass 2. Enforce the minimum separation on every level.
fn resolve_conflicts(tree: &Tree, x: &mut [f32], separation: f32) {
    for level in tree.levels() {
        let mut row = level.clone();
        row.sort_by(|&a, &b| x[a].total_cmp(&x[b]));

        for pair in 1..row.len() {
            let (left, right) = (row[pair - 1], row[pair]);
            let gap = x[right] - x[left];
            if gap < separation {
                let deficit = separation - gap;
                for node in tree.descendants(right) {
                    x[node] += deficit;
                }
            }
        }
    }
}

/// Pass 3. Translate reachable nodes so their extent is centred on zero.
fn center(tree: &Tree, x: &mut [f32]) {
    let (min, max) = tree
        .bfs()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(x[v]), hi.max(x[v]))
        });
    if !min.is_finite() {
        return;
    }
    let offset = -(min + max) / 2.0;
    for v in tree.bfs() {
        x[v] += offset;
    }
}

impl Strategy for EnhancedLayout {
    fn place(&self, tree: &Tree, config: &LayoutConfig) -> Vec<Point> {
        let mut positions = vec![Point::default(); tree.len()];
        let Some(root) = tree.root() else {
            return positions;
        };
        let separation = config.separation();

        let widths = subtree_widths(tree);
        let ordered = widest_first(tree, &widths);
        let mut x = vec![0.0f32; tree.len()];
        assign_provisional(root, 0.0, &ordered, separation, &mut x);
        resolve_conflicts(tree, &mut x, separation);
        center(tree, &mut x);

        for v in tree.bfs() {
            positions[v] = config.project(tree.node(v).depth, x[v]);
        }
        positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, Node};
    use crate::layout::Direction;
    use float_cmp::assert_approx_eq;

    fn tree(ids: &[&str], edges: &[(&str, &str)]) -> Tree {
        let nodes: Vec<Node<()>> = ids.iter().map(|&id| Node::bare(id)).collect();
        let edges: Vec<Edge> = edges.iter().map(|&(s, t)| Edge::new(s, t)).collect();
        Tree::assemble(&nodes, &edges)
    }

    #[test]
    fn test_subtree_widths_and_order() {
        // r -> b (leaf), r -> a (two leaves), r -> c (one leaf)
        let tree = tree(
            &["r", "b", "a", "c", "a1", "a2", "c1"],
            &[
                ("r", "b"),
                ("r", "a"),
                ("r", "c"),
                ("a", "a1"),
                ("a", "a2"),
                ("c", "c1"),
            ],
        );
        let widths = subtree_widths(&tree);
        let ordered = widest_first(&tree, &widths);

        assert_eq!(widths[0], 4);
        assert_eq!(widths[2], 2);
        assert_eq!(widths[1], 1);
        // Widest first; b and c tie and keep input order.
        assert_eq!(ordered[0], vec![2, 1, 3]);
    }

    #[test]
    fn test_widest_subtree_is_leftmost() {
        let tree = tree(
            &["r", "b", "a", "a1", "a2"],
            &[("r", "b"), ("r", "a"), ("a", "a1"), ("a", "a2")],
        );
        let pos = EnhancedLayout::new().place(&tree, &LayoutConfig::default());

        assert!(pos[2].x < pos[1].x, "wide subtree a should be left of leaf b");
        // Columns a1=0, a2=360, b=720 -> extent centred on zero.
        assert_approx_eq!(f32, pos[3].x, -360.0);
        assert_approx_eq!(f32, pos[4].x, 0.0);
        assert_approx_eq!(f32, pos[1].x, 360.0);
        assert_approx_eq!(f32, pos[2].x, -180.0);
        assert_approx_eq!(f32, pos[0].x, 90.0);
    }

    #[test]
    fn test_resolve_conflicts_shifts_whole_subtree() {
        let tree = tree(
            &["r", "a", "b", "a1", "b1"],
            &[("r", "a"), ("r", "b"), ("a", "a1"), ("b", "b1")],
        );
        let mut x = vec![0.0, 0.0, 100.0, 0.0, 100.0];
        resolve_conflicts(&tree, &mut x, 360.0);

        assert_approx_eq!(f32, x[2], 360.0);
        assert_approx_eq!(f32, x[4], 360.0);
        assert_approx_eq!(f32, x[1], 0.0);
    }

    #[test]
    fn test_resolve_conflicts_cascades_along_level() {
        let tree = tree(&["r", "a", "b", "c"], &[("r", "a"), ("r", "b"), ("r", "c")]);
        let mut x = vec![0.0, 0.0, 10.0, 20.0];
        resolve_conflicts(&tree, &mut x, 360.0);

        assert_approx_eq!(f32, x[2], 360.0);
        assert_approx_eq!(f32, x[3], 720.0);
    }

    #[test]
    fn test_chain() {
        let tree = tree(&["a", "b", "c"], &[("a", "b"), ("b", "c")]);
        let config = LayoutConfig::default().with_direction(Direction::LeftToRight);
        let pos = EnhancedLayout::new().place(&tree, &config);

        for p in &pos {
            assert_approx_eq!(f32, p.y, 0.0);
        }
        assert_approx_eq!(f32, pos[1].x, 220.0);
        assert_approx_eq!(f32, pos[2].x, 440.0);
    }

    #[test]
    fn test_unreachable_nodes_at_origin() {
        let tree = tree(&["a", "b", "c", "stray"], &[("a", "b"), ("a", "c")]);
        let pos = EnhancedLayout::new().place(&tree, &LayoutConfig::default());
        assert_eq!(pos[3], Point::default());
        assert_approx_eq!(f32, pos[0].x, 0.0);
    }
}
