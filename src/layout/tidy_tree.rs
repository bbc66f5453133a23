//! Reingold-Tilford tidy tree layout with Buchheim's linear-time apportion.
//!
//! Implements the algorithm from "Improving Walker's Algorithm to Run in
//! Linear Time" (Buchheim, Junger, Leipert, 2002) for arbitrary m-ary trees.
//! Parents are centred over their children, sibling subtrees are pushed
//! apart just far enough that no two nodes on one level come closer than
//! `node_width + horizontal_spacing`, and the space freed by a shift is
//! spread evenly over the smaller subtrees in between.
//!
//! # Algorithm Overview
//!
//! 1. **Initialize (pre-order):** sibling numbers, `ancestor = self`, empty
//!    threads and zeroed modifiers.
//! 2. **First walk (post-order):** preliminary x per node. Leaves sit one
//!    separation right of their left sibling; internal nodes sit at the
//!    midpoint of their children, then re-anchor next to their left sibling
//!    and record the difference as a modifier for the whole subtree.
//! 3. **Apportion:** compares the left contour of the new subtree with the
//!    right contour of everything to its left, following threads where a
//!    contour runs out of children. Overlaps are resolved by moving the new
//!    subtree right; `change`/`shift` carry the proportional moves of the
//!    subtrees in between until `execute_shifts` applies them.
//! 4. **Second walk (pre-order):** final x = prelim + sum of ancestor
//!    modifiers.

use super::{LayoutConfig, Point, Strategy};
use crate::graph::Tree;

/// Per-node working data. Lives only inside one [`TidyTreeLayout::place`]
/// call; indices are arena slots of the tree being laid out.
#[derive(Debug, Clone)]
struct WalkNode {
    /// Preliminary x-coordinate (from first walk).
    prelim: f32,
    /// Offset applied to every descendant in the second walk.
    modifier: f32,
    /// Contour link for nodes that have no children of their own.
    thread: Option<usize>,
    /// Highest node of the left contour this node's subtree was compared with.
    ancestor: usize,
    /// Accumulated change of shift per subtree (execute_shifts).
    change: f32,
    /// Pending shift for this subtree (execute_shifts).
    shift: f32,
    /// Left-to-right index among siblings.
    number: usize,
    left_sibling: Option<usize>,
}

/// Walk state for one layout call.
struct Walk<'a> {
    tree: &'a Tree,
    nodes: Vec<WalkNode>,
    separation: f32,
}

impl<'a> Walk<'a> {
    /// Initialization pass: returns the walk state and the preorder sequence
    /// reused by the second walk.
    fn new(tree: &'a Tree, separation: f32) -> (Self, Vec<usize>) {
        let nodes = (0..tree.len())
            .map(|v| WalkNode {
                prelim: 0.0,
                modifier: 0.0,
                thread: None,
                ancestor: v,
                change: 0.0,
                shift: 0.0,
                number: 0,
                left_sibling: None,
            })
            .collect();
        let mut walk = Self {
            tree,
            nodes,
            separation,
        };

        let preorder = tree.preorder();
        for &v in &preorder {
            let mut previous = None;
            for (number, &child) in tree.children(v).iter().enumerate() {
                walk.nodes[child].number = number;
                walk.nodes[child].left_sibling = previous;
                previous = Some(child);
            }
        }
        (walk, preorder)
    }

    fn first_walk(&mut self, v: usize) {
        let tree = self.tree;
        let children = tree.children(v);
        let left_sibling = self.nodes[v].left_sibling;

        let (Some(&first), Some(&last)) = (children.first(), children.last()) else {
            self.nodes[v].prelim = match left_sibling {
                Some(w) => self.nodes[w].prelim + self.separation,
                None => 0.0,
            };
            return;
        };

        let mut default_ancestor = first;
        for &child in children {
            self.first_walk(child);
            default_ancestor = self.apportion(child, default_ancestor);
        }
        self.execute_shifts(v);

        let midpoint = (self.nodes[first].prelim + self.nodes[last].prelim) / 2.0;
        match left_sibling {
            Some(w) => {
                let prelim = self.nodes[w].prelim + self.separation;
                self.nodes[v].prelim = prelim;
                self.nodes[v].modifier = prelim - midpoint;
            }
            None => self.nodes[v].prelim = midpoint,
        }
    }

    /// Next node on the left contour below `v`.
    fn next_left(&self, v: usize) -> Option<usize> {
        self.tree.children(v).first().copied().or(self.nodes[v].thread)
    }

    /// Next node on the right contour below `v`.
    fn next_right(&self, v: usize) -> Option<usize> {
        self.tree.children(v).last().copied().or(self.nodes[v].thread)
    }

    /// Push `v`'s subtree clear of every subtree to its left.
    ///
    /// Naming follows the paper: `i`/`o` are inside/outside contours, `p`/`m`
    /// are the right (plus) and left (minus) side of the gap.
    fn apportion(&mut self, v: usize, mut default_ancestor: usize) -> usize {
        let Some(w) = self.nodes[v].left_sibling else {
            return default_ancestor;
        };
        let leftmost = match self.tree.node(v).parent {
            Some(parent) => self.tree.children(parent)[0],
            None => return default_ancestor,
        };

        let (mut vip, mut vop) = (v, v);
        let (mut vim, mut vom) = (w, leftmost);
        let mut sip = self.nodes[vip].modifier;
        let mut sop = self.nodes[vop].modifier;
        let mut sim = self.nodes[vim].modifier;
        let mut som = self.nodes[vom].modifier;

        while let (Some(next_im), Some(next_ip)) = (self.next_right(vim), self.next_left(vip)) {
            vim = next_im;
            vip = next_ip;
            if let Some(next) = self.next_left(vom) {
                vom = next;
            }
            if let Some(next) = self.next_right(vop) {
                vop = next;
            }
            self.nodes[vop].ancestor = v;

            let shift = (self.nodes[vim].prelim + sim) - (self.nodes[vip].prelim + sip)
                + self.separation;
            if shift > 0.0 {
                let ancestor = self.ancestor(vim, v, default_ancestor);
                self.move_subtree(ancestor, v, shift);
                sip += shift;
                sop += shift;
            }

            sim += self.nodes[vim].modifier;
            sip += self.nodes[vip].modifier;
            som += self.nodes[vom].modifier;
            sop += self.nodes[vop].modifier;
        }

        if let Some(next) = self.next_right(vim) {
            if self.next_right(vop).is_none() {
                self.nodes[vop].thread = Some(next);
                self.nodes[vop].modifier += sim - sop;
            }
        }
        if let Some(next) = self.next_left(vip) {
            if self.next_left(vom).is_none() {
                self.nodes[vom].thread = Some(next);
                self.nodes[vom].modifier += sip - som;
                default_ancestor = v;
            }
        }

        default_ancestor
    }

    /// The sibling of `v` whose subtree contains `vim`, when known; the
    /// default ancestor otherwise.
    fn ancestor(&self, vim: usize, v: usize, default_ancestor: usize) -> usize {
        let candidate = self.nodes[vim].ancestor;
        let parent = self.tree.node(v).parent;
        if parent.is_some() && self.tree.node(candidate).parent == parent {
            candidate
        } else {
            default_ancestor
        }
    }

    /// Shift subtree `wr` right and record how the move spreads over the
    /// siblings between `wl` and `wr`.
    fn move_subtree(&mut self, wl: usize, wr: usize, shift: f32) {
        let subtrees = self.nodes[wr].number.saturating_sub(self.nodes[wl].number).max(1) as f32;
        let per_subtree = shift / subtrees;

        self.nodes[wr].change -= per_subtree;
        self.nodes[wr].shift += shift;
        self.nodes[wl].change += per_subtree;
        self.nodes[wr].prelim += shift;
        self.nodes[wr].modifier += shift;
    }

    /// Apply the shifts accumulated by `move_subtree` to the children of `v`.
    fn execute_shifts(&mut self, v: usize) {
        let tree = self.tree;
        let mut shift = 0.0f32;
        let mut change = 0.0f32;

        for &child in tree.children(v).iter().rev() {
            let node = &mut self.nodes[child];
            node.prelim += shift;
            node.modifier += shift;
            change += node.change;
            shift += node.shift + change;
        }
    }

    /// Sum modifiers from the root down. Parents precede children in
    /// `preorder`, so one forward pass is enough.
    fn second_walk(&self, preorder: &[usize]) -> Vec<f32> {
        let mut modifier_sum = vec![0.0f32; self.nodes.len()];
        let mut final_x = vec![0.0f32; self.nodes.len()];

        for &v in preorder {
            final_x[v] = self.nodes[v].prelim + modifier_sum[v];
            let inherited = modifier_sum[v] + self.nodes[v].modifier;
            for &child in self.tree.children(v) {
                modifier_sum[child] = inherited;
            }
        }
        final_x
    }
}

/// The tidy tree layout strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct TidyTreeLayout;

impl TidyTreeLayout {
    pub fn new() -> Self {
        Self
    }

    /// Primary-axis coordinates for every arena slot (0 for unreachable
    /// nodes), before projection onto the canvas.
    pub fn primary_coordinates(&self, tree: &Tree, separation: f32) -> Vec<f32> {
        let Some(root) = tree.root() else {
            return Vec::new();
        };
        let (mut walk, preorder) = Walk::new(tree, separation);
        walk.first_walk(root);
        walk.second_walk(&preorder)
    }
}

impl Strategy for TidyTreeLayout {
    fn place(&self, tree: &Tree, config: &LayoutConfig) -> Vec<Point> {
        let final_x = self.primary_coordinates(tree, config.separation());

        (0..tree.len())
            .map(|v| {
                let node = tree.node(v);
                if node.reachable {
                    config.project(node.depth, final_x[v])
                } else {
                    Point::default()
                }
            })
            .collect()
    }
}
