//! Tree assembler.
//!
//! Converts the flat node/edge lists produced by the resolver into an arena
//! tree: one [`TreeNode`] per input node (same index as the input slice),
//! with parent/child links, depth and per-level registries.
//!
//! The tree lives only for the duration of one layout call. Nothing here is
//! cached between calls.

use std::collections::{HashMap, VecDeque};

use log::debug;

use super::edge::Edge;
use super::node::{Node, NodeId};

/// Arena entry for one input node.
#[derive(Debug, Clone, Default)]
pub struct TreeNode {
    /// Parent arena index (None for the root and unreachable nodes).
    pub parent: Option<usize>,
    /// Children in edge input order.
    pub children: Vec<usize>,
    /// Depth below the root (0 for the root and unreachable nodes).
    pub depth: u32,
    /// Whether the node was reached from the root.
    pub reachable: bool,
    /// Number of incoming edges from known, non-self sources.
    pub in_degree: u32,
}

impl TreeNode {
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Rooted tree assembled from flat node/edge lists.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    nodes: Vec<TreeNode>,
    ids: Vec<NodeId>,
    index: HashMap<NodeId, usize>,
    root: Option<usize>,
    levels: Vec<Vec<usize>>,
}

impl Tree {
    /// Assemble a tree from nodes and ownership edges.
    ///
    /// The root is the first node, in input order, with no incoming edge. If
    /// every node has a parent the first node is used. Root selection is
    /// therefore only as stable as the caller's node ordering.
    ///
    /// Edges naming unknown ids and self-loops are ignored. A node reachable
    /// through several parents (or through a cycle) is attached under the
    /// first parent that reaches it during the breadth-first walk.
    pub fn assemble<P>(nodes: &[Node<P>], edges: &[Edge]) -> Self {
        let mut tree = Tree {
            nodes: vec![TreeNode::default(); nodes.len()],
            ids: nodes.iter().map(|n| n.id.clone()).collect(),
            index: HashMap::with_capacity(nodes.len()),
            root: None,
            levels: Vec::new(),
        };

        // First occurrence wins for duplicated ids.
        for (i, node) in nodes.iter().enumerate() {
            tree.index.entry(node.id.clone()).or_insert(i);
        }

        if nodes.is_empty() {
            return tree;
        }

        let mut candidates: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
        let mut dropped = 0usize;
        for edge in edges {
            let (Some(&parent), Some(&child)) =
                (tree.index.get(&edge.source), tree.index.get(&edge.target))
            else {
                dropped += 1;
                continue;
            };
            if parent == child {
                dropped += 1;
                continue;
            }
            candidates[parent].push(child);
            tree.nodes[child].in_degree += 1;
        }
        if dropped > 0 {
            debug!(count = dropped; "Ignored edges with unknown endpoints or self-loops");
        }

        let root = tree
            .nodes
            .iter()
            .position(|n| n.in_degree == 0)
            .unwrap_or(0);
        tree.root = Some(root);

        // Breadth-first from the root; the visited flag breaks cycles and
        // multi-parent diamonds.
        let mut queue = VecDeque::from([root]);
        tree.nodes[root].reachable = true;
        while let Some(current) = queue.pop_front() {
            let depth = tree.nodes[current].depth as usize;
            if tree.levels.len() <= depth {
                tree.levels.resize_with(depth + 1, Vec::new);
            }
            tree.levels[depth].push(current);

            for &child in &candidates[current] {
                if tree.nodes[child].reachable {
                    continue;
                }
                let child_node = &mut tree.nodes[child];
                child_node.reachable = true;
                child_node.parent = Some(current);
                child_node.depth = depth as u32 + 1;
                tree.nodes[current].children.push(child);
                queue.push_back(child);
            }
        }

        tree
    }

    /// Number of arena slots (equals the input node count).
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Arena index of the root, if any node exists.
    #[inline]
    pub fn root(&self) -> Option<usize> {
        self.root
    }

    #[inline]
    pub fn node(&self, idx: usize) -> &TreeNode {
        &self.nodes[idx]
    }

    #[inline]
    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    #[inline]
    pub fn id(&self, idx: usize) -> &NodeId {
        &self.ids[idx]
    }

    /// Resolve an id to its arena index.
    pub fn index_of(&self, id: &NodeId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Reachable nodes grouped by depth, each level in breadth-first order.
    #[inline]
    pub fn levels(&self) -> &[Vec<usize>] {
        &self.levels
    }

    #[inline]
    pub fn children(&self, idx: usize) -> &[usize] {
        &self.nodes[idx].children
    }

    /// Sibling immediately to the left of `idx`, if any.
    pub fn left_sibling(&self, idx: usize) -> Option<usize> {
        let parent = self.nodes[idx].parent?;
        let siblings = &self.nodes[parent].children;
        let pos = siblings.iter().position(|&c| c == idx)?;
        pos.checked_sub(1).map(|p| siblings[p])
    }

    /// Reachable nodes in breadth-first order from the root.
    pub fn bfs(&self) -> impl Iterator<Item = usize> + '_ {
        self.levels.iter().flatten().copied()
    }

    /// Reachable nodes in preorder (parent before children, children in order).
    pub fn preorder(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let Some(root) = self.root else {
            return order;
        };
        let mut stack = vec![root];
        while let Some(v) = stack.pop() {
            order.push(v);
            stack.extend(self.nodes[v].children.iter().rev());
        }
        order
    }

    /// Every node in the subtree rooted at `idx`, `idx` first.
    pub fn descendants(&self, idx: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack = vec![idx];
        while let Some(v) = stack.pop() {
            out.push(v);
            stack.extend(self.nodes[v].children.iter().rev());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare(ids: &[&str]) -> Vec<Node<()>> {
        ids.iter().map(|&id| Node::bare(id)).collect()
    }

    #[test]
    fn test_empty_input() {
        let tree = Tree::assemble::<()>(&[], &[]);
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
        assert!(tree.levels().is_empty());
    }

    #[test]
    fn test_simple_tree() {
        let nodes = bare(&["a", "b", "c", "d"]);
        let edges = [Edge::new("a", "b"), Edge::new("a", "c"), Edge::new("b", "d")];
        let tree = Tree::assemble(&nodes, &edges);

        assert_eq!(tree.root(), Some(0));
        assert_eq!(tree.children(0), &[1, 2]);
        assert_eq!(tree.node(3).parent, Some(1));
        assert_eq!(tree.node(3).depth, 2);
        assert_eq!(tree.levels(), &[vec![0], vec![1, 2], vec![3]]);
        assert_eq!(tree.left_sibling(2), Some(1));
        assert_eq!(tree.left_sibling(1), None);
    }

    #[test]
    fn test_root_is_first_parentless_node() {
        let nodes = bare(&["child", "owner"]);
        let edges = [Edge::new("owner", "child")];
        let tree = Tree::assemble(&nodes, &edges);

        assert_eq!(tree.root(), Some(1));
        assert_eq!(tree.node(0).depth, 1);
    }

    #[test]
    fn test_all_nodes_have_parents_falls_back_to_first() {
        let nodes = bare(&["a", "b"]);
        let edges = [Edge::new("a", "b"), Edge::new("b", "a")];
        let tree = Tree::assemble(&nodes, &edges);

        assert_eq!(tree.root(), Some(0));
        // Cycle broken at the root: b is a's child, the back-edge is ignored.
        assert_eq!(tree.children(0), &[1]);
        assert!(tree.children(1).is_empty());
    }

    #[test]
    fn test_dangling_and_self_edges_ignored() {
        let nodes = bare(&["a", "b"]);
        let edges = [
            Edge::new("a", "ghost"),
            Edge::new("ghost", "b"),
            Edge::new("a", "a"),
            Edge::new("a", "b"),
        ];
        let tree = Tree::assemble(&nodes, &edges);

        assert_eq!(tree.root(), Some(0));
        assert_eq!(tree.children(0), &[1]);
        assert_eq!(tree.node(1).in_degree, 1);
    }

    #[test]
    fn test_unreachable_nodes_default_to_depth_zero() {
        let nodes = bare(&["a", "b", "orphan"]);
        let edges = [Edge::new("a", "b")];
        let tree = Tree::assemble(&nodes, &edges);

        let orphan = tree.node(2);
        assert!(!orphan.reachable);
        assert_eq!(orphan.depth, 0);
        assert_eq!(tree.bfs().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn test_second_parent_is_ignored() {
        let nodes = bare(&["r", "x", "y", "shared"]);
        let edges = [
            Edge::new("r", "x"),
            Edge::new("r", "y"),
            Edge::new("y", "shared"),
            Edge::new("x", "shared"),
        ];
        let tree = Tree::assemble(&nodes, &edges);

        // x is dequeued first, so it adopts "shared".
        assert_eq!(tree.node(3).parent, Some(1));
        assert!(tree.children(2).is_empty());
    }

    #[test]
    fn test_preorder_and_descendants() {
        let nodes = bare(&["a", "b", "c", "d", "e"]);
        let edges = [
            Edge::new("a", "b"),
            Edge::new("a", "c"),
            Edge::new("b", "d"),
            Edge::new("c", "e"),
        ];
        let tree = Tree::assemble(&nodes, &edges);

        assert_eq!(tree.preorder(), vec![0, 1, 3, 2, 4]);
        assert_eq!(tree.descendants(2), vec![2, 4]);
        assert_eq!(tree.index_of(&NodeId::from("e")), Some(4));
    }
}
