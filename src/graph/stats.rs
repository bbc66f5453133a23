//! Tree statistics and a plain-text outline for debugging.

use std::fmt::Write as _;

use serde::Serialize;

use super::tree::Tree;

/// Summary numbers for an assembled tree. Only reachable nodes are counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeStats {
    pub node_count: usize,
    /// Number of levels; a lone root has depth 1, an empty tree 0.
    pub depth: usize,
    pub leaf_count: usize,
    /// Size of the most populated level.
    pub max_level_width: usize,
}

impl TreeStats {
    pub fn of(tree: &Tree) -> Self {
        let levels = tree.levels();
        Self {
            node_count: levels.iter().map(Vec::len).sum(),
            depth: levels.len(),
            leaf_count: tree.bfs().filter(|&i| tree.node(i).is_leaf()).count(),
            max_level_width: levels.iter().map(Vec::len).max().unwrap_or(0),
        }
    }
}

/// Indented outline of the reachable tree, two spaces per level.
///
/// `label` renders one arena index; the node id is a reasonable default.
pub fn outline(tree: &Tree, label: impl Fn(usize) -> String) -> String {
    let mut out = String::new();
    for idx in tree.preorder() {
        let indent = tree.node(idx).depth as usize * 2;
        let _ = writeln!(out, "{:indent$}{}", "", label(idx));
    }
    out
}
