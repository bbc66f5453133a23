//! Strict tree validation.
//!
//! The layout path tolerates malformed input. Callers that want to surface
//! problems (a resolver debugging view, tests) can run [`inspect`] first and
//! turn the report into a [`TreeError`].

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::algo::toposort;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::Bfs;
use serde::Serialize;

use super::edge::Edge;
use super::node::{Node, NodeId};
use crate::error::TreeError;

/// Findings from one validation pass. Every list is in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeReport {
    pub node_count: usize,
    /// Nodes without an incoming edge (self-loops do not count).
    pub roots: Vec<NodeId>,
    pub duplicate_ids: Vec<NodeId>,
    pub dangling_edges: Vec<Edge>,
    /// Some node that lies on an ownership cycle.
    pub cycle: Option<NodeId>,
    /// Nodes the first root cannot reach.
    pub unreachable: Vec<NodeId>,
}

impl TreeReport {
    /// True when the input forms exactly one rooted, acyclic, connected tree.
    pub fn is_tree(&self) -> bool {
        self.node_count > 0
            && self.roots.len() == 1
            && self.duplicate_ids.is_empty()
            && self.dangling_edges.is_empty()
            && self.cycle.is_none()
            && self.unreachable.is_empty()
    }

    /// Convert to the first error found, most fundamental problem first.
    pub fn into_result(self) -> Result<(), TreeError> {
        if self.node_count == 0 {
            return Err(TreeError::Empty);
        }
        if let Some(id) = self.duplicate_ids.into_iter().next() {
            return Err(TreeError::DuplicateId(id));
        }
        if let Some(edge) = self.dangling_edges.into_iter().next() {
            return Err(TreeError::DanglingEdge {
                owner: edge.source,
                owned: edge.target,
            });
        }
        if let Some(id) = self.cycle {
            return Err(TreeError::Cycle(id));
        }
        if self.roots.len() != 1 {
            return Err(TreeError::RootCount(self.roots));
        }
        if let Some(id) = self.unreachable.into_iter().next() {
            return Err(TreeError::Unreachable(id));
        }
        Ok(())
    }
}

/// Inspect nodes and edges for everything that keeps them from being a tree.
pub fn inspect<P>(nodes: &[Node<P>], edges: &[Edge]) -> TreeReport {
    let mut report = TreeReport {
        node_count: nodes.len(),
        ..Default::default()
    };

    let mut graph: StableDiGraph<usize, ()> = StableDiGraph::with_capacity(nodes.len(), edges.len());
    let mut by_id: HashMap<&NodeId, NodeIndex> = HashMap::with_capacity(nodes.len());
    let mut order: Vec<NodeIndex> = Vec::with_capacity(nodes.len());

    for (i, node) in nodes.iter().enumerate() {
        if by_id.contains_key(&node.id) {
            report.duplicate_ids.push(node.id.clone());
            continue;
        }
        let idx = graph.add_node(i);
        by_id.insert(&node.id, idx);
        order.push(idx);
    }

    for edge in edges {
        match (by_id.get(&edge.source), by_id.get(&edge.target)) {
            (Some(&from), Some(&to)) => {
                graph.add_edge(from, to, ());
            }
            _ => report.dangling_edges.push(edge.clone()),
        }
    }

    let id_of = |idx: NodeIndex| nodes[graph[idx]].id.clone();

    report.roots = order
        .iter()
        .copied()
        .filter(|&n| {
            graph
                .neighbors_directed(n, Direction::Incoming)
                .all(|parent| parent == n)
        })
        .map(id_of)
        .collect();

    if let Err(cycle) = toposort(&graph, None) {
        report.cycle = Some(id_of(cycle.node_id()));
    }

    let start = report
        .roots
        .first()
        .and_then(|id| by_id.get(id).copied())
        .or_else(|| order.first().copied());
    if let Some(start) = start {
        let mut seen = vec![false; nodes.len()];
        let mut bfs = Bfs::new(&graph, start);
        while let Some(n) = bfs.next(&graph) {
            seen[graph[n]] = true;
        }
        report.unreachable = order
            .iter()
            .copied()
            .filter(|&n| !seen[graph[n]])
            .map(id_of)
            .collect();
    }

    report
}

/// Strict validation: `Ok(())` only for a single well-formed tree.
pub fn validate<P>(nodes: &[Node<P>], edges: &[Edge]) -> Result<(), TreeError> {
    inspect(nodes, edges).into_result()
}
