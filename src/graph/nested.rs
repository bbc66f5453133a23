//! Flattening of nested trees.
//!
//! The service layer hands out trees as nested records
//! (`{ id, ...payload, children: [...] }`). The engine works on flat lists,
//! so this module unrolls a nested tree into nodes and ownership edges.

use serde::{Deserialize, Serialize};

use super::edge::Edge;
use super::node::{Node, NodeId};

/// A node with its children inlined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestedNode<P> {
    pub id: NodeId,
    #[serde(default = "Vec::new")]
    pub children: Vec<NestedNode<P>>,
    #[serde(flatten)]
    pub data: P,
}

impl<P> NestedNode<P> {
    pub fn new(id: impl Into<NodeId>, data: P, children: Vec<NestedNode<P>>) -> Self {
        Self {
            id: id.into(),
            children,
            data,
        }
    }
}

/// Unroll a nested tree into preorder nodes and parent-to-child edges.
///
/// Preorder keeps the root first, so the assembler picks it as root even if
/// the payload order is otherwise arbitrary.
pub fn flatten<P>(root: NestedNode<P>) -> (Vec<Node<P>>, Vec<Edge>) {
    let mut nodes = Vec::new();
    let mut edges = Vec::new();
    let mut stack = vec![(None, root)];

    while let Some((parent, nested)) = stack.pop() {
        let NestedNode { id, children, data } = nested;
        if let Some(parent) = parent {
            edges.push(Edge::new(parent, id.clone()));
        }
        for child in children.into_iter().rev() {
            stack.push((Some(id.clone()), child));
        }
        nodes.push(Node { id, data });
    }

    (nodes, edges)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_preorder() {
        let tree = NestedNode::new(
            "cluster",
            (),
            vec![
                NestedNode::new("comp-a", (), vec![NestedNode::new("pod-a", (), vec![])]),
                NestedNode::new("comp-b", (), vec![]),
            ],
        );

        let (nodes, edges) = flatten(tree);
        let ids: Vec<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["cluster", "comp-a", "pod-a", "comp-b"]);
        assert_eq!(
            edges,
            vec![
                Edge::new("cluster", "comp-a"),
                Edge::new("comp-a", "pod-a"),
                Edge::new("cluster", "comp-b"),
            ]
        );
    }

    #[test]
    fn test_deserialize_nested_json() {
        let json = r#"{
            "id": "cluster",
            "kind": "Cluster",
            "children": [{ "id": "pod", "kind": "Pod" }]
        }"#;
        let tree: NestedNode<serde_json::Map<String, serde_json::Value>> =
            serde_json::from_str(json).unwrap();

        assert_eq!(tree.children.len(), 1);
        assert!(tree.children[0].children.is_empty());
        assert_eq!(tree.data.get("kind"), Some(&serde_json::json!("Cluster")));
        assert!(!tree.data.contains_key("children"));
    }
}
