//! Owner Tree Layout - WASM Module
//!
//! Computes deterministic, non-overlapping coordinates for ownership trees
//! (Deployments owning ReplicaSets owning Pods, and so on) so the frontend
//! can draw them without any geometry of its own. Compiled to WebAssembly
//! and exposed to JavaScript via wasm-bindgen; the same API is usable from
//! Rust directly.
//!
//! # Architecture
//!
//! - `graph`: input records, the per-call arena tree, validation and stats
//! - `layout`: the three placement strategies and the engine facade
//! - `logging`: `log` backend for the browser console
//!
//! # Example
//!
//! ```
//! use owner_tree_layout::graph::{Edge, Node};
//! use owner_tree_layout::layout::{LayoutConfig, create_layout_engine};
//!
//! let nodes = vec![Node::bare("deploy"), Node::bare("rs-1"), Node::bare("rs-2")];
//! let edges = vec![Edge::new("deploy", "rs-1"), Edge::new("deploy", "rs-2")];
//!
//! let engine = create_layout_engine("reingold-tilford", LayoutConfig::default())?;
//! let result = engine.layout(&nodes, &edges);
//!
//! assert!(result.nodes[0].is_root);
//! assert_eq!(result.nodes[2].x - result.nodes[1].x, 360.0);
//! # Ok::<(), owner_tree_layout::error::LayoutError>(())
//! ```

use js_sys::Float32Array;
use log::LevelFilter;
use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

pub mod error;
pub mod graph;
pub mod layout;
pub mod logging;

use error::LayoutError;
use graph::{Edge, NestedNode, Node, Tree, TreeStats};
use layout::{LayoutConfig, LayoutEngine};

/// Payload type on the JS side: every node field other than `id`.
type Payload = serde_json::Map<String, serde_json::Value>;

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logging::init(LevelFilter::Warn);
}

/// Change the console log level ("off", "error", "warn", "info", "debug",
/// "trace"). Unrecognised names are ignored.
#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) {
    if let Ok(filter) = level.parse::<LevelFilter>() {
        logging::init(filter);
    }
}

fn from_js<T: DeserializeOwned>(value: JsValue) -> Result<T, LayoutError> {
    Ok(serde_wasm_bindgen::from_value(value)?)
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, LayoutError> {
    // Plain objects rather than ES Maps for the payload maps.
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    Ok(value.serialize(&serializer)?)
}

/// Parse a JS config object; `undefined`/`null` mean defaults.
fn config_from_js(config: JsValue) -> Result<LayoutConfig, LayoutError> {
    if config.is_undefined() || config.is_null() {
        Ok(LayoutConfig::default())
    } else {
        from_js(config)
    }
}

fn graph_from_js(nodes: JsValue, edges: JsValue) -> Result<(Vec<Node<Payload>>, Vec<Edge>), LayoutError> {
    let edges = if edges.is_undefined() || edges.is_null() {
        Vec::new()
    } else {
        from_js(edges)?
    };
    Ok((from_js(nodes)?, edges))
}

/// Layout engine handle exposed to JavaScript.
///
/// Holds only the strategy choice and configuration; every `layout` call is
/// independent.
#[wasm_bindgen]
pub struct TreeLayoutEngine {
    engine: LayoutEngine,
}

/// Create a layout engine.
///
/// # Arguments
///
/// * `strategy` - "hierarchical", "reingold-tilford" or "enhanced"; unknown
///   names fall back to "hierarchical"
/// * `config` - `{ nodeWidth, nodeHeight, horizontalSpacing, verticalSpacing,
///   direction: "TB" | "LR", edgeStyle }`, any field optional
#[wasm_bindgen(js_name = createLayoutEngine)]
pub fn create_layout_engine(strategy: &str, config: JsValue) -> Result<TreeLayoutEngine, JsError> {
    let config = config_from_js(config)?;
    Ok(TreeLayoutEngine {
        engine: layout::create_layout_engine(strategy, config)?,
    })
}

#[wasm_bindgen]
impl TreeLayoutEngine {
    /// Name of the strategy actually in use (after fallback).
    #[wasm_bindgen(getter)]
    pub fn strategy(&self) -> String {
        self.engine.kind().name().to_owned()
    }

    /// Lay out `nodes` (`[{ id, ...payload }]`) connected by `edges`
    /// (`[{ source, target }]`).
    ///
    /// Returns `{ nodes, edges, bounds }` with `x`, `y`, `level`, `isRoot`
    /// merged into every node.
    pub fn layout(&self, nodes: JsValue, edges: JsValue) -> Result<JsValue, JsError> {
        let (nodes, edges) = graph_from_js(nodes, edges)?;
        let result = self.engine.layout_owned(nodes, &edges);
        Ok(to_js(&result)?)
    }

    /// Lay out a nested tree (`{ id, ...payload, children: [...] }`).
    #[wasm_bindgen(js_name = layoutNested)]
    pub fn layout_nested(&self, tree: JsValue) -> Result<JsValue, JsError> {
        let root: NestedNode<Payload> = from_js(tree)?;
        let result = self.engine.layout_nested(root);
        Ok(to_js(&result)?)
    }

    /// Positions only, as a Float32Array `[x0, y0, x1, y1, ...]` in node
    /// input order.
    #[wasm_bindgen(js_name = layoutPositions)]
    pub fn layout_positions(&self, nodes: JsValue, edges: JsValue) -> Result<Float32Array, JsError> {
        let (nodes, edges) = graph_from_js(nodes, edges)?;
        let positions: Vec<f32> = self
            .engine
            .positions(&nodes, &edges)
            .into_iter()
            .flat_map(|p| [p.x, p.y])
            .collect();
        Ok(Float32Array::from(&positions[..]))
    }
}

/// Check whether `nodes`/`edges` form exactly one rooted tree.
///
/// Returns `{ nodeCount, roots, duplicateIds, danglingEdges, cycle,
/// unreachable }`.
#[wasm_bindgen(js_name = validateTree)]
pub fn validate_tree(nodes: JsValue, edges: JsValue) -> Result<JsValue, JsError> {
    let (nodes, edges) = graph_from_js(nodes, edges)?;
    let report = graph::validate::inspect(&nodes, &edges);
    Ok(to_js(&report)?)
}

#[derive(Serialize)]
struct TreeDescription {
    stats: TreeStats,
    outline: String,
}

/// Summary statistics and an indented text outline of the tree.
#[wasm_bindgen(js_name = describeTree)]
pub fn describe_tree(nodes: JsValue, edges: JsValue) -> Result<JsValue, JsError> {
    let (nodes, edges) = graph_from_js(nodes, edges)?;
    let tree = Tree::assemble(&nodes, &edges);
    let description = TreeDescription {
        stats: TreeStats::of(&tree),
        outline: graph::stats::outline(&tree, |i| tree.id(i).to_string()),
    };
    Ok(to_js(&description)?)
}
