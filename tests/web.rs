//! Browser tests for the JS-facing API. Run with `wasm-pack test --headless`.

#![cfg(target_arch = "wasm32")]

use js_sys::{Array, Reflect};
use owner_tree_layout::{create_layout_engine, describe_tree, validate_tree};
use serde::Serialize;
use serde_json::json;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn js(value: serde_json::Value) -> JsValue {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap()
}

fn get(obj: &JsValue, key: &str) -> JsValue {
    Reflect::get(obj, &JsValue::from_str(key)).unwrap()
}

fn sample_nodes() -> JsValue {
    js(json!([
        { "id": "deploy", "kind": "Deployment" },
        { "id": "rs", "kind": "ReplicaSet" },
        { "id": "pod-a", "kind": "Pod" },
        { "id": "pod-b", "kind": "Pod" }
    ]))
}

fn sample_edges() -> JsValue {
    js(json!([
        { "source": "deploy", "target": "rs" },
        { "source": "rs", "target": "pod-a" },
        { "source": "rs", "target": "pod-b" }
    ]))
}

#[wasm_bindgen_test]
fn test_layout_returns_positioned_payloads() {
    let engine = create_layout_engine("reingold-tilford", JsValue::UNDEFINED).unwrap();
    assert_eq!(engine.strategy(), "reingold-tilford");

    let result = engine.layout(sample_nodes(), sample_edges()).unwrap();
    let nodes = Array::from(&get(&result, "nodes"));
    assert_eq!(nodes.length(), 4);

    let root = nodes.get(0);
    assert_eq!(get(&root, "kind").as_string().as_deref(), Some("Deployment"));
    assert_eq!(get(&root, "isRoot").as_bool(), Some(true));

    let pod_a = get(&nodes.get(2), "x").as_f64().unwrap();
    let pod_b = get(&nodes.get(3), "x").as_f64().unwrap();
    assert_eq!(pod_b - pod_a, 360.0);

    assert_eq!(Array::from(&get(&result, "edges")).length(), 3);
}

#[wasm_bindgen_test]
fn test_unknown_strategy_falls_back() {
    let engine = create_layout_engine("radial", JsValue::NULL).unwrap();
    assert_eq!(engine.strategy(), "hierarchical");
}

#[wasm_bindgen_test]
fn test_invalid_config_is_an_error() {
    let config = js(json!({ "nodeWidth": -1 }));
    assert!(create_layout_engine("enhanced", config).is_err());
}

#[wasm_bindgen_test]
fn test_layout_positions_interleaved() {
    let config = js(json!({ "direction": "LR" }));
    let engine = create_layout_engine("hierarchical", config).unwrap();
    let positions = engine
        .layout_positions(sample_nodes(), sample_edges())
        .unwrap()
        .to_vec();

    assert_eq!(positions.len(), 8);
    // Left to right: the root sits at x = 0, the pods two levels over.
    assert_eq!(positions[0], 0.0);
    assert_eq!(positions[4], positions[6]);
    assert_eq!(positions[4], 2.0 * 220.0);
}

#[wasm_bindgen_test]
fn test_layout_nested() {
    let engine = create_layout_engine("enhanced", JsValue::UNDEFINED).unwrap();
    let tree = js(json!({
        "id": "deploy",
        "children": [
            { "id": "rs", "children": [{ "id": "pod" }] }
        ]
    }));
    let result = engine.layout_nested(tree).unwrap();
    let nodes = Array::from(&get(&result, "nodes"));

    assert_eq!(nodes.length(), 3);
    assert_eq!(get(&nodes.get(2), "level").as_f64(), Some(2.0));
}

#[wasm_bindgen_test]
fn test_validate_and_describe() {
    let report = validate_tree(sample_nodes(), sample_edges()).unwrap();
    assert_eq!(Array::from(&get(&report, "roots")).length(), 1);
    assert!(get(&report, "cycle").is_null());

    let description = describe_tree(sample_nodes(), sample_edges()).unwrap();
    assert_eq!(
        get(&description, "outline").as_string().as_deref(),
        Some("deploy\n  rs\n    pod-a\n    pod-b\n")
    );
    assert_eq!(get(&get(&description, "stats"), "depth").as_f64(), Some(3.0));
}
