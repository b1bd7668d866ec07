//! Workflow scanner
//!
//! Parses a workflow document, detects which of the two supported shapes it uses and
//! extracts every external resource it depends on:
//! - UI graph form: `{"nodes": [{"type": ..., "widgets_values": [...]}, ...]}`
//! - API execution form: `{"<id>": {"class_type": ..., "inputs": {...}}, ...}`
//!
//! Custom node types become `is_node = true` items, model file references become
//! `is_node = false` items. Core node types are filtered through a [`CoreNodePolicy`].

use std::collections::HashSet;

use serde_json::Value;
use tracing::{debug, trace};

use crate::domain::ScannedItem;
use crate::error::{Result, workflow};

mod execution;
pub mod extensions;
mod graph;
pub mod policy;

pub use extensions::{MODEL_EXTENSIONS, has_model_extension};
pub use policy::{CoreNodeList, CoreNodePolicy};

/// Structural shape of a workflow document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowShape {
    /// Editor export with an ordered `nodes` list
    Graph,
    /// API prompt: mapping of node id to node record
    Execution,
}

/// Detect the document shape, `None` when it matches neither
pub fn detect_shape(document: &Value) -> Option<WorkflowShape> {
    let object = document.as_object()?;

    if object.get("nodes").is_some_and(Value::is_array) {
        return Some(WorkflowShape::Graph);
    }

    let has_execution_nodes = object
        .values()
        .any(|node| node.get("class_type").is_some_and(Value::is_string));
    has_execution_nodes.then_some(WorkflowShape::Execution)
}

/// Scan a workflow with the built-in core node policy
///
/// # Errors
///
/// Returns `NodefetchError::WorkflowParse` if the document is not well-formed JSON
/// or its top level is not an object.
pub fn scan(document: &str) -> Result<Vec<ScannedItem>> {
    scan_with(document, &CoreNodeList::builtin())
}

/// Scan a workflow with a caller-supplied core node policy
///
/// An empty result is not an error here; callers decide how to report it.
///
/// # Errors
///
/// Returns `NodefetchError::WorkflowParse` if the document is not well-formed JSON
/// or its top level is not an object.
pub fn scan_with(document: &str, policy: &dyn CoreNodePolicy) -> Result<Vec<ScannedItem>> {
    let value: Value =
        serde_json::from_str(document).map_err(|e| workflow::parse_failed(e.to_string()))?;

    if !value.is_object() {
        return Err(workflow::parse_failed(
            "expected a JSON object at the top level",
        ));
    }

    let mut collector = Collector::new(policy);
    match detect_shape(&value) {
        Some(WorkflowShape::Graph) => {
            debug!("Detected graph-form workflow");
            graph::extract(&value, &mut collector);
        }
        Some(WorkflowShape::Execution) => {
            debug!("Detected execution-form workflow");
            execution::extract(&value, &mut collector);
        }
        None => debug!("Workflow matches neither supported shape"),
    }

    let items = collector.into_items();
    debug!(count = items.len(), "Scan complete");
    Ok(items)
}

/// Deduplicating sink shared by both shape extractors
struct Collector<'a> {
    policy: &'a dyn CoreNodePolicy,
    seen: HashSet<String>,
    items: Vec<ScannedItem>,
}

impl<'a> Collector<'a> {
    fn new(policy: &'a dyn CoreNodePolicy) -> Self {
        Self {
            policy,
            seen: HashSet::new(),
            items: Vec::new(),
        }
    }

    /// Record a node type unless the policy says it is core
    fn node_type(&mut self, node_type: &str) {
        let name = node_type.trim();
        if self.policy.is_core(name) {
            trace!(node_type = name, "Skipping core node");
            return;
        }
        self.push(name, true);
    }

    /// Record a model file reference
    fn file(&mut self, file_name: &str) {
        self.push(file_name.trim(), false);
    }

    /// First occurrence wins; later duplicates are dropped
    fn push(&mut self, name: &str, is_node: bool) {
        if name.is_empty() || self.seen.contains(name) {
            return;
        }
        trace!(name, is_node, "Found resource");
        self.seen.insert(name.to_string());
        self.items.push(ScannedItem::new(name, is_node));
    }

    fn into_items(self) -> Vec<ScannedItem> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn names(items: &[ScannedItem]) -> Vec<(&str, bool)> {
        items.iter().map(|i| (i.raw_name(), i.is_node())).collect()
    }

    #[test]
    fn test_detect_graph_shape() {
        let doc = json!({"last_node_id": 3, "nodes": []});
        assert_eq!(detect_shape(&doc), Some(WorkflowShape::Graph));
    }

    #[test]
    fn test_detect_execution_shape() {
        let doc = json!({"3": {"class_type": "KSampler", "inputs": {}}});
        assert_eq!(detect_shape(&doc), Some(WorkflowShape::Execution));
    }

    #[test]
    fn test_detect_neither() {
        assert_eq!(detect_shape(&json!({"foo": 1})), None);
        assert_eq!(detect_shape(&json!([1, 2])), None);
    }

    #[test]
    fn test_malformed_document_is_parse_error() {
        let result = scan("{\"nodes\": [");
        assert!(matches!(
            result.unwrap_err(),
            crate::error::NodefetchError::WorkflowParse { .. }
        ));
    }

    #[test]
    fn test_top_level_array_is_parse_error() {
        let result = scan("[1, 2, 3]");
        assert!(matches!(
            result.unwrap_err(),
            crate::error::NodefetchError::WorkflowParse { .. }
        ));
    }

    #[test]
    fn test_unrecognized_object_yields_no_items() {
        let items = scan(r#"{"version": 1}"#).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_execution_scenario() {
        let doc = r#"{"4":{"class_type":"CheckpointLoaderSimple","inputs":{"ckpt_name":"v1-5-pruned.ckpt"}}}"#;
        let items = scan(doc).unwrap();
        assert_eq!(names(&items), vec![("v1-5-pruned.ckpt", false)]);
    }

    #[test]
    fn test_denylisted_node_excluded_in_both_shapes() {
        let graph = r#"{"nodes":[{"id":1,"type":"KSampler","widgets_values":[42,"fixed",20]}]}"#;
        let execution = r#"{"1":{"class_type":"KSampler","inputs":{"seed":42}}}"#;
        assert!(scan(graph).unwrap().is_empty());
        assert!(scan(execution).unwrap().is_empty());
    }

    #[test]
    fn test_names_are_trimmed_and_deduplicated() {
        let doc = r#"{
            "1": {"class_type": "IPAdapterApply", "inputs": {"lora_name": " style.safetensors "}},
            "2": {"class_type": " IPAdapterApply ", "inputs": {"model": "style.safetensors"}}
        }"#;
        let items = scan(doc).unwrap();
        assert_eq!(
            names(&items),
            vec![("IPAdapterApply", true), ("style.safetensors", false)]
        );
    }

    #[test]
    fn test_custom_policy_is_used() {
        let doc = r#"{"1":{"class_type":"KSampler","inputs":{}},"2":{"class_type":"MyNode","inputs":{}}}"#;
        let nothing_is_core = |_: &str| false;
        let items = scan_with(doc, &nothing_is_core).unwrap();
        assert_eq!(names(&items), vec![("KSampler", true), ("MyNode", true)]);
    }

    #[test]
    fn test_no_duplicate_raw_names_across_kinds() {
        // A node type and a file reference sharing the same literal collapse to one item
        let doc = r#"{
            "1": {"class_type": "weird.pt", "inputs": {}},
            "2": {"class_type": "Other", "inputs": {"x": "weird.pt"}}
        }"#;
        let items = scan(doc).unwrap();
        let mut seen = HashSet::new();
        assert!(items.iter().all(|i| seen.insert(i.raw_name().to_string())));
        assert_eq!(items[0].raw_name(), "weird.pt");
        assert!(items[0].is_node());
    }
}
