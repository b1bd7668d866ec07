//! Graph-form extraction
//!
//! Each entry of `nodes` carries a `type` and an optional `widgets_values` list holding
//! the literal widget values; model files show up there as plain filename strings.

use serde_json::Value;

use super::{Collector, has_model_extension};

pub(super) fn extract(document: &Value, collector: &mut Collector<'_>) {
    let Some(nodes) = document.get("nodes").and_then(Value::as_array) else {
        return;
    };

    for node in nodes {
        if let Some(node_type) = node.get("type").and_then(Value::as_str) {
            collector.node_type(node_type);
        }

        match node.get("widgets_values") {
            Some(Value::Array(values)) => collect_files(values.iter(), collector),
            // Some custom nodes serialize their widgets as a name -> value object
            Some(Value::Object(values)) => collect_files(values.values(), collector),
            _ => {}
        }
    }
}

fn collect_files<'v>(values: impl Iterator<Item = &'v Value>, collector: &mut Collector<'_>) {
    for value in values {
        if let Some(text) = value.as_str() {
            if has_model_extension(text) {
                collector.file(text);
            }
        }
    }
}
