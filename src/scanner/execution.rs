//! Execution-form extraction
//!
//! Each node record has a `class_type` and an `inputs` mapping. A string input is a
//! file reference when its key is a well-known file parameter or when the value itself
//! looks like a model file, whatever the key is called.

use serde_json::Value;

use super::{Collector, has_model_extension};

/// Input names that always hold a file reference
const FILE_INPUT_KEYS: &[&str] = &[
    "ckpt_name",
    "checkpoint",
    "lora_name",
    "lora",
    "vae_name",
    "vae",
    "control_net_name",
    "controlnet",
    "upscale_model",
    "upscaler",
    "model_name",
    "model",
    "unet_name",
    "clip_name",
    "embedding",
    "image",
];

pub(super) fn extract(document: &Value, collector: &mut Collector<'_>) {
    let Some(nodes) = document.as_object() else {
        return;
    };

    for node in nodes.values() {
        let Some(class_type) = node.get("class_type").and_then(Value::as_str) else {
            continue;
        };
        collector.node_type(class_type);

        let Some(inputs) = node.get("inputs").and_then(Value::as_object) else {
            continue;
        };
        for (key, value) in inputs {
            // Linked inputs are [node_id, slot] arrays, only literals matter
            let Some(text) = value.as_str() else {
                continue;
            };
            if FILE_INPUT_KEYS.contains(&key.as_str()) || has_model_extension(text) {
                collector.file(text);
            }
        }
    }
}
