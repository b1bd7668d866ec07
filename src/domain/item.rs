//! Scanned item domain type

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A raw resource name discovered in a workflow, before classification
///
/// `id` is assigned once at scan time; neither it nor `raw_name` can change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScannedItem {
    id: Uuid,
    raw_name: String,
    is_node: bool,
}

impl ScannedItem {
    /// Create an item with a fresh identity
    pub fn new(raw_name: impl Into<String>, is_node: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            raw_name: raw_name.into(),
            is_node,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Literal node type identifier or filename as found in the document
    pub fn raw_name(&self) -> &str {
        &self.raw_name
    }

    /// Whether this is an executable node type (as opposed to a model file)
    pub fn is_node(&self) -> bool {
        self.is_node
    }
}
