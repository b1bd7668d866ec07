//! Enriched resource domain types
//!
//! An [`EnrichedResource`] is a scanned item plus everything needed to install it:
//! classification, target directory, source URL and approximate size.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use super::ScannedItem;

/// Placeholder used for unknown file sizes
pub const NOT_AVAILABLE: &str = "N/A";

/// Resource classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResourceType {
    Checkpoint,
    Lora,
    Vae,
    Embedding,
    ControlNet,
    Upscaler,
    CustomNode,
    #[default]
    Unknown,
}

/// Where a resource is expected to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComputeType {
    /// Heavy binary model weights
    Gpu,
    /// Executable node code
    Cpu,
}

impl ResourceType {
    pub const ALL: [ResourceType; 8] = [
        ResourceType::Checkpoint,
        ResourceType::Lora,
        ResourceType::Vae,
        ResourceType::Embedding,
        ResourceType::ControlNet,
        ResourceType::Upscaler,
        ResourceType::CustomNode,
        ResourceType::Unknown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ResourceType::Checkpoint => "Checkpoint",
            ResourceType::Lora => "LoRA",
            ResourceType::Vae => "VAE",
            ResourceType::Embedding => "Embedding",
            ResourceType::ControlNet => "ControlNet",
            ResourceType::Upscaler => "Upscaler",
            ResourceType::CustomNode => "CustomNode",
            ResourceType::Unknown => "Unknown",
        }
    }

    /// Parse a free-form type label, falling back to `Unknown`
    ///
    /// Case, spaces, dashes and underscores are ignored, so `"lora"`, `"LoRA"` and
    /// `"Custom Node"` all map to the expected variant.
    pub fn from_label(label: &str) -> Self {
        let key: String = label
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "checkpoint" | "checkpoints" | "ckpt" => ResourceType::Checkpoint,
            "lora" | "loras" | "locon" | "lycoris" => ResourceType::Lora,
            "vae" => ResourceType::Vae,
            "embedding" | "embeddings" | "textualinversion" => ResourceType::Embedding,
            "controlnet" => ResourceType::ControlNet,
            "upscaler" | "upscale" | "upscalemodel" => ResourceType::Upscaler,
            "customnode" | "customnodes" | "node" => ResourceType::CustomNode,
            _ => ResourceType::Unknown,
        }
    }

    /// Conventional install directory, relative to the application root
    pub fn default_target_path(self) -> &'static str {
        match self {
            ResourceType::Checkpoint => "models/checkpoints",
            ResourceType::Lora => "models/loras",
            ResourceType::Vae => "models/vae",
            ResourceType::Embedding => "models/embeddings",
            ResourceType::ControlNet => "models/controlnet",
            ResourceType::Upscaler => "models/upscale_models",
            ResourceType::CustomNode => "custom_nodes",
            ResourceType::Unknown => "models/other",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ResourceType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ResourceType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(ResourceType::from_label(&label))
    }
}

impl ComputeType {
    /// CPU for custom node code, GPU for everything else
    pub fn default_for(resource_type: ResourceType) -> Self {
        if resource_type == ResourceType::CustomNode {
            ComputeType::Cpu
        } else {
            ComputeType::Gpu
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ComputeType::Gpu => "GPU",
            ComputeType::Cpu => "CPU",
        }
    }

    /// Parse `"GPU"`/`"CPU"` in any case; anything else is `None`
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_uppercase().as_str() {
            "GPU" => Some(ComputeType::Gpu),
            "CPU" => Some(ComputeType::Cpu),
            _ => None,
        }
    }
}

impl fmt::Display for ComputeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ComputeType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ComputeType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        ComputeType::from_label(&label)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown compute type '{label}'")))
    }
}

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

/// A scanned item augmented with classification, path, URL and size
///
/// Everything except the scanned identity is editable by the reviewer. The written
/// form always carries the effective `computeType`; a list without the key derives it
/// from the type again when read.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedResource {
    #[serde(flatten)]
    item: ScannedItem,

    #[serde(default)]
    pub name: String,

    #[serde(rename = "type", default)]
    pub resource_type: ResourceType,

    #[serde(default)]
    pub description: String,

    /// Install directory relative to the application root
    #[serde(default)]
    pub target_path: String,

    #[serde(default)]
    pub download_url: String,

    #[serde(default)]
    pub confidence: f64,

    /// Explicit override; `None` means "derive from the type"
    #[serde(default)]
    pub compute_type: Option<ComputeType>,

    #[serde(default = "not_available")]
    pub file_size: String,
}

impl EnrichedResource {
    /// Blank resource for a scanned item that received no guess
    pub fn unresolved(item: ScannedItem) -> Self {
        Self {
            name: item.raw_name().to_string(),
            item,
            resource_type: ResourceType::Unknown,
            description: String::new(),
            target_path: String::new(),
            download_url: String::new(),
            confidence: 0.0,
            compute_type: None,
            file_size: not_available(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.item.id()
    }

    pub fn raw_name(&self) -> &str {
        self.item.raw_name()
    }

    pub fn is_node(&self) -> bool {
        self.item.is_node()
    }

    /// Effective compute type: the explicit override, else the default for the type
    pub fn compute_type(&self) -> ComputeType {
        self.compute_type
            .unwrap_or_else(|| ComputeType::default_for(self.resource_type))
    }

    /// Target directory, falling back to the conventional one for the type
    pub fn effective_target_path(&self) -> &str {
        let trimmed = self.target_path.trim();
        if trimmed.is_empty() {
            self.resource_type.default_target_path()
        } else {
            trimmed
        }
    }

    pub fn is_custom_node(&self) -> bool {
        self.resource_type == ResourceType::CustomNode
    }
}

impl Serialize for EnrichedResource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Written<'a> {
            #[serde(flatten)]
            item: &'a ScannedItem,
            name: &'a str,
            #[serde(rename = "type")]
            resource_type: ResourceType,
            description: &'a str,
            target_path: &'a str,
            download_url: &'a str,
            confidence: f64,
            compute_type: ComputeType,
            file_size: &'a str,
        }

        Written {
            item: &self.item,
            name: &self.name,
            resource_type: self.resource_type,
            description: &self.description,
            target_path: &self.target_path,
            download_url: &self.download_url,
            confidence: self.confidence,
            compute_type: self.compute_type(),
            file_size: &self.file_size,
        }
        .serialize(serializer)
    }
}
