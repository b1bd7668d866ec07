//! Enrichment collaborators
//!
//! An [`Enricher`] receives a batch of raw names and answers with a structured
//! [`ExternalGuess`] per name it recognizes. How good those guesses are is the
//! collaborator's business; the resolver only folds them into resources.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{NOT_AVAILABLE, ResourceType};
use crate::error::{NodefetchError, Result, fs};

/// One entry of a batch sent to an enricher
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentRequest {
    pub raw_name: String,
    pub is_node: bool,
}

/// Structured guess for one raw name
///
/// Every field is optional; identity fields a collaborator may echo back (`id`,
/// `isNode`) are ignored when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalGuess {
    #[serde(default)]
    pub raw_name: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub resource_type: Option<String>,
    pub description: Option<String>,
    pub target_path: Option<String>,
    pub download_url: Option<String>,
    pub compute_type: Option<String>,
    pub file_size: Option<String>,
}

/// The external naming collaborator
pub trait Enricher {
    /// Guess details for a batch of raw names
    ///
    /// # Errors
    ///
    /// Returns an error when the collaborator could not be reached or its answer
    /// could not be understood. The resolver treats that as a failed batch.
    fn enrich(&self, batch: &[EnrichmentRequest]) -> Result<Vec<ExternalGuess>>;
}

/// Guesses loaded from a JSON file produced elsewhere
///
/// Accepts either an array of guess objects carrying `rawName`, or an object keyed
/// by raw name.
#[derive(Debug, Clone, Default)]
pub struct GuessFileEnricher {
    guesses: HashMap<String, ExternalGuess>,
}

impl GuessFileEnricher {
    /// Load guesses from a file
    ///
    /// # Errors
    ///
    /// Returns `NodefetchError::FileReadFailed` if the file cannot be read or is not
    /// one of the accepted JSON layouts.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| fs::read_failed(path.display().to_string(), e.to_string()))?;
        Self::from_json(&content).map_err(|e| match e {
            NodefetchError::WorkflowParse { reason } => {
                fs::read_failed(path.display().to_string(), reason)
            }
            other => other,
        })
    }

    /// Parse guesses from JSON text
    ///
    /// # Errors
    ///
    /// Returns `NodefetchError::WorkflowParse` if the text is not an accepted layout.
    pub fn from_json(content: &str) -> Result<Self> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Layout {
            List(Vec<ExternalGuess>),
            Keyed(HashMap<String, ExternalGuess>),
        }

        let guesses = match serde_json::from_str::<Layout>(content)? {
            Layout::List(list) => {
                let mut guesses = HashMap::new();
                for guess in list {
                    let key = guess.raw_name.trim().to_string();
                    guesses.entry(key).or_insert(guess);
                }
                guesses
            }
            Layout::Keyed(map) => map
                .into_iter()
                .map(|(raw_name, mut guess)| {
                    let key = raw_name.trim().to_string();
                    guess.raw_name.clone_from(&key);
                    (key, guess)
                })
                .collect(),
        };

        debug!(count = guesses.len(), "Loaded enrichment guesses");
        Ok(Self { guesses })
    }

    pub fn len(&self) -> usize {
        self.guesses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guesses.is_empty()
    }
}

impl Enricher for GuessFileEnricher {
    fn enrich(&self, batch: &[EnrichmentRequest]) -> Result<Vec<ExternalGuess>> {
        Ok(batch
            .iter()
            .filter_map(|request| self.guesses.get(&request.raw_name).cloned())
            .collect())
    }
}

/// Offline enricher that classifies by filename
///
/// It never invents a download link: the URL is left as a `search:` query so the
/// reviewer is prompted to supply a direct one.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicEnricher;

impl HeuristicEnricher {
    /// Classify a model file name by keywords and extension
    pub fn classify_file(raw_name: &str) -> ResourceType {
        let lower = raw_name.to_lowercase();
        let file_name = lower.rsplit(['/', '\\']).next().unwrap_or(lower.as_str());

        if file_name.contains("lora") || file_name.contains("lycoris") {
            ResourceType::Lora
        } else if file_name.contains("vae") {
            ResourceType::Vae
        } else if file_name.contains("controlnet")
            || file_name.contains("control_")
            || file_name.starts_with("control-")
        {
            ResourceType::ControlNet
        } else if file_name.contains("esrgan")
            || file_name.contains("upscale")
            || file_name.starts_with("4x")
            || file_name.starts_with("2x")
        {
            ResourceType::Upscaler
        } else if file_name.contains("embedding") || file_name.contains("negative") {
            ResourceType::Embedding
        } else if file_name.ends_with(".ckpt") || file_name.ends_with(".safetensors") {
            ResourceType::Checkpoint
        } else {
            ResourceType::Unknown
        }
    }

    fn guess(request: &EnrichmentRequest) -> ExternalGuess {
        let resource_type = if request.is_node {
            ResourceType::CustomNode
        } else {
            Self::classify_file(&request.raw_name)
        };

        let description = if request.is_node {
            format!("Custom node type '{}'", request.raw_name)
        } else {
            format!("{} file referenced by the workflow", resource_type)
        };

        ExternalGuess {
            raw_name: request.raw_name.clone(),
            name: Some(request.raw_name.clone()),
            resource_type: Some(resource_type.as_str().to_string()),
            description: Some(description),
            target_path: Some(resource_type.default_target_path().to_string()),
            download_url: Some(format!("search: {}", request.raw_name)),
            compute_type: None,
            file_size: Some(NOT_AVAILABLE.to_string()),
        }
    }
}

impl Enricher for HeuristicEnricher {
    fn enrich(&self, batch: &[EnrichmentRequest]) -> Result<Vec<ExternalGuess>> {
        Ok(batch.iter().map(Self::guess).collect())
    }
}
