//! Resource resolver
//!
//! Turns scanned items into [`EnrichedResource`]s:
//! - [`resolve`] folds a set of external guesses into resources, one per item
//! - [`Resolver`] drives an [`Enricher`] batch by batch and concatenates the results
//!   in batch order; a failed batch contributes nothing and is reported in the
//!   [`Resolution`] instead of aborting the run
//! - [`validation`] checks each resource's download URL before script generation

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::domain::{ComputeType, EnrichedResource, NOT_AVAILABLE, ResourceType, ScannedItem};
use crate::error::{NodefetchError, Result, enrich};
use crate::progress::BatchProgress;

pub mod enricher;
pub mod validation;

pub use enricher::{
    Enricher, EnrichmentRequest, ExternalGuess, GuessFileEnricher, HeuristicEnricher,
};
pub use validation::{ValidationResult, validate, validate_all};

/// Item count above which enrichment is split into batches; also the batch size
pub const BATCH_THRESHOLD: usize = 20;

/// Confidence assigned to every resource built from a guess
pub const DEFAULT_CONFIDENCE: f64 = 0.9;

/// Fold guesses into resources using [`DEFAULT_CONFIDENCE`]
///
/// Guesses are looked up by raw name; items without a guess still produce a resource.
pub fn resolve(
    items: &[ScannedItem],
    guesses: &HashMap<String, ExternalGuess>,
) -> Vec<EnrichedResource> {
    items
        .iter()
        .map(|item| fold_guess(item.clone(), guesses.get(item.raw_name()), DEFAULT_CONFIDENCE))
        .collect()
}

/// Build the authoritative resource for one item
///
/// Identity (`id`, `raw_name`, `is_node`) always comes from the scanned item. A
/// missing compute type is left to the per-type default and a missing size becomes
/// `"N/A"`.
pub fn fold_guess(
    item: ScannedItem,
    guess: Option<&ExternalGuess>,
    confidence: f64,
) -> EnrichedResource {
    let mut resource = EnrichedResource::unresolved(item);
    let Some(guess) = guess else {
        return resource;
    };

    if let Some(name) = non_blank(guess.name.as_deref()) {
        resource.name = name.to_string();
    }
    resource.resource_type = guess
        .resource_type
        .as_deref()
        .map_or(ResourceType::Unknown, ResourceType::from_label);
    resource.description = guess.description.clone().unwrap_or_default();
    resource.target_path = guess.target_path.clone().unwrap_or_default();
    resource.download_url = guess.download_url.clone().unwrap_or_default();
    resource.compute_type = guess.compute_type.as_deref().and_then(ComputeType::from_label);
    resource.file_size = non_blank(guess.file_size.as_deref())
        .unwrap_or(NOT_AVAILABLE)
        .to_string();
    resource.confidence = confidence;
    resource
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// A batch whose enrichment call failed
#[derive(Debug)]
pub struct BatchFailure {
    /// Zero-based batch index
    pub batch: usize,
    /// Raw names that were in the batch and are missing from the result
    pub raw_names: Vec<String>,
    pub error: NodefetchError,
}

/// Outcome of a batched resolution
#[derive(Debug, Default)]
pub struct Resolution {
    pub resources: Vec<EnrichedResource>,
    pub failures: Vec<BatchFailure>,
    pub batches: usize,
}

impl Resolution {
    /// Some, but not all, batches failed
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty() && self.failures.len() < self.batches
    }

    /// Accept partial results, reject a run where every batch failed
    ///
    /// # Errors
    ///
    /// Returns `NodefetchError::EnrichmentFailed` when no batch succeeded.
    pub fn into_complete(self) -> Result<Self> {
        if self.batches > 0 && self.failures.len() == self.batches {
            return Err(NodefetchError::EnrichmentFailed {
                batches: self.batches,
            });
        }
        Ok(self)
    }
}

/// Batched driver around an [`Enricher`]
pub struct Resolver<'a> {
    enricher: &'a dyn Enricher,
    batch_size: usize,
    confidence: f64,
    progress: Option<&'a BatchProgress>,
}

impl<'a> Resolver<'a> {
    pub fn new(enricher: &'a dyn Enricher) -> Self {
        Self {
            enricher,
            batch_size: BATCH_THRESHOLD,
            confidence: DEFAULT_CONFIDENCE,
            progress: None,
        }
    }

    /// Override the size of each batch once the item count exceeds
    /// [`BATCH_THRESHOLD`] (values below 1 are treated as 1)
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    #[must_use]
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    #[must_use]
    pub fn with_progress(mut self, progress: &'a BatchProgress) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Items per batch: all of them up to the threshold, the batch size above it
    fn chunk_size(&self, item_count: usize) -> usize {
        if item_count <= BATCH_THRESHOLD {
            item_count.max(1)
        } else {
            self.batch_size
        }
    }

    /// Number of batches `item_count` items are split into
    pub fn batch_count(&self, item_count: usize) -> usize {
        item_count.div_ceil(self.chunk_size(item_count))
    }

    /// Enrich all items, one batch at a time, in order
    pub fn resolve(&self, items: &[ScannedItem]) -> Resolution {
        let mut resolution = Resolution {
            batches: self.batch_count(items.len()),
            ..Resolution::default()
        };

        for (index, batch) in items.chunks(self.chunk_size(items.len())).enumerate() {
            if let Some(progress) = self.progress {
                progress.start_batch(index, batch.len());
            }

            match self.resolve_batch(index, batch) {
                Ok(resources) => resolution.resources.extend(resources),
                Err(error) => {
                    warn!(batch = index, %error, "Enrichment batch failed");
                    resolution.failures.push(BatchFailure {
                        batch: index,
                        raw_names: batch.iter().map(|i| i.raw_name().to_string()).collect(),
                        error,
                    });
                }
            }

            if let Some(progress) = self.progress {
                progress.finish_batch();
            }
        }

        if let Some(progress) = self.progress {
            progress.finish();
        }
        debug!(
            resolved = resolution.resources.len(),
            failed_batches = resolution.failures.len(),
            "Resolution complete"
        );
        resolution
    }

    fn resolve_batch(&self, index: usize, batch: &[ScannedItem]) -> Result<Vec<EnrichedResource>> {
        let requests: Vec<EnrichmentRequest> = batch
            .iter()
            .map(|item| EnrichmentRequest {
                raw_name: item.raw_name().to_string(),
                is_node: item.is_node(),
            })
            .collect();

        debug!(batch = index, size = requests.len(), "Enriching batch");
        let guesses = self
            .enricher
            .enrich(&requests)
            .map_err(|e| enrich::batch_failed(index, e.to_string()))?;

        let mut by_name: HashMap<String, ExternalGuess> = HashMap::new();
        for guess in guesses {
            let key = guess.raw_name.trim().to_string();
            by_name.entry(key).or_insert(guess);
        }

        Ok(batch
            .iter()
            .map(|item| fold_guess(item.clone(), by_name.get(item.raw_name()), self.confidence))
            .collect())
    }
}
