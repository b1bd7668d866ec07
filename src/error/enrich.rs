//! Enrichment collaborator errors

use super::NodefetchError;

/// One batch of the enrichment call failed or returned unusable output
pub fn batch_failed(batch: usize, reason: impl Into<String>) -> NodefetchError {
    NodefetchError::EnrichmentBatch {
        batch,
        reason: reason.into(),
    }
}
