//! Download history domain type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::EnrichedResource;

/// A resource the user committed to an installer, stamped with when that happened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    #[serde(flatten)]
    pub resource: EnrichedResource,

    pub date_added: DateTime<Utc>,
}

impl HistoryItem {
    pub fn new(resource: EnrichedResource, date_added: DateTime<Utc>) -> Self {
        Self {
            resource,
            date_added,
        }
    }

    /// Dedup key for the history
    pub fn download_url(&self) -> &str {
        &self.resource.download_url
    }
}
