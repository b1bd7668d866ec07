//! Persisted download history
//!
//! A newest-first JSON list of every resource committed to an installer. Entries are
//! keyed by download URL: adding a URL already on record is a no-op, and so is a
//! second copy of a URL within the same commit.

use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::domain::{EnrichedResource, HistoryItem};
use crate::error::{Result, history};

/// History file name inside the data directory
pub const HISTORY_FILE: &str = "history.json";

/// JSON-file backed history store
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    /// Store at an explicit file path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the configured data directory
    ///
    /// # Errors
    ///
    /// Returns `NodefetchError::HistoryFailed` if no data directory can be determined.
    pub fn open_default() -> Result<Self> {
        Ok(Self::at(crate::config::data_dir()?.join(HISTORY_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All entries, newest first; a missing file is an empty history
    ///
    /// # Errors
    ///
    /// Returns `NodefetchError::HistoryFailed` if the file cannot be read or parsed.
    pub fn load(&self) -> Result<Vec<HistoryItem>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|e| {
            history::failed(format!("Failed to read {}: {}", self.path.display(), e))
        })?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            history::failed(format!("Failed to parse {}: {}", self.path.display(), e))
        })
    }

    /// Record committed resources now
    ///
    /// # Errors
    ///
    /// See [`HistoryStore::add_at`].
    pub fn add(&self, resources: &[EnrichedResource]) -> Result<usize> {
        self.add_at(resources, Utc::now())
    }

    /// Record committed resources with an explicit timestamp
    ///
    /// Returns how many entries were actually added.
    ///
    /// # Errors
    ///
    /// Returns `NodefetchError::HistoryFailed` if the existing history cannot be loaded
    /// or the updated one cannot be written.
    pub fn add_at(&self, resources: &[EnrichedResource], now: DateTime<Utc>) -> Result<usize> {
        let existing = self.load()?;
        let mut seen: HashSet<String> = existing
            .iter()
            .map(|item| item.download_url().trim().to_string())
            .collect();

        let mut added: Vec<HistoryItem> = Vec::new();
        for resource in resources {
            let url = resource.download_url.trim();
            if url.is_empty() || !seen.insert(url.to_string()) {
                debug!(raw_name = resource.raw_name(), url, "Skipping history entry");
                continue;
            }
            added.push(HistoryItem::new(resource.clone(), now));
        }

        let count = added.len();
        if count > 0 {
            added.extend(existing);
            self.save(&added)?;
            info!(count, path = %self.path.display(), "Recorded history entries");
        }
        Ok(count)
    }

    /// Remove every entry
    ///
    /// # Errors
    ///
    /// Returns `NodefetchError::HistoryFailed` if the empty history cannot be written.
    pub fn clear(&self) -> Result<()> {
        self.save(&[])?;
        info!(path = %self.path.display(), "Cleared history");
        Ok(())
    }

    /// Write via a temporary file in the same directory, then rename over the target
    fn save(&self, items: &[HistoryItem]) -> Result<()> {
        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent).map_err(|e| {
            history::failed(format!("Failed to create {}: {}", parent.display(), e))
        })?;

        let content = serde_json::to_string_pretty(items)
            .map_err(|e| history::failed(format!("Failed to serialize history: {}", e)))?;

        let mut temp = tempfile::NamedTempFile::new_in(parent)
            .map_err(|e| history::failed(format!("Failed to create temp file: {}", e)))?;
        temp.write_all(content.as_bytes())
            .map_err(|e| history::failed(format!("Failed to write history: {}", e)))?;
        temp.persist(&self.path).map_err(|e| {
            history::failed(format!("Failed to write {}: {}", self.path.display(), e))
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ResourceType, ScannedItem};
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn resource(raw: &str, url: &str) -> EnrichedResource {
        let mut r = EnrichedResource::unresolved(ScannedItem::new(raw, false));
        r.resource_type = ResourceType::Lora;
        r.download_url = url.to_string();
        r
    }

    fn store(temp: &TempDir) -> HistoryStore {
        HistoryStore::at(temp.path().join("nested").join(HISTORY_FILE))
    }

    #[test]
    fn test_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        assert!(store(&temp).load().unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_url_in_one_commit_is_stored_once() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);
        let added = store
            .add(&[
                resource("a.safetensors", "https://civitai.com/1"),
                resource("b.safetensors", "https://civitai.com/1"),
            ])
            .unwrap();
        assert_eq!(added, 1);

        let items = store.load().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].resource.raw_name(), "a.safetensors");
    }

    #[test]
    fn test_add_prepends_and_drops_known_urls() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);
        let first = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();

        store
            .add_at(&[resource("old.pt", "https://hf.co/old.pt")], first)
            .unwrap();
        let added = store
            .add_at(
                &[
                    resource("old-again.pt", " https://hf.co/old.pt "),
                    resource("new.pt", "https://hf.co/new.pt"),
                    resource("no-url.pt", ""),
                ],
                second,
            )
            .unwrap();
        assert_eq!(added, 1);

        let items = store.load().unwrap();
        let names: Vec<_> = items.iter().map(|i| i.resource.raw_name()).collect();
        assert_eq!(names, vec!["new.pt", "old.pt"]);
        assert_eq!(items[0].date_added, second);
        assert_eq!(items[1].date_added, first);
    }

    #[test]
    fn test_clear() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);
        store
            .add(&[resource("a.pt", "https://hf.co/a.pt")])
            .unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_entries_round_trip_identity() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);
        let r = resource("a.pt", "https://hf.co/a.pt");
        store.add(std::slice::from_ref(&r)).unwrap();
        let items = store.load().unwrap();
        assert_eq!(items[0].resource, r);
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{ nope").unwrap();
        let err = store.load().unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
