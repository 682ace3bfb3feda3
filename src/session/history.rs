//! Recent-lookup history.
//!
//! Newest first, one entry per address, at most [`HISTORY_LIMIT`] entries.
//! The whole list is the persisted state: it is read once when a session
//! starts and written back in full after every change.

use serde::{Deserialize, Serialize};

use crate::config::{HISTORY_LIMIT, HISTORY_STORAGE_KEY};
use crate::error_handling::StorageError;
use crate::storage::KeyValueStore;

/// One past lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Address as it was looked up
    pub ip: String,
    /// When the lookup completed, in epoch milliseconds
    pub timestamp: i64,
}

/// Bounded, de-duplicated, most-recent-first lookup history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: Vec<HistoryEntry>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// An empty history holding at most `HISTORY_LIMIT` entries.
    pub fn new() -> Self {
        Self::with_limit(HISTORY_LIMIT)
    }

    /// An empty history holding at most `limit` entries.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit,
        }
    }

    /// Builds a history from stored entries, dropping any beyond the limit.
    pub fn from_entries(mut entries: Vec<HistoryEntry>) -> Self {
        entries.truncate(HISTORY_LIMIT);
        Self {
            entries,
            limit: HISTORY_LIMIT,
        }
    }

    /// Entries, newest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no lookups are recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records a lookup of `ip`: any earlier entry for the same address is
    /// removed, the new entry goes to the front, and the oldest entries past
    /// the limit are evicted.
    pub fn record(&mut self, ip: &str, timestamp: i64) {
        self.entries.retain(|e| e.ip != ip);
        self.entries.insert(
            0,
            HistoryEntry {
                ip: ip.to_string(),
                timestamp,
            },
        );
        self.entries.truncate(self.limit);
    }

    /// Serializes the entries as the persisted JSON array.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }

    /// Loads the persisted history.
    ///
    /// Never fails: a missing key gives an empty history, and an unreadable
    /// store or a corrupt value is logged and also treated as empty. The
    /// next successful lookup overwrites whatever was stored.
    pub async fn load(store: &dyn KeyValueStore) -> Self {
        let raw = match store.get(HISTORY_STORAGE_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::new(),
            Err(e) => {
                log::warn!("Could not read lookup history, starting empty: {}", e);
                return Self::new();
            }
        };

        match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
            Ok(entries) => {
                log::debug!("Loaded {} history entries", entries.len());
                Self::from_entries(entries)
            }
            Err(e) => {
                log::warn!("Discarding unreadable lookup history: {}", e);
                Self::new()
            }
        }
    }

    /// Writes the full history to `store`, replacing the stored value.
    pub async fn persist(&self, store: &dyn KeyValueStore) -> Result<(), StorageError> {
        let json = self.to_json()?;
        store.put(HISTORY_STORAGE_KEY, &json).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteStore;

    fn ips(history: &History) -> Vec<&str> {
        history.entries().iter().map(|e| e.ip.as_str()).collect()
    }

    #[test]
    fn test_record_prepends() {
        let mut history = History::new();
        history.record("8.8.8.8", 1);
        history.record("1.1.1.1", 2);
        assert_eq!(ips(&history), vec!["1.1.1.1", "8.8.8.8"]);
    }

    #[test]
    fn test_record_deduplicates_by_address() {
        let mut history = History::new();
        history.record("8.8.8.8", 1);
        history.record("1.1.1.1", 2);
        history.record("8.8.8.8", 3);

        assert_eq!(ips(&history), vec!["8.8.8.8", "1.1.1.1"]);
        assert_eq!(history.entries()[0].timestamp, 3);
    }

    #[test]
    fn test_record_evicts_oldest_past_limit() {
        let mut history = History::new();
        for i in 0..12 {
            history.record(&format!("10.0.0.{i}"), i);
        }

        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history.entries()[0].ip, "10.0.0.11");
        assert_eq!(history.entries()[9].ip, "10.0.0.2");
        assert!(!history.entries().iter().any(|e| e.ip == "10.0.0.0" || e.ip == "10.0.0.1"));
    }

    #[test]
    fn test_json_shape() {
        let mut history = History::new();
        history.record("8.8.8.8", 1_700_000_000_000);
        assert_eq!(
            history.to_json().unwrap(),
            r#"[{"ip":"8.8.8.8","timestamp":1700000000000}]"#
        );
    }

    #[test]
    fn test_from_entries_truncates() {
        let entries = (0..15)
            .map(|i| HistoryEntry {
                ip: format!("192.0.2.{i}"),
                timestamp: i,
            })
            .collect();
        assert_eq!(History::from_entries(entries).len(), HISTORY_LIMIT);
    }

    #[tokio::test]
    async fn test_persist_and_load_round_trip() {
        let store = SqliteStore::in_memory().await.unwrap();
        let mut history = History::new();
        history.record("8.8.8.8", 1);
        history.record("1.1.1.1", 2);
        history.persist(&store).await.unwrap();

        let loaded = History::load(&store).await;
        assert_eq!(loaded, history);
    }

    #[tokio::test]
    async fn test_load_missing_is_empty() {
        let store = SqliteStore::in_memory().await.unwrap();
        assert!(History::load(&store).await.is_empty());
    }

    #[tokio::test]
    async fn test_load_corrupt_is_empty() {
        let store = SqliteStore::in_memory().await.unwrap();
        for corrupt in ["not json", r#"{"ip":"8.8.8.8"}"#, r#"[{"ip":8}]"#] {
            store.put(HISTORY_STORAGE_KEY, corrupt).await.unwrap();
            assert!(History::load(&store).await.is_empty(), "{corrupt}");
        }
    }
}
