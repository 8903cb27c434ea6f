//! Conversion history: most-recent-first, deduplicated by URL, capped at 20.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SubconvError};
use crate::store::{KeyValueStore, HISTORY_KEY};

/// Maximum number of entries kept.
pub const MAX_HISTORY_ITEMS: usize = 20;

/// One converted subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub url: String,
    pub converted_url: String,
    pub timestamp: DateTime<Utc>,
}

/// Insert `entry` at the front, dropping any older entry with the same URL and
/// anything beyond [`MAX_HISTORY_ITEMS`].
pub fn push_entry(entries: &mut Vec<HistoryEntry>, entry: HistoryEntry) {
    entries.retain(|e| e.url != entry.url);
    entries.insert(0, entry);
    entries.truncate(MAX_HISTORY_ITEMS);
}

/// History list persisted under [`HISTORY_KEY`] in a key-value store.
#[derive(Debug)]
pub struct History<S> {
    store: S,
}

impl<S: KeyValueStore> History<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// All entries, newest first. Unreadable stored data is treated as empty.
    pub fn list(&self) -> Result<Vec<HistoryEntry>> {
        let Some(raw) = self.store.get(HISTORY_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                tracing::warn!(error = %e, "stored history is unreadable, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Entry at 0-based `index` (0 = most recent).
    pub fn get(&self, index: usize) -> Result<Option<HistoryEntry>> {
        Ok(self.list()?.into_iter().nth(index))
    }

    /// Record a conversion now.
    pub fn record(&mut self, url: &str, converted_url: &str) -> Result<()> {
        self.record_at(url, converted_url, Utc::now())
    }

    /// Record a conversion with an explicit timestamp.
    pub fn record_at(&mut self, url: &str, converted_url: &str, at: DateTime<Utc>) -> Result<()> {
        let mut entries = self.list()?;
        push_entry(
            &mut entries,
            HistoryEntry {
                url: url.to_string(),
                converted_url: converted_url.to_string(),
                timestamp: at,
            },
        );
        let json = serde_json::to_string(&entries).map_err(|source| SubconvError::Serialize {
            what: "history",
            source,
        })?;
        self.store.set(HISTORY_KEY, &json)?;
        tracing::debug!(url, len = entries.len(), "history updated");
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        self.store.remove(HISTORY_KEY)?;
        tracing::info!("history cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn empty_store_lists_nothing() {
        let h = History::new(MemoryStore::new());
        assert!(h.list().unwrap().is_empty());
        assert_eq!(h.get(0).unwrap(), None);
    }

    #[test]
    fn newest_first_and_dedup_moves_to_front() {
        let mut h = History::new(MemoryStore::new());
        h.record_at("https://a.example/sub", "A1", t0()).unwrap();
        h.record_at("https://b.example/sub", "B1", t0() + Duration::seconds(1)).unwrap();
        h.record_at("https://a.example/sub", "A2", t0() + Duration::seconds(2)).unwrap();

        let list = h.list().unwrap();
        let urls: Vec<&str> = list.iter().map(|e| e.url.as_str()).collect();
        assert_eq!(urls, ["https://a.example/sub", "https://b.example/sub"]);
        assert_eq!(list[0].converted_url, "A2");
        assert_eq!(list[0].timestamp, t0() + Duration::seconds(2));
    }

    #[test]
    fn never_exceeds_cap_and_never_duplicates() {
        let mut h = History::new(MemoryStore::new());
        for i in 0..50 {
            // Every third URL repeats an earlier one.
            let n = if i % 3 == 0 { i / 3 } else { i };
            let url = format!("https://host{n}.example/sub");
            h.record_at(&url, "c", t0() + Duration::seconds(i)).unwrap();

            let list = h.list().unwrap();
            assert!(list.len() <= MAX_HISTORY_ITEMS);
            let mut urls: Vec<&str> = list.iter().map(|e| e.url.as_str()).collect();
            urls.sort_unstable();
            urls.dedup();
            assert_eq!(urls.len(), list.len(), "duplicate url in history");
        }
        assert_eq!(h.list().unwrap().len(), MAX_HISTORY_ITEMS);
        assert_eq!(h.get(0).unwrap().unwrap().url, "https://host49.example/sub");
    }

    #[test]
    fn corrupt_value_reads_as_empty_and_is_overwritten() {
        let mut store = MemoryStore::new();
        store.set(HISTORY_KEY, "{not json").unwrap();
        let mut h = History::new(store);
        assert!(h.list().unwrap().is_empty());
        h.record_at("https://a.example/sub", "A", t0()).unwrap();
        assert_eq!(h.list().unwrap().len(), 1);
    }

    #[test]
    fn clear_removes_everything() {
        let mut h = History::new(MemoryStore::new());
        h.record_at("https://a.example/sub", "A", t0()).unwrap();
        h.clear().unwrap();
        assert!(h.list().unwrap().is_empty());
        assert!(h.into_inner().is_empty());
    }

    #[test]
    fn stored_json_uses_camel_case_and_iso_timestamps() {
        let mut h = History::new(MemoryStore::new());
        h.record_at("https://a.example/sub", "A", t0()).unwrap();
        let raw = h.into_inner().get(HISTORY_KEY).unwrap().unwrap();
        assert!(raw.contains("\"convertedUrl\":\"A\""));
        assert!(raw.contains("\"timestamp\":\"2024-05-01T12:00:00Z\""));
    }
}
