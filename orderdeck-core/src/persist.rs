//! Durable order records — local JSON store plus optional remote endpoint.
//!
//! The store is an explicit object passed into callers, not a module-level
//! singleton, so parallel containers can be tested in isolation. Save writes
//! locally first and pushes remotely best-effort; a remote failure never
//! rolls back the local save.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PersistError;
use crate::item::SortableItem;

/// One persisted `{id, position}` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderEntry {
    pub id: String,
    pub order: usize,
}

/// The stored shape. Positions are dense and zero-based at the moment of
/// save; a loaded record may be sparse or reference ids no longer present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    pub key: String,
    pub saved_at: DateTime<Utc>,
    pub order: Vec<OrderEntry>,
}

/// Durable store abstraction over keyed ordering records.
///
/// Keys namespace unrelated containers; two containers sharing a key will
/// corrupt each other's stored order. That is a caller responsibility, not a
/// runtime-checked invariant.
pub trait OrderStore {
    fn save(&self, key: &str, entries: &[OrderEntry]) -> Result<(), PersistError>;
    fn load(&self, key: &str) -> Result<Option<Vec<OrderEntry>>, PersistError>;
}

/// One JSON file per storage key under a caller-supplied directory.
///
/// The filename is derived from the key through a blake3 digest prefix so
/// arbitrary keys map to safe, collision-free filenames.
#[derive(Debug, Clone)]
pub struct FileOrderStore {
    dir: PathBuf,
}

impl FileOrderStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let digest = blake3::hash(key.as_bytes()).to_hex();
        let mut name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .take(40)
            .collect();
        name.push('-');
        name.push_str(&digest.as_str()[..8]);
        name.push_str(".json");
        self.dir.join(name)
    }

    /// Delete the record for `key`. Returns whether a record existed.
    pub fn delete(&self, key: &str) -> Result<bool, PersistError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// All records in the store, sorted by key. Unreadable files are skipped.
    pub fn records(&self) -> Result<Vec<OrderRecord>, PersistError> {
        let mut records = Vec::new();
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(records),
            Err(e) => return Err(e.into()),
        };
        for entry in entries {
            let entry = entry?;
            if entry.path().extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            if let Ok(content) = fs::read_to_string(entry.path()) {
                if let Ok(record) = serde_json::from_str::<OrderRecord>(&content) {
                    records.push(record);
                }
            }
        }
        records.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(records)
    }
}

impl OrderStore for FileOrderStore {
    fn save(&self, key: &str, entries: &[OrderEntry]) -> Result<(), PersistError> {
        fs::create_dir_all(&self.dir)?;
        let record = OrderRecord {
            key: key.to_string(),
            saved_at: Utc::now(),
            order: entries.to_vec(),
        };
        let json = serde_json::to_string_pretty(&record)?;
        fs::write(self.path_for(key), json)?;
        Ok(())
    }

    /// Missing or corrupt files load as `None` — a corrupt record is the
    /// same as no stored order.
    fn load(&self, key: &str) -> Result<Option<Vec<OrderEntry>>, PersistError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(serde_json::from_str::<OrderRecord>(&content)
                .ok()
                .map(|record| record.order)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Wire payload for the remote endpoint.
#[derive(Debug, Serialize, Deserialize)]
struct RemotePayload {
    order: Vec<OrderEntry>,
}

/// Best-effort mirror of order records to a remote endpoint.
///
/// `PUT {base}/orders/{key}` saves, `GET` on the same path loads. Any
/// non-success response is treated identically to "no stored order".
#[derive(Debug, Clone)]
pub struct RemoteOrderClient {
    base: String,
    client: reqwest::blocking::Client,
}

impl RemoteOrderClient {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            client: reqwest::blocking::Client::new(),
        }
    }

    fn url(&self, key: &str) -> String {
        format!("{}/orders/{}", self.base.trim_end_matches('/'), key)
    }

    pub fn push(&self, key: &str, entries: &[OrderEntry]) -> Result<(), PersistError> {
        let payload = RemotePayload {
            order: entries.to_vec(),
        };
        let resp = self
            .client
            .put(self.url(key))
            .json(&payload)
            .send()
            .map_err(|e| PersistError::Remote(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(PersistError::Remote(format!(
                "push rejected: {}",
                resp.status()
            )));
        }
        Ok(())
    }

    pub fn fetch(&self, key: &str) -> Result<Option<Vec<OrderEntry>>, PersistError> {
        let resp = self
            .client
            .get(self.url(key))
            .send()
            .map_err(|e| PersistError::Remote(e.to_string()))?;
        if !resp.status().is_success() {
            return Ok(None);
        }
        let payload: RemotePayload = resp
            .json()
            .map_err(|e| PersistError::Remote(e.to_string()))?;
        Ok(Some(payload.order))
    }
}

/// Serialize a committed sequence as dense, zero-based `{id, order}` pairs.
pub fn entries_from<T: SortableItem>(items: &[T]) -> Vec<OrderEntry> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| OrderEntry {
            id: item.id().to_string(),
            order: index,
        })
        .collect()
}

/// Re-sort the live item set by recorded position.
///
/// Items without a recorded position sort after all recorded items, keeping
/// their pre-existing relative order; recorded ids absent from the live set
/// are dropped silently. The result is re-stamped dense and zero-based.
pub fn reconcile<T: SortableItem>(items: Vec<T>, entries: &[OrderEntry]) -> Vec<T> {
    let positions: HashMap<&str, usize> = entries
        .iter()
        .map(|entry| (entry.id.as_str(), entry.order))
        .collect();

    let mut recorded: Vec<(usize, T)> = Vec::new();
    let mut unrecorded: Vec<T> = Vec::new();
    for item in items {
        match positions.get(item.id()) {
            Some(&position) => recorded.push((position, item)),
            None => unrecorded.push(item),
        }
    }
    // Stable: ties and gaps keep insertion order.
    recorded.sort_by_key(|(position, _)| *position);

    let mut result: Vec<T> = recorded.into_iter().map(|(_, item)| item).collect();
    result.extend(unrecorded);
    for (index, item) in result.iter_mut().enumerate() {
        item.set_order(index);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{ids, rows};

    #[test]
    fn file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileOrderStore::new(dir.path());

        let entries = vec![
            OrderEntry { id: "TSLA".into(), order: 0 },
            OrderEntry { id: "AAPL".into(), order: 1 },
            OrderEntry { id: "NVDA".into(), order: 2 },
        ];
        store.save("watchlist", &entries).unwrap();

        let loaded = store.load("watchlist").unwrap().unwrap();
        assert_eq!(loaded, entries);
    }

    #[test]
    fn missing_key_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileOrderStore::new(dir.path());
        assert!(store.load("nothing-here").unwrap().is_none());
    }

    #[test]
    fn corrupt_record_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileOrderStore::new(dir.path());
        store.save("watchlist", &[]).unwrap();
        let path = store.path_for("watchlist");
        fs::write(&path, "not valid json {{{").unwrap();

        assert!(store.load("watchlist").unwrap().is_none());
    }

    #[test]
    fn keys_namespace_records() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileOrderStore::new(dir.path());

        store
            .save("a", &[OrderEntry { id: "X".into(), order: 0 }])
            .unwrap();
        store
            .save("b", &[OrderEntry { id: "Y".into(), order: 0 }])
            .unwrap();

        assert_eq!(store.load("a").unwrap().unwrap()[0].id, "X");
        assert_eq!(store.load("b").unwrap().unwrap()[0].id, "Y");
    }

    #[test]
    fn awkward_keys_map_to_distinct_files() {
        let store = FileOrderStore::new("/tmp/orderdeck-test");
        let a = store.path_for("panel/left: main");
        let b = store.path_for("panel/left: alt");
        assert_ne!(a, b);
        let name = a.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.ends_with(".json"));
        assert!(!name.contains('/'));
        assert!(!name.contains(':'));
    }

    #[test]
    fn delete_reports_existence() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileOrderStore::new(dir.path());
        store.save("gone", &[]).unwrap();

        assert!(store.delete("gone").unwrap());
        assert!(!store.delete("gone").unwrap());
        assert!(store.load("gone").unwrap().is_none());
    }

    #[test]
    fn records_lists_all_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileOrderStore::new(dir.path());
        store.save("watchlist", &[]).unwrap();
        store.save("portfolio", &[]).unwrap();

        let records = store.records().unwrap();
        let keys: Vec<&str> = records.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["portfolio", "watchlist"]);
    }

    #[test]
    fn entries_are_dense_and_zero_based() {
        let items = rows(&["TSLA", "AAPL", "NVDA"]);
        let entries = entries_from(&items);
        assert_eq!(
            entries,
            vec![
                OrderEntry { id: "TSLA".into(), order: 0 },
                OrderEntry { id: "AAPL".into(), order: 1 },
                OrderEntry { id: "NVDA".into(), order: 2 },
            ]
        );
    }

    #[test]
    fn reconcile_applies_recorded_positions() {
        // Storage holds {NVDA:0, AAPL:1}; TSLA was never seen in storage.
        let live = rows(&["AAPL", "TSLA", "NVDA"]);
        let stored = vec![
            OrderEntry { id: "NVDA".into(), order: 0 },
            OrderEntry { id: "AAPL".into(), order: 1 },
        ];

        let reconciled = reconcile(live, &stored);
        assert_eq!(ids(&reconciled), vec!["NVDA", "AAPL", "TSLA"]);
        // Re-stamped dense and zero-based.
        let orders: Vec<Option<usize>> = reconciled.iter().map(|r| r.order).collect();
        assert_eq!(orders, vec![Some(0), Some(1), Some(2)]);
    }

    #[test]
    fn reconcile_drops_unknown_stored_ids() {
        let live = rows(&["AAPL", "NVDA"]);
        let stored = vec![
            OrderEntry { id: "GONE".into(), order: 0 },
            OrderEntry { id: "NVDA".into(), order: 1 },
            OrderEntry { id: "AAPL".into(), order: 2 },
        ];

        let reconciled = reconcile(live, &stored);
        assert_eq!(ids(&reconciled), vec!["NVDA", "AAPL"]);
    }

    #[test]
    fn reconcile_appends_unrecorded_in_original_order() {
        let live = rows(&["A", "B", "C", "D"]);
        let stored = vec![OrderEntry { id: "C".into(), order: 0 }];

        let reconciled = reconcile(live, &stored);
        // B and D keep their pre-existing relative order after the recorded
        // items — a stable append, not arbitrary.
        assert_eq!(ids(&reconciled), vec!["C", "A", "B", "D"]);
    }

    #[test]
    fn reconcile_tolerates_sparse_positions() {
        let live = rows(&["A", "B", "C"]);
        let stored = vec![
            OrderEntry { id: "C".into(), order: 3 },
            OrderEntry { id: "A".into(), order: 17 },
        ];

        let reconciled = reconcile(live, &stored);
        assert_eq!(ids(&reconciled), vec!["C", "A", "B"]);
    }

    #[test]
    fn save_then_load_reconstructs_order_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileOrderStore::new(dir.path());

        let seq = rows(&["TSLA", "AAPL", "NVDA"]);
        store.save("wl", &entries_from(&seq)).unwrap();

        let live = rows(&["AAPL", "TSLA", "NVDA"]);
        let stored = store.load("wl").unwrap().unwrap();
        assert_eq!(ids(&reconcile(live, &stored)), vec!["TSLA", "AAPL", "NVDA"]);
    }
}
