//! Copy-on-write record table.
//!
//! Readers load an `Arc` of the current immutable table and never block.
//! Writers build the next table off to the side and publish it with a
//! single pointer swap, so a reader can only ever see a complete table.

use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use rrdns_application::ports::RecordStore;
use rrdns_domain::{normalize_fqdn, RecordSet, RecordTable};
use std::sync::{Arc, Mutex};
use tracing::debug;

pub struct SnapshotRecordStore {
    table: ArcSwap<RecordTable>,
    last_updated: ArcSwap<Option<DateTime<Utc>>>,
    // Serialises read-modify-write updates; plain loads never take it.
    write_lock: Mutex<()>,
}

impl SnapshotRecordStore {
    pub fn new() -> Self {
        Self {
            table: ArcSwap::from_pointee(RecordTable::new()),
            last_updated: ArcSwap::from_pointee(None),
            write_lock: Mutex::new(()),
        }
    }

    pub fn with_table(table: RecordTable) -> Self {
        let store = Self::new();
        store.replace(table);
        store
    }

    /// The current table as one consistent snapshot.
    pub fn snapshot(&self) -> Arc<RecordTable> {
        self.table.load_full()
    }

    fn publish(&self, table: RecordTable) {
        let entries = table.len();
        self.table.store(Arc::new(table));
        self.last_updated.store(Arc::new(Some(Utc::now())));
        debug!(entries, "Record table published");
    }

    fn update<F>(&self, mutate: F)
    where
        F: FnOnce(&mut RecordTable),
    {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut next = RecordTable::clone(&self.table.load());
        mutate(&mut next);
        self.publish(next);
    }
}

impl Default for SnapshotRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for SnapshotRecordStore {
    fn lookup(&self, name: &str) -> Option<RecordSet> {
        self.table.load().get(&normalize_fqdn(name)).cloned()
    }

    fn replace(&self, table: RecordTable) {
        let mut normalized = RecordTable::with_capacity(table.len());
        for (name, records) in table {
            normalized
                .entry(normalize_fqdn(&name))
                .or_default()
                .merge(records);
        }

        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        self.publish(normalized);
    }

    fn upsert(&self, name: &str, records: RecordSet) {
        let key = normalize_fqdn(name);
        self.update(|table| table.entry(key).or_default().merge(records));
    }

    fn remove(&self, name: &str) -> bool {
        let key = normalize_fqdn(name);
        if !self.table.load().contains_key(&key) {
            return false;
        }
        let mut removed = false;
        self.update(|table| removed = table.remove(&key).is_some());
        removed
    }

    fn last_updated(&self) -> Option<DateTime<Utc>> {
        **self.last_updated.load()
    }

    fn len(&self) -> usize {
        self.table.load().len()
    }
}
