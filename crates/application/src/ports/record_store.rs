use chrono::{DateTime, Utc};
use rrdns_domain::{RecordSet, RecordTable};

/// Hostname → addresses table read by every query and written by the
/// records updater.
///
/// Implementations must make each write atomic from a reader's point of
/// view: a concurrent `lookup` sees the table either before or after the
/// write, never halfway through it. Every write bumps `last_updated`.
pub trait RecordStore: Send + Sync {
    /// `name` may be in any case, with or without the trailing dot.
    fn lookup(&self, name: &str) -> Option<RecordSet>;

    /// Swap the whole table for `table`. Keys are normalised on the way in.
    fn replace(&self, table: RecordTable);

    /// Merge `records` into the entry for `name`, creating it if needed.
    fn upsert(&self, name: &str, records: RecordSet);

    /// Returns whether an entry was removed.
    fn remove(&self, name: &str) -> bool;

    /// `None` until the first write.
    fn last_updated(&self) -> Option<DateTime<Utc>>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
