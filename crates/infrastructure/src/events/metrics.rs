use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Per-name query counters fed from the observer queue.
#[derive(Clone)]
pub struct QueryNameMetrics {
    total_queries: Arc<AtomicU64>,

    name_counts: Arc<DashMap<Arc<str>, u64>>,
}

impl QueryNameMetrics {
    pub fn new() -> Self {
        Self {
            total_queries: Arc::new(AtomicU64::new(0)),
            name_counts: Arc::new(DashMap::new()),
        }
    }

    /// Names are counted case-insensitively, without the trailing dot.
    pub fn track(&self, name: &str) {
        self.total_queries.fetch_add(1, Ordering::Relaxed);

        let key: Arc<str> = Arc::from(Self::count_key(name));
        self.name_counts
            .entry(key)
            .and_modify(|c| *c += 1)
            .or_insert(1);
    }

    pub fn total_queries(&self) -> u64 {
        self.total_queries.load(Ordering::Relaxed)
    }

    pub fn distinct_names(&self) -> usize {
        self.name_counts.len()
    }

    pub fn name_count(&self, name: &str) -> u64 {
        self.name_counts
            .get(Self::count_key(name).as_str())
            .map(|v| *v)
            .unwrap_or(0)
    }

    pub fn top_names(&self, n: usize) -> Vec<(String, u64)> {
        let mut names: Vec<_> = self
            .name_counts
            .iter()
            .map(|entry| (entry.key().to_string(), *entry.value()))
            .collect();

        names.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        names.truncate(n);
        names
    }

    fn count_key(name: &str) -> String {
        name.trim_end_matches('.').to_ascii_lowercase()
    }
}

impl Default for QueryNameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
