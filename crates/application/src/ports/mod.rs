mod query_observer;
mod record_source;
mod record_store;

pub use query_observer::QueryObserver;
pub use record_source::RecordSource;
pub use record_store::RecordStore;

// Re-export for convenience
pub use rrdns_domain::{RecordSet, RecordTable};
