use async_trait::async_trait;
use rrdns_domain::{DomainError, RecordTable};
use std::time::SystemTime;

/// Where the records updater reads host entries from.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Human-readable origin, used in log lines.
    fn describe(&self) -> String;

    /// Cheap change marker. `None` means the source cannot tell, in which
    /// case every poll reloads.
    async fn fingerprint(&self) -> Result<Option<SystemTime>, DomainError>;

    async fn load(&self) -> Result<RecordTable, DomainError>;
}
