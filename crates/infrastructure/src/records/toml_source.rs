use super::parser::parse_records;
use async_trait::async_trait;
use rrdns_application::ports::RecordSource;
use rrdns_domain::{DomainError, RecordTable};
use std::path::PathBuf;
use std::time::SystemTime;
use tracing::{debug, warn};

/// Records file on local disk, reloaded whenever its mtime moves.
pub struct TomlRecordSource {
    path: PathBuf,
}

impl TomlRecordSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RecordSource for TomlRecordSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fingerprint(&self) -> Result<Option<SystemTime>, DomainError> {
        let metadata = tokio::fs::metadata(&self.path).await.map_err(|e| {
            DomainError::IoError(format!("{}: {}", self.path.display(), e))
        })?;
        Ok(metadata.modified().ok())
    }

    async fn load(&self) -> Result<RecordTable, DomainError> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            DomainError::IoError(format!("{}: {}", self.path.display(), e))
        })?;

        let parsed = parse_records(&contents)?;
        if parsed.skipped > 0 {
            warn!(
                path = %self.path.display(),
                skipped = parsed.skipped,
                "Records file loaded with skipped entries"
            );
        }
        debug!(path = %self.path.display(), hosts = parsed.table.len(), "Records file parsed");
        Ok(parsed.table)
    }
}
