use rrdns_application::ports::{RecordSource, RecordStore};
use rrdns_domain::DomainError;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

const DEFAULT_RELOAD_INTERVAL_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    Unchanged,
    Reloaded { hosts: usize },
}

/// Keeps the record store in step with its source.
///
/// The store is published whole on every reload, so queries in flight
/// never see a half-loaded file. A failed reload leaves the previous table
/// in place.
pub struct RecordsReloadJob {
    source: Arc<dyn RecordSource>,
    store: Arc<dyn RecordStore>,
    interval_secs: u64,
    last_fingerprint: Mutex<Option<SystemTime>>,
    shutdown: CancellationToken,
}

impl RecordsReloadJob {
    pub fn new(source: Arc<dyn RecordSource>, store: Arc<dyn RecordStore>) -> Self {
        Self {
            source,
            store,
            interval_secs: DEFAULT_RELOAD_INTERVAL_SECS,
            last_fingerprint: Mutex::new(None),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    /// Unconditional load, used once at startup.
    pub async fn load_now(&self) -> Result<usize, DomainError> {
        let fingerprint = self.source.fingerprint().await?;
        self.load_and_publish(fingerprint).await
    }

    pub async fn reload_if_changed(&self) -> Result<ReloadOutcome, DomainError> {
        let fingerprint = self.source.fingerprint().await?;
        if fingerprint.is_some() && fingerprint == self.last_fingerprint() {
            return Ok(ReloadOutcome::Unchanged);
        }

        let hosts = self.load_and_publish(fingerprint).await?;
        Ok(ReloadOutcome::Reloaded { hosts })
    }

    async fn load_and_publish(&self, fingerprint: Option<SystemTime>) -> Result<usize, DomainError> {
        let table = self.source.load().await?;
        let hosts = table.len();
        self.store.replace(table);
        *self
            .last_fingerprint
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = fingerprint;
        Ok(hosts)
    }

    fn last_fingerprint(&self) -> Option<SystemTime> {
        *self
            .last_fingerprint
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Spawns the job loop. `None` when there is nothing to run.
    pub async fn start(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if self.interval_secs == 0 {
            info!(source = %self.source.describe(), "Records reloading disabled");
            return None;
        }

        info!(
            source = %self.source.describe(),
            interval_secs = self.interval_secs,
            "Starting records reload job"
        );

        Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            // Startup already loaded the table.
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("RecordsReloadJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        match self.reload_if_changed().await {
                            Ok(ReloadOutcome::Unchanged) => {
                                debug!("RecordsReloadJob: source unchanged");
                            }
                            Ok(ReloadOutcome::Reloaded { hosts }) => {
                                info!(hosts, "RecordsReloadJob: record table reloaded");
                            }
                            Err(e) => {
                                error!(error = %e, "RecordsReloadJob: reload failed, keeping previous table");
                            }
                        }
                    }
                }
            }
        }))
    }
}
