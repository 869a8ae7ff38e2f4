use rrdns_infrastructure::events::{QueryNameEmitter, QueryNameMetrics};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

const DEFAULT_REPORT_INTERVAL_SECS: u64 = 60;
const TOP_NAMES: usize = 5;

/// Consumer end of the query-name observer queue.
pub struct QueryStatsJob {
    receiver: Mutex<Option<mpsc::Receiver<Arc<str>>>>,
    metrics: QueryNameMetrics,
    emitter: Option<QueryNameEmitter>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl QueryStatsJob {
    pub fn new(receiver: mpsc::Receiver<Arc<str>>, metrics: QueryNameMetrics) -> Self {
        Self {
            receiver: Mutex::new(Some(receiver)),
            metrics,
            emitter: None,
            interval_secs: DEFAULT_REPORT_INTERVAL_SECS,
            shutdown: CancellationToken::new(),
        }
    }

    /// Report the emitter's dropped-name count alongside the totals.
    pub fn with_emitter(mut self, emitter: QueryNameEmitter) -> Self {
        self.emitter = Some(emitter);
        self
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs.max(1);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn metrics(&self) -> &QueryNameMetrics {
        &self.metrics
    }

    /// Spawns the job loop. `None` when there is nothing to run.
    pub async fn start(self: Arc<Self>) -> Option<JoinHandle<()>> {
        let receiver = self
            .receiver
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        let Some(mut receiver) = receiver else {
            warn!("QueryStatsJob: already started");
            return None;
        };

        info!(interval_secs = self.interval_secs, "Starting query statistics job");

        Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("QueryStatsJob: shutting down");
                        break;
                    }
                    name = receiver.recv() => {
                        match name {
                            Some(name) => self.metrics.track(&name),
                            None => {
                                debug!("QueryStatsJob: observer queue closed");
                                break;
                            }
                        }
                    }
                    _ = interval.tick() => self.report(),
                }
            }

            while let Ok(name) = receiver.try_recv() {
                self.metrics.track(&name);
            }
            self.report();
        }))
    }

    fn report(&self) {
        let dropped = self.emitter.as_ref().map(|e| e.dropped()).unwrap_or(0);
        info!(
            total = self.metrics.total_queries(),
            distinct = self.metrics.distinct_names(),
            dropped,
            top = ?self.metrics.top_names(TOP_NAMES),
            "Query statistics"
        );
    }
}
