use crate::{QueryStatsJob, RecordsReloadJob};
use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

pub trait SpawnableJob: Send + Sync + 'static {
    fn with_cancellation(self, token: CancellationToken) -> Self;
    fn start_job(self: Arc<Self>) -> impl Future<Output = Option<JoinHandle<()>>> + Send;
}

macro_rules! impl_spawnable_job {
    ($t:ty) => {
        impl SpawnableJob for $t {
            fn with_cancellation(self, token: CancellationToken) -> Self {
                self.with_cancellation(token)
            }

            fn start_job(self: Arc<Self>) -> impl Future<Output = Option<JoinHandle<()>>> + Send {
                self.start()
            }
        }
    };
}

impl_spawnable_job!(RecordsReloadJob);
impl_spawnable_job!(QueryStatsJob);

async fn spawn_job<J: SpawnableJob>(
    job: Option<J>,
    shutdown: &Option<CancellationToken>,
) -> Option<JoinHandle<()>> {
    let job = job?;
    let job = match shutdown {
        Some(token) => job.with_cancellation(token.clone()),
        None => job,
    };
    Arc::new(job).start_job().await
}

pub struct JobRunner {
    records_reload: Option<RecordsReloadJob>,
    query_stats: Option<QueryStatsJob>,
    shutdown: Option<CancellationToken>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self {
            records_reload: None,
            query_stats: None,
            shutdown: None,
        }
    }

    pub fn with_records_reload(mut self, job: RecordsReloadJob) -> Self {
        self.records_reload = Some(job);
        self
    }

    pub fn with_query_stats(mut self, job: QueryStatsJob) -> Self {
        self.query_stats = Some(job);
        self
    }

    pub fn with_shutdown_token(mut self, token: CancellationToken) -> Self {
        self.shutdown = Some(token);
        self
    }

    pub async fn start(self) -> RunningJobs {
        info!("Starting background job runner");

        let mut handles = Vec::with_capacity(2);
        handles.extend(spawn_job(self.records_reload, &self.shutdown).await);
        handles.extend(spawn_job(self.query_stats, &self.shutdown).await);

        info!(jobs = handles.len(), "All background jobs started");
        RunningJobs { handles }
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Handles of the job loops started by [`JobRunner::start`].
pub struct RunningJobs {
    handles: Vec<JoinHandle<()>>,
}

impl RunningJobs {
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Waits for every job loop to finish. Cancel the shutdown token first.
    pub async fn join(self) {
        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Background job panicked or was aborted");
            }
        }
        info!("Background jobs stopped");
    }
}
