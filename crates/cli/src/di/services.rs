use rrdns_application::ports::{QueryObserver, RecordStore};
use rrdns_domain::Config;
use rrdns_infrastructure::dns::ListenerManager;
use rrdns_infrastructure::events::{QueryNameEmitter, QueryNameMetrics};
use rrdns_infrastructure::records::TomlRecordSource;
use rrdns_infrastructure::store::SnapshotRecordStore;
use rrdns_jobs::{JobRunner, QueryStatsJob, RecordsReloadJob};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

pub struct DnsServices {
    pub store: Arc<SnapshotRecordStore>,
    pub emitter: QueryNameEmitter,
    pub manager: ListenerManager,
    pub jobs: JobRunner,
}

impl DnsServices {
    /// Builds the store and observer and performs the first records load.
    /// A failing first load is returned as an error.
    pub async fn new(config: &Config, shutdown: CancellationToken) -> anyhow::Result<Self> {
        let store = Arc::new(SnapshotRecordStore::new());
        let (emitter, receiver) = QueryNameEmitter::new_enabled(config.observer.queue_capacity);

        let mut jobs = JobRunner::new().with_shutdown_token(shutdown.clone());

        match config.records.path {
            Some(ref path) => {
                let source = Arc::new(TomlRecordSource::new(path));
                let reload = RecordsReloadJob::new(source, store.clone())
                    .with_interval(config.records.reload_interval_secs);

                let hosts = reload.load_now().await?;
                info!(path = %path, hosts, "Loaded records");

                jobs = jobs.with_records_reload(reload);
            }
            None => warn!("No records file configured, serving an empty table"),
        }

        let stats = QueryStatsJob::new(receiver, QueryNameMetrics::new())
            .with_emitter(emitter.clone())
            .with_interval(config.observer.stats_interval_secs);
        jobs = jobs.with_query_stats(stats);

        let manager = ListenerManager::new(
            store.clone() as Arc<dyn RecordStore>,
            Arc::new(emitter.clone()) as Arc<dyn QueryObserver>,
        )
        .with_ttl(config.server.ttl)
        .with_shutdown_token(shutdown);

        Ok(Self {
            store,
            emitter,
            manager,
            jobs,
        })
    }
}
