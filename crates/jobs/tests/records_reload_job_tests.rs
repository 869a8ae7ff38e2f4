use rrdns_application::ports::RecordStore;
use rrdns_infrastructure::store::SnapshotRecordStore;
use rrdns_jobs::{RecordsReloadJob, ReloadOutcome};
use std::sync::Arc;
use tokio::time::{sleep, Duration};
use tokio_util::sync::CancellationToken;

mod helpers;
use helpers::MockRecordSource;

fn make_job(source: Arc<MockRecordSource>, store: Arc<SnapshotRecordStore>) -> RecordsReloadJob {
    RecordsReloadJob::new(source, store)
}

#[tokio::test]
async fn test_load_now_populates_store() {
    let source = Arc::new(MockRecordSource::new().with_host("svc.example.", &["10.0.0.1"]));
    let store = Arc::new(SnapshotRecordStore::new());
    let job = make_job(source.clone(), store.clone());

    let hosts = job.load_now().await.unwrap();

    assert_eq!(hosts, 1);
    assert_eq!(source.load_count(), 1);
    assert!(store.lookup("svc.example.").is_some());
    assert!(store.last_updated().is_some());
}

#[tokio::test]
async fn test_load_now_propagates_failure() {
    let source = Arc::new(MockRecordSource::new());
    source.set_should_fail(true);
    let store = Arc::new(SnapshotRecordStore::new());
    let job = make_job(source, store.clone());

    assert!(job.load_now().await.is_err());
    assert!(store.is_empty());
    assert!(store.last_updated().is_none());
}

#[tokio::test]
async fn test_reload_skipped_when_fingerprint_unchanged() {
    let source = Arc::new(MockRecordSource::new().with_host("svc.example.", &["10.0.0.1"]));
    let store = Arc::new(SnapshotRecordStore::new());
    let job = make_job(source.clone(), store);

    job.load_now().await.unwrap();
    let outcome = job.reload_if_changed().await.unwrap();

    assert_eq!(outcome, ReloadOutcome::Unchanged);
    assert_eq!(source.load_count(), 1);
}

#[tokio::test]
async fn test_reload_picks_up_changed_source() {
    let source = Arc::new(MockRecordSource::new().with_host("svc.example.", &["10.0.0.1"]));
    let store = Arc::new(SnapshotRecordStore::new());
    let job = make_job(source.clone(), store.clone());
    job.load_now().await.unwrap();

    source.set_host("new.example.", &["10.0.0.9"]);
    source.touch();
    let outcome = job.reload_if_changed().await.unwrap();

    assert_eq!(outcome, ReloadOutcome::Reloaded { hosts: 2 });
    assert!(store.lookup("new.example.").is_some());
}

#[tokio::test]
async fn test_reload_always_loads_without_fingerprint() {
    let source = Arc::new(MockRecordSource::new());
    source.set_fingerprint(None);
    let store = Arc::new(SnapshotRecordStore::new());
    let job = make_job(source.clone(), store);

    job.load_now().await.unwrap();
    job.reload_if_changed().await.unwrap();
    job.reload_if_changed().await.unwrap();

    assert_eq!(source.load_count(), 3);
}

#[tokio::test]
async fn test_failed_reload_keeps_previous_table() {
    let source = Arc::new(MockRecordSource::new().with_host("svc.example.", &["10.0.0.1"]));
    let store = Arc::new(SnapshotRecordStore::new());
    let job = make_job(source.clone(), store.clone());
    job.load_now().await.unwrap();

    source.set_should_fail(true);
    source.touch();

    assert!(job.reload_if_changed().await.is_err());
    assert!(store.lookup("svc.example.").is_some());
}

#[tokio::test]
async fn test_failed_reload_is_retried_on_next_poll() {
    let source = Arc::new(MockRecordSource::new().with_host("svc.example.", &["10.0.0.1"]));
    let store = Arc::new(SnapshotRecordStore::new());
    let job = make_job(source.clone(), store.clone());
    job.load_now().await.unwrap();

    source.set_should_fail(true);
    source.touch();
    assert!(job.reload_if_changed().await.is_err());

    source.set_should_fail(false);
    source.set_host("later.example.", &["10.0.0.5"]);
    let outcome = job.reload_if_changed().await.unwrap();

    assert_eq!(outcome, ReloadOutcome::Reloaded { hosts: 2 });
    assert!(store.lookup("later.example.").is_some());
}

#[tokio::test]
async fn test_job_polls_on_interval() {
    let source = Arc::new(MockRecordSource::new().with_host("svc.example.", &["10.0.0.1"]));
    let store = Arc::new(SnapshotRecordStore::new());
    let token = CancellationToken::new();
    let job = Arc::new(
        make_job(source.clone(), store.clone())
            .with_interval(1)
            .with_cancellation(token.clone()),
    );
    job.load_now().await.unwrap();

    source.set_host("polled.example.", &["10.0.0.7"]);
    source.touch();
    job.clone().start().await;

    sleep(Duration::from_millis(1300)).await;
    token.cancel();

    assert_eq!(source.load_count(), 2);
    assert!(store.lookup("polled.example.").is_some());
}

#[tokio::test]
async fn test_job_stops_on_cancellation() {
    let source = Arc::new(MockRecordSource::new());
    let store = Arc::new(SnapshotRecordStore::new());
    let token = CancellationToken::new();
    let job = Arc::new(
        make_job(source.clone(), store)
            .with_interval(1)
            .with_cancellation(token.clone()),
    );

    job.start().await;
    token.cancel();
    source.touch();
    sleep(Duration::from_millis(1300)).await;

    assert_eq!(source.load_count(), 0);
}

#[tokio::test]
async fn test_zero_interval_disables_polling() {
    let source = Arc::new(MockRecordSource::new());
    let store = Arc::new(SnapshotRecordStore::new());
    let job = Arc::new(make_job(source.clone(), store).with_interval(0));

    job.start().await;
    source.touch();
    sleep(Duration::from_millis(50)).await;

    assert_eq!(source.load_count(), 0);
}
